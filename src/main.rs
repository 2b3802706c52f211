use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use kmeans_live::repl::Repl;
use kmeans_live::{ClusteringSession, SessionConfig, Snapshot, TokioTicker, logging};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::runtime::Handle;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "kmeans-live", version, about = "Watch K-Means converge one tick at a time")]
struct Cli {
    /// JSON session config; flags below override it
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Cluster count (clamped to 2..=5)
    #[arg(short = 'k', long, global = true)]
    clusters: Option<i64>,

    /// Seed for point scatter and centroid placement
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Milliseconds between iterations
    #[arg(long, global = true)]
    tick_ms: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Scatter random blobs and run until the centroids settle
    Demo {
        /// Number of points to scatter
        #[arg(long, default_value_t = 60)]
        points: usize,

        /// Give up after this many iterations
        #[arg(long, default_value_t = 40)]
        max_ticks: u64,

        /// Print full JSON snapshots instead of summaries
        #[arg(long)]
        json: bool,
    },
    /// Drive a session by typing commands on stdin
    Repl,
}

impl Cli {
    fn session_config(&self) -> Result<SessionConfig> {
        let mut config = match &self.config {
            Some(path) => SessionConfig::load(path)?,
            None => SessionConfig::default(),
        };

        if let Some(k) = self.clusters {
            config.num_clusters = k;
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(ms) = self.tick_ms {
            config.tick_interval_ms = ms;
        }

        config.validate()?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    logging::init_logging();
    let cli = Cli::parse();
    let config = cli.session_config()?;

    match cli.command {
        Command::Demo {
            points,
            max_ticks,
            json,
        } => {
            let runtime = tokio::runtime::Runtime::new().context("Failed to start tokio runtime")?;
            runtime.block_on(run_demo(config, points, max_ticks, json))
        }
        Command::Repl => {
            let repl = Repl::new(&config);
            repl.run(std::io::stdin().lock(), std::io::stdout().lock())
                .context("REPL I/O failed")
        }
    }
}

async fn run_demo(config: SessionConfig, points: usize, max_ticks: u64, json: bool) -> Result<()> {
    let ticker = Arc::new(TokioTicker::new(Handle::current()));
    let session = ClusteringSession::from_config(&config, ticker);

    let mut rng = match config.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed.wrapping_add(1)),
        None => ChaCha8Rng::from_rng(&mut rand::rng()),
    };
    scatter_blobs(&session, &config, points, &mut rng);
    session.reset_centroids()?;

    info!(
        points,
        clusters = session.num_clusters(),
        "demo starting"
    );
    print_snapshot(&session.snapshot(), json)?;

    let mut progress = session.watch_iterations();
    let patience = config.tick_interval() * 4;
    session.toggle_run();

    loop {
        tokio::select! {
            changed = tokio::time::timeout(patience, progress.changed()) => {
                match changed {
                    Ok(Ok(())) => {}
                    Ok(Err(_)) => break,
                    Err(_) => {
                        warn!(?patience, "no iteration arrived in time");
                        break;
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("interrupted");
                break;
            }
        }

        let snap = session.snapshot();
        print_snapshot(&snap, json)?;
        if snap.converged || snap.iterations >= max_ticks {
            break;
        }
    }

    session.shutdown();
    Ok(())
}

/// Drop points around a few random blob centres so there is structure to find
fn scatter_blobs(session: &ClusteringSession, config: &SessionConfig, n: usize, rng: &mut impl Rng) {
    let (w, h) = (config.canvas_width, config.canvas_height);
    let spread = w.min(h) / 10.0;
    let centres: Vec<(f64, f64)> = (0..config.cluster_count())
        .map(|_| {
            (
                rng.random_range(spread..w - spread),
                rng.random_range(spread..h - spread),
            )
        })
        .collect();

    for i in 0..n {
        let (cx, cy) = centres[i % centres.len()];
        let x = cx + rng.random_range(-spread..spread);
        let y = cy + rng.random_range(-spread..spread);
        session.add_point(x, y);
    }
}

fn print_snapshot(snap: &Snapshot, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(snap)?);
    } else {
        println!("{}", snap.summary());
    }
    Ok(())
}
