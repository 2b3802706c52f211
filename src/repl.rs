use crate::model::clamp_cluster_count;
use crate::session::{ClusteringSession, ManualTicker, SessionState};
use crate::{SessionConfig, palette};
use std::io::{BufRead, Write};
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command: {0} (try `help`)")]
    Unknown(String),

    #[error("usage: {0}")]
    Usage(&'static str),

    #[error("not a number: {0}")]
    BadNumber(String),
}

/// One line of user input
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Add { x: f64, y: f64 },
    Clear,
    Reset,
    Clusters(i64),
    Toggle,
    Tick(usize),
    Show,
    Json,
    Help,
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let mut parts = line.split_whitespace();
        let Some(head) = parts.next() else {
            return Err(CommandError::Usage("help"));
        };
        let args: Vec<&str> = parts.collect();

        match (head.to_lowercase().as_str(), args.as_slice()) {
            ("add" | "a", [x, y]) => Ok(Command::Add {
                x: number(x)?,
                y: number(y)?,
            }),
            ("add" | "a", _) => Err(CommandError::Usage("add X Y")),
            ("clear", []) => Ok(Command::Clear),
            ("reset", []) => Ok(Command::Reset),
            ("k" | "clusters", [k]) => k
                .parse()
                .map(Command::Clusters)
                .map_err(|_| CommandError::BadNumber(k.to_string())),
            ("k" | "clusters", _) => Err(CommandError::Usage("k N")),
            ("toggle" | "start" | "stop", []) => Ok(Command::Toggle),
            ("tick" | "t", []) => Ok(Command::Tick(1)),
            ("tick" | "t", [n]) => n
                .parse()
                .map(Command::Tick)
                .map_err(|_| CommandError::BadNumber(n.to_string())),
            ("show" | "s", []) => Ok(Command::Show),
            ("json", []) => Ok(Command::Json),
            ("help" | "?", _) => Ok(Command::Help),
            ("quit" | "exit" | "q", _) => Ok(Command::Quit),
            (other, _) => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

fn number(raw: &str) -> Result<f64, CommandError> {
    raw.parse()
        .map_err(|_| CommandError::BadNumber(raw.to_string()))
}

const HELP: &str = "\
commands:
  add X Y    add a point
  clear      remove all points
  reset      place fresh random centroids
  k N        set cluster count (clamped to 2..=5)
  toggle     start or stop the algorithm
  tick [N]   fire N timer ticks (default 1)
  show       print points and centroids
  json       print a JSON snapshot
  quit       leave";

/// Line-driven host for a session whose ticks are fired by hand
pub struct Repl {
    session: ClusteringSession,
    ticker: ManualTicker,
}

impl Repl {
    pub fn new(config: &SessionConfig) -> Self {
        let ticker = ManualTicker::new();
        let session = ClusteringSession::from_config(config, Arc::new(ticker.clone()));
        Self { session, ticker }
    }

    pub fn session(&self) -> &ClusteringSession {
        &self.session
    }

    /// Apply one command, returning the text to show the user, or `None` to quit
    pub fn execute(&self, command: Command) -> Option<String> {
        let out = match command {
            Command::Add { x, y } => {
                self.session.add_point(x, y);
                format!("{} points", self.session.points().len())
            }
            Command::Clear => {
                self.session.clear_points();
                "points cleared".to_string()
            }
            Command::Reset => match self.session.reset_centroids() {
                Ok(()) => format!("{} centroids placed", self.session.centroids().len()),
                Err(e) => format!("error: {e}"),
            },
            Command::Clusters(raw) => {
                let k = clamp_cluster_count(raw);
                self.session.set_num_clusters(k);
                format!("clusters = {k} (reset to apply)")
            }
            Command::Toggle => match self.session.toggle_run() {
                SessionState::Running => "running".to_string(),
                SessionState::Idle => "stopped".to_string(),
            },
            Command::Tick(n) => {
                for _ in 0..n {
                    self.ticker.fire();
                }
                self.session.snapshot().summary()
            }
            Command::Show => self.render(),
            Command::Json => match serde_json::to_string_pretty(&self.session.snapshot()) {
                Ok(json) => json,
                Err(e) => format!("error: {e}"),
            },
            Command::Help => HELP.to_string(),
            Command::Quit => return None,
        };
        Some(out)
    }

    /// Plain-text listing of the current state
    pub fn render(&self) -> String {
        let snap = self.session.snapshot();
        let mut out = snap.summary();

        for (idx, c) in snap.centroids.iter().enumerate() {
            out.push_str(&format!(
                "\n  centroid {idx} ({:.2}, {:.2}) {}",
                c.x,
                c.y,
                palette::color_for(Some(idx))
            ));
        }
        for p in &snap.points {
            let label = p
                .cluster_id
                .map(|id| id.to_string())
                .unwrap_or_else(|| "-".to_string());
            out.push_str(&format!("\n  point ({:.2}, {:.2}) -> {label}", p.x, p.y));
        }
        out
    }

    /// Read commands from `input` until EOF or `quit`
    pub fn run(&self, input: impl BufRead, mut output: impl Write) -> std::io::Result<()> {
        writeln!(output, "k-means session {} (type `help`)", self.session.id())?;

        for line in input.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            match Command::parse(&line) {
                Ok(cmd) => match self.execute(cmd) {
                    Some(text) => writeln!(output, "{text}")?,
                    None => break,
                },
                Err(e) => writeln!(output, "{e}")?,
            }
        }

        self.session.shutdown();
        Ok(())
    }
}
