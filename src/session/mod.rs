mod ticker;


pub use ticker::{ManualTicker, TickFn, TickGuard, Ticker, TokioTicker};

use crate::clusterer::{self, Centroid, Point};
use crate::config::SessionConfig;
use crate::model::{Canvas, ClusterModel};
use crate::snapshot::Snapshot;
use chrono::Utc;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Weak};
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, info, trace};
use uuid::Uuid;

/// Run state of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    /// Ticks have no effect
    Idle,
    /// One iteration per tick
    Running,
}

struct Inner {
    model: ClusterModel,
    state: SessionState,
    /// Bumped on every entry into `Running`; ticks carry the epoch they were subscribed under
    epoch: u64,
    iterations: u64,
    converged: bool,
    subscription: Option<TickGuard>,
    progress: watch::Sender<u64>,
}

/// Run/idle control around a [`ClusterModel`].
///
/// All mutators and every tick go through one lock, so a user action never
/// interleaves with an iteration. While running, the session holds a tick
/// subscription; leaving `Running`, [`shutdown`](Self::shutdown) and drop
/// all release it.
pub struct ClusteringSession {
    id: Uuid,
    inner: Arc<Mutex<Inner>>,
    ticker: Arc<dyn Ticker>,
    tick_interval: Duration,
}

impl ClusteringSession {
    pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(500);

    /// Wrap `model` in an idle session that will tick through `ticker`
    pub fn new(model: ClusterModel, ticker: Arc<dyn Ticker>, tick_interval: Duration) -> Self {
        let id = Uuid::new_v4();
        let (progress, _) = watch::channel(0);

        info!(
            session_id = %id,
            num_clusters = model.num_clusters(),
            tick_ms = tick_interval.as_millis() as u64,
            "clustering session created"
        );

        Self {
            id,
            inner: Arc::new(Mutex::new(Inner {
                model,
                state: SessionState::Idle,
                epoch: 0,
                iterations: 0,
                converged: false,
                subscription: None,
                progress,
            })),
            ticker,
            tick_interval,
        }
    }

    /// Build the model described by `config` and wrap it in an idle session
    pub fn from_config(config: &SessionConfig, ticker: Arc<dyn Ticker>) -> Self {
        let canvas = Canvas::new(config.canvas_width, config.canvas_height);
        let mut model = match config.seed {
            Some(seed) => ClusterModel::seeded(canvas, seed),
            None => ClusterModel::new(canvas),
        };
        model.set_num_clusters(config.cluster_count());

        Self::new(model, ticker, config.tick_interval())
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    pub fn add_point(&self, x: f64, y: f64) {
        let mut inner = self.inner.lock();
        inner.model.add_point(x, y);
        inner.converged = false;
        trace!(session_id = %self.id, x, y, "point added");
    }

    pub fn clear_points(&self) {
        let mut inner = self.inner.lock();
        inner.model.clear_points();
        inner.converged = false;
        debug!(session_id = %self.id, "points cleared");
    }

    /// Record a new cluster count. Centroids are only resized by [`reset_centroids`](Self::reset_centroids).
    pub fn set_num_clusters(&self, k: usize) {
        let mut inner = self.inner.lock();
        inner.model.set_num_clusters(k);
        debug!(
            session_id = %self.id,
            num_clusters = k,
            centroids = inner.model.centroids().len(),
            "cluster count changed"
        );
    }

    pub fn reset_centroids(&self) -> clusterer::Result<()> {
        let mut inner = self.inner.lock();
        inner.model.reset_centroids()?;
        inner.converged = false;
        info!(
            session_id = %self.id,
            num_clusters = inner.model.num_clusters(),
            "centroids reset"
        );
        Ok(())
    }

    /// Install exact centroid positions instead of random ones
    pub fn set_centroids(&self, centroids: Vec<Centroid>) {
        let mut inner = self.inner.lock();
        inner.model.set_centroids(centroids);
        inner.converged = false;
    }

    /// Flip between `Idle` and `Running`, returning the new state.
    ///
    /// Entering `Running` only subscribes to the ticker; the first iteration
    /// happens on the first tick.
    pub fn toggle_run(&self) -> SessionState {
        let mut inner = self.inner.lock();
        let current = inner.state;
        match current {
            SessionState::Idle => self.enter_running(&mut inner),
            SessionState::Running => self.enter_idle(&mut inner),
        }
        inner.state
    }

    /// Return to `Idle` if running. No-op otherwise.
    pub fn stop(&self) {
        let mut inner = self.inner.lock();
        if inner.state == SessionState::Running {
            self.enter_idle(&mut inner);
        }
    }

    /// Stop and release the tick subscription
    pub fn shutdown(&self) {
        self.stop();
        info!(session_id = %self.id, "clustering session shut down");
    }

    fn enter_running(&self, inner: &mut Inner) {
        inner.state = SessionState::Running;
        inner.epoch += 1;
        let on_tick = tick_callback(Arc::downgrade(&self.inner), inner.epoch, self.id);
        inner.subscription = Some(self.ticker.subscribe(self.tick_interval, on_tick));
        info!(session_id = %self.id, epoch = inner.epoch, "session running");
    }

    fn enter_idle(&self, inner: &mut Inner) {
        inner.state = SessionState::Idle;
        // Dropping the guard cancels the timer
        inner.subscription = None;
        info!(
            session_id = %self.id,
            iterations = inner.iterations,
            "session idle"
        );
    }

    pub fn state(&self) -> SessionState {
        self.inner.lock().state
    }

    pub fn is_running(&self) -> bool {
        self.state() == SessionState::Running
    }

    pub fn points(&self) -> Vec<Point> {
        self.inner.lock().model.points().to_vec()
    }

    pub fn centroids(&self) -> Vec<Centroid> {
        self.inner.lock().model.centroids().to_vec()
    }

    pub fn num_clusters(&self) -> usize {
        self.inner.lock().model.num_clusters()
    }

    /// Iterations applied by ticks so far
    pub fn iterations(&self) -> u64 {
        self.inner.lock().iterations
    }

    /// Whether the latest iteration changed nothing
    pub fn converged(&self) -> bool {
        self.inner.lock().converged
    }

    /// Watch the iteration counter; it changes after every applied iteration
    pub fn watch_iterations(&self) -> watch::Receiver<u64> {
        self.inner.lock().progress.subscribe()
    }

    /// Consistent read-only copy of the whole session for rendering
    pub fn snapshot(&self) -> Snapshot {
        let inner = self.inner.lock();
        Snapshot {
            session_id: self.id,
            captured_at: Utc::now(),
            state: inner.state,
            num_clusters: inner.model.num_clusters(),
            iterations: inner.iterations,
            converged: inner.converged,
            points: inner.model.points().to_vec(),
            centroids: inner.model.centroids().to_vec(),
        }
    }
}

impl Drop for ClusteringSession {
    fn drop(&mut self) {
        if let Some(guard) = self.inner.lock().subscription.take() {
            guard.cancel();
            debug!(session_id = %self.id, "tick subscription released on drop");
        }
    }
}

impl std::fmt::Debug for ClusteringSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClusteringSession")
            .field("id", &self.id)
            .field("tick_interval", &self.tick_interval)
            .finish_non_exhaustive()
    }
}

fn tick_callback(inner: Weak<Mutex<Inner>>, epoch: u64, session_id: Uuid) -> TickFn {
    Arc::new(move || {
        if let Some(inner) = inner.upgrade() {
            on_tick(&mut inner.lock(), epoch, session_id);
        }
    })
}

/// One timer tick. State is checked here, at fire time.
fn on_tick(inner: &mut Inner, epoch: u64, session_id: Uuid) {
    if inner.state != SessionState::Running || inner.epoch != epoch {
        trace!(%session_id, epoch, "stale tick ignored");
        return;
    }

    match inner.model.run_iteration() {
        Ok(it) => {
            inner.iterations += 1;
            inner.converged = it.converged;
            inner.progress.send_replace(inner.iterations);
            debug!(
                %session_id,
                iteration = inner.iterations,
                reassigned = it.reassigned,
                converged = it.converged,
                "iteration applied"
            );
        }
        Err(err) => {
            debug!(%session_id, error = %err, "tick skipped");
        }
    }
}
