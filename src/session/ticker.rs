use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::trace;

/// Callback fired on every tick
pub type TickFn = Arc<dyn Fn() + Send + Sync>;

/// Periodic trigger facility the session subscribes to while running
pub trait Ticker: Send + Sync {
    /// Start calling `on_tick` every `period` until the returned guard is dropped
    fn subscribe(&self, period: Duration, on_tick: TickFn) -> TickGuard;
}

/// Live tick subscription. Dropping it stops further ticks.
#[derive(Debug)]
pub struct TickGuard {
    token: CancellationToken,
}

impl TickGuard {
    pub fn new(token: CancellationToken) -> Self {
        Self { token }
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

impl Drop for TickGuard {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

/// Ticks from a task spawned on a tokio runtime
#[derive(Debug, Clone)]
pub struct TokioTicker {
    handle: Handle,
}

impl TokioTicker {
    /// Shortest period the timer task runs at; a zero period is raised to this
    pub const MIN_PERIOD: Duration = Duration::from_millis(1);

    pub fn new(handle: Handle) -> Self {
        Self { handle }
    }

    /// Bind to the runtime of the calling context, if there is one
    pub fn try_current() -> Option<Self> {
        Handle::try_current().ok().map(Self::new)
    }
}

impl Ticker for TokioTicker {
    fn subscribe(&self, period: Duration, on_tick: TickFn) -> TickGuard {
        let token = CancellationToken::new();
        let cancelled = token.clone();
        let period = period.max(Self::MIN_PERIOD);

        self.handle.spawn(async move {
            // First tick lands one full period after subscribing
            let mut interval = tokio::time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    biased;
                    () = cancelled.cancelled() => break,
                    _ = interval.tick() => on_tick(),
                }
            }
            trace!("tick task stopped");
        });

        TickGuard::new(token)
    }
}

/// Ticks only when [`fire`](Self::fire) is called.
///
/// Suits hosts that own their event loop and tests that need exact control.
#[derive(Clone, Default)]
pub struct ManualTicker {
    subscribers: Arc<Mutex<Vec<(CancellationToken, TickFn)>>>,
}

impl ManualTicker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire one tick on every live subscription, returning how many were called
    pub fn fire(&self) -> usize {
        let live: Vec<TickFn> = {
            let mut subs = self.subscribers.lock();
            subs.retain(|(token, _)| !token.is_cancelled());
            subs.iter().map(|(_, f)| Arc::clone(f)).collect()
        };

        for on_tick in &live {
            on_tick();
        }
        live.len()
    }

    /// Number of subscriptions that have not been released
    pub fn active(&self) -> usize {
        self.subscribers
            .lock()
            .iter()
            .filter(|(token, _)| !token.is_cancelled())
            .count()
    }
}

impl Ticker for ManualTicker {
    fn subscribe(&self, _period: Duration, on_tick: TickFn) -> TickGuard {
        let token = CancellationToken::new();
        let mut subs = self.subscribers.lock();
        subs.retain(|(live, _)| !live.is_cancelled());
        subs.push((token.clone(), on_tick));
        TickGuard::new(token)
    }
}

impl std::fmt::Debug for ManualTicker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ManualTicker")
            .field("active", &self.active())
            .finish()
    }
}
