//! The loader state machine.
//!
//! An explicit finite-state machine replaces the platform-managed task
//! abstraction the original design leaned on. States run `Idle -> Loading
//! -> Delivered` per cycle; `reset` returns to `Idle` from any state. Every
//! `start` bumps a monotonically increasing cycle token, and the token is
//! compared again at delivery time -- that comparison, under the same lock
//! as the transition, is what guarantees a cancelled cycle can never reach
//! the consumer.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use quakewatch_feed::{FeedOutcome, FeedSource};
use tracing::{debug, info, warn};

/// Where the loader is within the current cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoaderPhase {
    /// No cycle running and nothing delivered since the last reset.
    Idle,
    /// A fetch + decode task is in flight.
    Loading,
    /// The cycle's outcome has been delivered (and cached).
    Delivered,
}

/// Mutable loader state, guarded by one mutex.
///
/// Everything the state machine touches lives behind the same lock, so
/// `start`, `reset`, attach, and delivery completion are mutually atomic.
struct LoaderInner {
    phase: LoaderPhase,
    /// Monotonic cycle token. The value captured at `start` identifies a
    /// cycle; any later bump (new start or reset) makes that cycle stale.
    cycle: u64,
    /// The currently attached consumer, if any.
    consumer: Option<Arc<dyn crate::FeedConsumer>>,
    /// Outcome of the most recent delivered cycle. Replayed to a consumer
    /// that attaches after delivery; cleared on reset.
    last_delivered: Option<Arc<FeedOutcome>>,
}

/// Single-flight feed loader.
///
/// At most one fetch cycle is in flight per loader instance. `start` while
/// `Loading` is a no-op; `reset` cancels the in-flight cycle by
/// invalidating its token. The loader retains exactly one piece of state
/// across consumer attach/detach: the last delivered outcome.
///
/// `start` spawns onto the ambient tokio runtime, so the loader must be
/// driven from within one.
pub struct FeedLoader {
    source: Arc<FeedSource>,
    inner: Arc<Mutex<LoaderInner>>,
}

impl FeedLoader {
    /// Create a loader over a feed source with no consumer attached.
    pub fn new(source: Arc<FeedSource>) -> Self {
        Self {
            source,
            inner: Arc::new(Mutex::new(LoaderInner {
                phase: LoaderPhase::Idle,
                cycle: 0,
                consumer: None,
                last_delivered: None,
            })),
        }
    }

    /// Begin a fetch cycle for `url`.
    ///
    /// Returns `false` without doing anything if a cycle is already in
    /// flight (single-flight). Otherwise transitions to
    /// [`LoaderPhase::Loading`], schedules fetch + decode on a background
    /// task, and returns `true`. The outcome -- success or typed failure --
    /// reaches the attached consumer through exactly one `on_result` call,
    /// unless a reset intervenes first.
    pub fn start(&self, url: &str) -> bool {
        let mut inner = self.lock();
        if inner.phase == LoaderPhase::Loading {
            debug!(cycle = inner.cycle, "load already in flight, ignoring start");
            return false;
        }

        inner.cycle = inner.cycle.wrapping_add(1);
        inner.phase = LoaderPhase::Loading;
        let token = inner.cycle;
        drop(inner);

        info!(token, source = self.source.name(), "feed cycle started");

        let source = Arc::clone(&self.source);
        let state = Arc::clone(&self.inner);
        let url = url.to_owned();
        tokio::spawn(async move {
            let outcome = source.load(&url).await;
            deliver(&state, token, outcome);
        });
        true
    }

    /// Reset to [`LoaderPhase::Idle`].
    ///
    /// Bumps the cycle token so an in-flight cycle, if any, is discarded
    /// silently at delivery time; clears the cached outcome; and tells the
    /// attached consumer to clear its displayed data via `on_reset`.
    pub fn reset(&self) {
        let mut inner = self.lock();
        let cancelled = inner.phase == LoaderPhase::Loading;
        inner.cycle = inner.cycle.wrapping_add(1);
        inner.phase = LoaderPhase::Idle;
        inner.last_delivered = None;
        debug!(cycle = inner.cycle, cancelled, "loader reset");
        if let Some(consumer) = &inner.consumer {
            consumer.on_reset();
        }
    }

    /// Attach a consumer, replacing any previous one.
    ///
    /// If a delivered outcome is cached, it is replayed to the new
    /// consumer immediately -- a consumer that detached across a delivery
    /// catches up without a re-fetch.
    pub fn attach(&self, consumer: Arc<dyn crate::FeedConsumer>) {
        let mut inner = self.lock();
        if let Some(outcome) = &inner.last_delivered {
            debug!("replaying cached outcome to attaching consumer");
            consumer.on_result(outcome);
        }
        inner.consumer = Some(consumer);
    }

    /// Detach the current consumer. An in-flight cycle keeps running; its
    /// outcome is cached for whoever attaches next.
    pub fn detach(&self) {
        self.lock().consumer = None;
    }

    /// Current phase, for observability and tests.
    pub fn phase(&self) -> LoaderPhase {
        self.lock().phase
    }

    /// The cached outcome of the last delivered cycle, if any.
    pub fn last_delivered(&self) -> Option<Arc<FeedOutcome>> {
        self.lock().last_delivered.clone()
    }

    /// Lock the state, recovering the guard from a poisoned mutex.
    ///
    /// Consumer callbacks run under this lock; a panic in one must not
    /// wedge the loader forever.
    fn lock(&self) -> MutexGuard<'_, LoaderInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Complete a cycle: transition, cache, and notify -- or discard if stale.
///
/// Runs on the spawned task. The token check and the phase transition
/// happen under the same lock acquisition, so a reset that lands before
/// this point wins and the outcome is dropped without any callback.
fn deliver(state: &Mutex<LoaderInner>, token: u64, outcome: FeedOutcome) {
    let mut inner = state.lock().unwrap_or_else(PoisonError::into_inner);
    if inner.cycle != token || inner.phase != LoaderPhase::Loading {
        debug!(token, current_cycle = inner.cycle, "stale delivery discarded");
        return;
    }

    inner.phase = LoaderPhase::Delivered;
    let outcome = Arc::new(outcome);
    inner.last_delivered = Some(Arc::clone(&outcome));

    match outcome.as_ref() {
        Ok(events) => info!(token, events = events.len(), "feed cycle delivered"),
        Err(error) => warn!(token, error = %error, "feed cycle delivered with failure"),
    }

    if let Some(consumer) = &inner.consumer {
        consumer.on_result(&outcome);
    }
}
