//! The consumer side of the loader contract.

use quakewatch_feed::FeedOutcome;

/// Callback interface the presentation layer registers with a loader.
///
/// Callbacks are invoked with the loader's internal state lock held, which
/// makes delivery, reset, and attach mutually atomic: a consumer can never
/// observe `on_result` for a cycle that was cancelled, nor two overlapping
/// deliveries. The price is a reentrancy rule -- implementations must not
/// call back into the loader from inside a callback.
///
/// Thread-safe UI updates, empty-state messaging, and navigation via the
/// event's detail link are the implementor's concern; the loader only
/// reports outcomes.
pub trait FeedConsumer: Send + Sync {
    /// One cycle finished: either an ordered event sequence (possibly
    /// empty) or the typed failure that ended the cycle.
    fn on_result(&self, outcome: &FeedOutcome);

    /// The loader was reset; any previously displayed data is stale and
    /// should be cleared.
    fn on_reset(&self);
}
