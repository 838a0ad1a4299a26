//! Feed source dispatch.
//!
//! Uses enum dispatch instead of trait objects because async methods are
//! not dyn-compatible in Rust. The loader only ever sees `load`; whether a
//! cycle hits the network or replays a canned outcome is the caller's
//! wiring decision.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use tracing::debug;

use crate::decode::decode_feed;
use crate::error::FeedOutcome;
use crate::fetch::Fetcher;

/// A source that can run one complete feed cycle for a URL.
pub enum FeedSource {
    /// Fetch over HTTP, then decode the body.
    Http(HttpFeedSource),
    /// Serve a canned outcome after an optional delay. Deterministic;
    /// used by loader tests and offline runs.
    Scripted(ScriptedFeedSource),
}

impl FeedSource {
    /// Create an HTTP-backed source from a fetcher.
    pub const fn http(fetcher: Fetcher) -> Self {
        Self::Http(HttpFeedSource { fetcher })
    }

    /// Create a scripted source serving `outcome` after `delay`.
    pub const fn scripted(outcome: FeedOutcome, delay: Duration) -> Self {
        Self::Scripted(ScriptedFeedSource {
            outcome,
            delay,
            loads: AtomicUsize::new(0),
        })
    }

    /// Run one cycle: produce the ordered event sequence or a typed failure.
    ///
    /// Dispatches to the concrete source implementation.
    pub async fn load(&self, url: &str) -> FeedOutcome {
        match self {
            Self::Http(source) => source.load(url).await,
            Self::Scripted(source) => source.load().await,
        }
    }

    /// Human-readable name for logging.
    pub const fn name(&self) -> &str {
        match self {
            Self::Http(_) => "http",
            Self::Scripted(_) => "scripted",
        }
    }
}

/// The production source: HTTP fetch followed by decode.
pub struct HttpFeedSource {
    fetcher: Fetcher,
}

impl HttpFeedSource {
    /// Fetch the body and decode it into events.
    async fn load(&self, url: &str) -> FeedOutcome {
        let raw = self.fetcher.fetch(url).await?;
        let events = decode_feed(&raw)?;
        Ok(events)
    }
}

/// A deterministic in-memory source.
///
/// Serves a fixed outcome after an optional delay and records how many
/// loads were issued, which makes single-flight and cancellation behavior
/// directly observable in tests.
pub struct ScriptedFeedSource {
    outcome: FeedOutcome,
    delay: Duration,
    loads: AtomicUsize,
}

impl ScriptedFeedSource {
    /// Serve the canned outcome, counting the load before any delay.
    async fn load(&self) -> FeedOutcome {
        let issued = self.loads.fetch_add(1, Ordering::SeqCst);
        debug!(load_number = issued, delay_ms = self.delay.as_millis(), "scripted load");
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.outcome.clone()
    }

    /// Number of loads issued so far.
    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }
}
