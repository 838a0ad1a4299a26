//! Error types for the feed pipeline.
//!
//! Uses `thiserror` for typed errors that surface through the whole fetch ->
//! decode -> deliver chain. Errors are cloneable so a delivered outcome can
//! be cached by the loader and replayed to a late-attaching consumer.

use quakewatch_types::SeismicEvent;

/// The outcome of one complete feed cycle, as delivered to a consumer.
///
/// `Ok` with an empty vector is a *successful* empty result; failures of any
/// kind arrive as the typed [`FeedError`]. That distinction is the whole
/// signal the presentation layer needs to choose between a "no results" and
/// a "no connection" state.
pub type FeedOutcome = Result<Vec<SeismicEvent>, FeedError>;

/// Errors from the HTTP fetch half of the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// The request could not be sent or the response body could not be
    /// read (DNS failure, connection refused, broken transfer, ...).
    #[error("network error: {0}")]
    Network(String),

    /// The request exceeded the configured deadline.
    #[error("request timed out")]
    Timeout,

    /// The server answered with a non-2xx status code.
    #[error("unexpected HTTP status {0}")]
    HttpStatus(u16),
}

/// Errors from the decode half of the pipeline.
///
/// Per-feature malformation is *not* an error -- bad features are skipped
/// with a diagnostic log. Only a root document that cannot be interpreted
/// as a feature collection at all fails the decode.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// The body is not valid JSON, or the root is not an object carrying a
    /// `features` array.
    #[error("malformed feed root: {0}")]
    MalformedRoot(String),
}

/// The single typed failure delivered to the loader's consumer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FeedError {
    /// The HTTP fetch failed; no body was decoded.
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),

    /// The body arrived but could not be decoded as a feature collection.
    #[error("decode failed: {0}")]
    Decode(#[from] DecodeError),
}
