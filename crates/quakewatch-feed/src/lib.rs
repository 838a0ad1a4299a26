//! Fetch and decode for the Quakewatch seismic feed.
//!
//! The feed pipeline has two halves with a narrow seam between them:
//!
//! ```text
//! query URL --> Fetcher (HTTP GET) --> raw body --> Decoder --> Vec<SeismicEvent>
//! ```
//!
//! The fetcher knows nothing about JSON and the decoder knows nothing about
//! HTTP. [`source::FeedSource`] composes the two behind one `load` call so
//! the loader crate can run a whole cycle without caring which half failed;
//! the typed [`error::FeedError`] preserves that distinction for consumers.
//!
//! # Modules
//!
//! - [`config`] -- environment-driven feed configuration
//! - [`query`] -- request URL construction for the upstream event service
//! - [`fetch`] -- HTTP GET with a bounded timeout
//! - [`decode`] -- tolerant GeoJSON feature-collection decoding
//! - [`source`] -- enum dispatch over HTTP and scripted sources
//! - [`error`] -- the fetch/decode error taxonomy

pub mod config;
pub mod decode;
pub mod error;
pub mod fetch;
pub mod query;
pub mod source;

pub use config::FeedConfig;
pub use decode::decode_feed;
pub use error::{DecodeError, FeedError, FeedOutcome, FetchError};
pub use fetch::Fetcher;
pub use query::FeedQuery;
pub use source::{FeedSource, ScriptedFeedSource};
