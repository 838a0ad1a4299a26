//! Single-flight asynchronous loader for the Quakewatch feed pipeline.
//!
//! The loader owns the execution contract between the feed pipeline and a
//! consumer (the presentation layer): it runs fetch + decode off the
//! caller's thread, delivers exactly one outcome per cycle, discards
//! results that a reset has made stale, and replays the last delivered
//! outcome to a consumer that attaches late.
//!
//! # Modules
//!
//! - [`consumer`] -- the callback interface a consumer implements
//! - [`loader`] -- the [`loader::FeedLoader`] state machine

pub mod consumer;
pub mod loader;

pub use consumer::FeedConsumer;
pub use loader::{FeedLoader, LoaderPhase};
