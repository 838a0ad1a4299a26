//! Shared domain types for the Quakewatch seismic feed pipeline.
//!
//! This crate is the single source of truth for the record type that flows
//! through the pipeline: the feed crate produces [`SeismicEvent`] values,
//! the loader delivers them, and the display crate derives presentation
//! fields from them.

pub mod event;

pub use event::SeismicEvent;
