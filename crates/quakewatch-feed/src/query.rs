//! Request URL construction for the upstream event service.
//!
//! The fetcher treats URLs as opaque strings; this module is where the
//! query parameters actually come from. The service expects
//! `format=geojson` plus a result limit, a minimum magnitude, and a sort
//! order. `orderby=time` is fixed: the feed's ordering guarantee comes from
//! the request, not from any resorting in the decoder.

use crate::config::FeedConfig;

/// A fully parameterized feed query, ready to render as a URL.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedQuery {
    /// Base endpoint, without query parameters.
    pub base_url: String,
    /// Maximum number of events to return.
    pub limit: u32,
    /// Minimum magnitude filter.
    pub min_magnitude: f64,
}

impl FeedQuery {
    /// Build a query from feed configuration.
    pub fn from_config(config: &FeedConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            limit: config.limit,
            min_magnitude: config.min_magnitude,
        }
    }

    /// Render the query as a complete request URL.
    ///
    /// Parameter order matches the original request contract:
    /// `format`, `limit`, `minmag`, `orderby`.
    pub fn render(&self) -> String {
        format!(
            "{}?format=geojson&limit={}&minmag={}&orderby=time",
            self.base_url, self.limit, self.min_magnitude
        )
    }
}
