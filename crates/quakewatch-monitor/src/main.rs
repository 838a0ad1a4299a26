//! Feed monitor binary for the Quakewatch pipeline.
//!
//! Plays the role of the application container and presentation layer in
//! one thin process: it loads configuration from the environment, renders
//! the feed query, runs a single loader cycle, and logs one derived
//! display row per event.
//!
//! ```text
//! env config --> query URL --> FeedLoader --> consumer --> display rows
//! ```
//!
//! # Startup Sequence
//!
//! 1. Initialize structured logging (tracing)
//! 2. Load feed configuration from environment variables
//! 3. Render the request URL
//! 4. Build the loader over an HTTP feed source and attach the consumer
//! 5. Start one cycle and wait for its delivery

use std::sync::Arc;

use quakewatch_display::DerivedDisplay;
use quakewatch_feed::{FeedConfig, FeedOutcome, FeedQuery, FeedSource, Fetcher};
use quakewatch_loader::{FeedConsumer, FeedLoader};
use tokio::sync::mpsc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Consumer that logs derived rows and signals the main task when a
/// cycle's outcome has arrived.
struct ReportingConsumer {
    done: mpsc::UnboundedSender<()>,
}

impl FeedConsumer for ReportingConsumer {
    fn on_result(&self, outcome: &FeedOutcome) {
        match outcome {
            Ok(events) if events.is_empty() => info!("feed returned no events"),
            Ok(events) => {
                for event in events {
                    let row = DerivedDisplay::from_event(event);
                    info!(
                        magnitude = row.magnitude_text,
                        bucket = row.color_bucket,
                        offset = row.offset_text,
                        location = row.primary_location_text,
                        date = row.date_text,
                        time = row.time_text,
                        link = event.detail_link,
                        "event"
                    );
                }
            }
            Err(error) => warn!(error = %error, "feed cycle failed"),
        }
        let _ = self.done.send(());
    }

    fn on_reset(&self) {
        info!("loader reset, displayed data cleared");
    }
}

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration cannot be parsed from the
/// environment. Feed failures are not process failures -- they are logged
/// through the consumer like any other outcome.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("quakewatch-monitor starting");

    // 2. Load configuration.
    let config = FeedConfig::from_env()?;
    info!(
        base_url = config.base_url,
        limit = config.limit,
        min_magnitude = config.min_magnitude,
        fetch_timeout_ms = config.fetch_timeout.as_millis(),
        "configuration loaded"
    );

    // 3. Render the request URL.
    let url = FeedQuery::from_config(&config).render();
    info!(url, "feed query rendered");

    // 4. Build the loader and attach the reporting consumer.
    let fetcher = Fetcher::new(config.fetch_timeout);
    let loader = FeedLoader::new(Arc::new(FeedSource::http(fetcher)));

    let (done_tx, mut done_rx) = mpsc::unbounded_channel();
    loader.attach(Arc::new(ReportingConsumer { done: done_tx }));

    // 5. Run one cycle and wait for its delivery.
    loader.start(&url);
    let _ = done_rx.recv().await;

    info!("cycle complete, shutting down");
    Ok(())
}
