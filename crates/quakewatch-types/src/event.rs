//! The decoded seismic event record.
//!
//! One [`SeismicEvent`] corresponds to one feature in the source's event
//! collection. Records are fully constructed by the decoder or not
//! constructed at all -- a feature missing a mandatory field is dropped,
//! never defaulted. Once constructed, records are immutable; a new fetch
//! cycle replaces the previous set wholesale.

use serde::{Deserialize, Serialize};

/// A single decoded seismic event.
///
/// Magnitude is optional because the source reports some events with a
/// `null` magnitude. "Unknown" is represented as [`None`] so it can never
/// be confused with a real zero-magnitude event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeismicEvent {
    /// Event magnitude, or [`None`] when the source reports it as unknown.
    pub magnitude: Option<f64>,

    /// Descriptive location string exactly as supplied by the source.
    ///
    /// May or may not carry a directional-offset prefix such as
    /// `"5km SW of"`; splitting that prefix off is a display concern.
    pub location: String,

    /// Event time in milliseconds since the Unix epoch. Always present.
    pub timestamp_millis: i64,

    /// URL of the source's event detail page. Treated as an opaque
    /// external reference -- the pipeline never parses it.
    pub detail_link: String,
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn unknown_magnitude_serializes_as_null() {
        let event = SeismicEvent {
            magnitude: None,
            location: "Example Town".to_owned(),
            timestamp_millis: 1_454_124_312_220,
            detail_link: "https://example.org/event/1".to_owned(),
        };

        let json = serde_json::to_value(&event).unwrap();
        assert!(json.get("magnitude").unwrap().is_null());
    }

    #[test]
    fn round_trips_through_json() {
        let event = SeismicEvent {
            magnitude: Some(6.3),
            location: "5km SW of Example Town".to_owned(),
            timestamp_millis: 1_454_124_312_220,
            detail_link: "https://example.org/event/2".to_owned(),
        };

        let json = serde_json::to_string(&event).unwrap();
        let back: SeismicEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }
}
