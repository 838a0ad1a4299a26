//! Tolerant decoding of the feed's feature collection.
//!
//! The body is expected to be a `GeoJSON`-style root object carrying a
//! `features` array; each feature carries a `properties` object with the
//! fields the pipeline cares about (`mag`, `place`, `time`, `url`).
//! Everything else (`id`, `geometry`, ...) is ignored.
//!
//! Malformation is handled at two levels. A root that is not a feature
//! collection at all fails the decode with [`DecodeError::MalformedRoot`]
//! and produces no records. A single bad feature never fails the cycle: it
//! is skipped with a warn-level diagnostic so silent data loss stays
//! observable. A `null` or absent magnitude is *not* malformation -- the
//! record is kept with its magnitude marked unknown.
//!
//! Output order is source order; the upstream `orderby=time` request
//! parameter governs ordering, not the decoder.

use quakewatch_types::SeismicEvent;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::DecodeError;

/// Wire shape of a feature's `properties` object.
///
/// Every field is optional at this stage; mandatory-field policy is applied
/// when converting to a [`SeismicEvent`], not during deserialization.
#[derive(Debug, Deserialize)]
struct RawProperties {
    #[serde(default)]
    mag: Option<f64>,
    #[serde(default)]
    place: Option<String>,
    #[serde(default)]
    time: Option<i64>,
    #[serde(default)]
    url: Option<String>,
}

/// Wire shape of one entry in the `features` array.
#[derive(Debug, Deserialize)]
struct RawFeature {
    #[serde(default)]
    properties: Option<RawProperties>,
}

/// Why a feature was dropped instead of decoded.
#[derive(Debug, thiserror::Error)]
enum FeatureSkip {
    /// The feature does not deserialize against the expected schema.
    #[error("feature does not match the schema: {0}")]
    Shape(String),

    /// The feature has no `properties` object.
    #[error("missing properties object")]
    MissingProperties,

    /// The mandatory `time` field is absent.
    #[error("missing mandatory time")]
    MissingTime,

    /// The mandatory `url` field is absent.
    #[error("missing mandatory url")]
    MissingUrl,

    /// The `place` field is absent or empty; there is nothing to display.
    #[error("missing place")]
    MissingPlace,
}

/// Decode a raw feed body into an ordered sequence of events.
///
/// # Errors
///
/// Returns [`DecodeError::MalformedRoot`] when the body is not valid JSON
/// or the root lacks a `features` array. Per-feature problems never error;
/// they drop the feature with a `warn!` diagnostic. Zero surviving features
/// is a successful empty result.
pub fn decode_feed(raw: &str) -> Result<Vec<SeismicEvent>, DecodeError> {
    let root: serde_json::Value = serde_json::from_str(raw)
        .map_err(|e| DecodeError::MalformedRoot(format!("invalid JSON: {e}")))?;

    let Some(features) = root.get("features").and_then(serde_json::Value::as_array) else {
        return Err(DecodeError::MalformedRoot(
            "root is not an object with a features array".to_owned(),
        ));
    };

    let mut events = Vec::with_capacity(features.len());
    for (index, feature) in features.iter().enumerate() {
        match decode_feature(feature) {
            Ok(event) => events.push(event),
            Err(skip) => {
                warn!(feature_index = index, reason = %skip, "skipping malformed feature");
            }
        }
    }

    debug!(
        received = features.len(),
        decoded = events.len(),
        "feature collection decoded"
    );
    Ok(events)
}

/// Convert one raw feature into a fully constructed event, or say why not.
///
/// A [`SeismicEvent`] is all-or-nothing: no partially filled record ever
/// leaves this function.
fn decode_feature(feature: &serde_json::Value) -> Result<SeismicEvent, FeatureSkip> {
    let raw: RawFeature =
        serde_json::from_value(feature.clone()).map_err(|e| FeatureSkip::Shape(e.to_string()))?;

    let properties = raw.properties.ok_or(FeatureSkip::MissingProperties)?;
    let timestamp_millis = properties.time.ok_or(FeatureSkip::MissingTime)?;
    let detail_link = properties.url.ok_or(FeatureSkip::MissingUrl)?;
    let location = match properties.place {
        Some(place) if !place.is_empty() => place,
        _ => return Err(FeatureSkip::MissingPlace),
    };

    Ok(SeismicEvent {
        magnitude: properties.mag,
        location,
        timestamp_millis,
        detail_link,
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    const WELL_FORMED: &str = r#"{
        "type": "FeatureCollection",
        "metadata": {"generated": 1454124312220, "count": 3},
        "features": [
            {
                "type": "Feature",
                "id": "us10004u1y",
                "geometry": {"type": "Point", "coordinates": [126.5, 8.9, 10.0]},
                "properties": {
                    "mag": 6.3,
                    "place": "5km SW of Example Town",
                    "time": 1454124312220,
                    "url": "https://example.org/event/a"
                }
            },
            {
                "type": "Feature",
                "properties": {
                    "mag": null,
                    "place": "Example Town",
                    "time": 1454124312221,
                    "url": "https://example.org/event/b"
                }
            },
            {
                "type": "Feature",
                "properties": {
                    "mag": 4.1,
                    "place": "Gulf of Alaska",
                    "time": 1454124312222,
                    "url": "https://example.org/event/c"
                }
            }
        ]
    }"#;

    #[test]
    fn decodes_all_valid_features_in_source_order() {
        let events = decode_feed(WELL_FORMED).unwrap();
        assert_eq!(events.len(), 3);

        let first = events.first().unwrap();
        assert_eq!(first.magnitude, Some(6.3));
        assert_eq!(first.location, "5km SW of Example Town");
        assert_eq!(first.timestamp_millis, 1_454_124_312_220);
        assert_eq!(first.detail_link, "https://example.org/event/a");

        let order: Vec<i64> = events.iter().map(|e| e.timestamp_millis).collect();
        assert_eq!(order, vec![1_454_124_312_220, 1_454_124_312_221, 1_454_124_312_222]);
    }

    #[test]
    fn null_magnitude_is_unknown_not_zero() {
        let events = decode_feed(WELL_FORMED).unwrap();
        let unknown = events.get(1).unwrap();
        assert_eq!(unknown.magnitude, None);
        assert_eq!(unknown.location, "Example Town");
    }

    #[test]
    fn features_missing_time_or_url_are_dropped() {
        let raw = r#"{
            "features": [
                {"properties": {"mag": 5.0, "place": "A", "url": "https://example.org/a"}},
                {"properties": {"mag": 5.0, "place": "B", "time": 1}},
                {"properties": {"mag": 5.0, "place": "C", "time": 2, "url": "https://example.org/c"}}
            ]
        }"#;

        let events = decode_feed(raw).unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events.first().unwrap().location, "C");
    }

    #[test]
    fn features_without_place_are_dropped() {
        let raw = r#"{
            "features": [
                {"properties": {"mag": 5.0, "time": 1, "url": "https://example.org/a"}},
                {"properties": {"mag": 5.0, "place": "", "time": 2, "url": "https://example.org/b"}}
            ]
        }"#;

        let events = decode_feed(raw).unwrap();
        assert!(events.is_empty());
    }

    #[test]
    fn feature_with_unexpected_shape_is_dropped_not_fatal() {
        let raw = r#"{
            "features": [
                "not a feature",
                {"properties": {"mag": "loud", "place": "A", "time": 1, "url": "https://example.org/a"}},
                {"properties": {"mag": 5.0, "place": "B", "time": 2, "url": "https://example.org/b"}}
            ]
        }"#;

        let events = decode_feed(raw).unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events.first().unwrap().location, "B");
    }

    #[test]
    fn invalid_json_is_malformed_root() {
        let err = decode_feed("not json at all").unwrap_err();
        assert!(matches!(err, DecodeError::MalformedRoot(_)));
    }

    #[test]
    fn non_object_root_is_malformed_root() {
        let err = decode_feed("[1, 2, 3]").unwrap_err();
        assert!(matches!(err, DecodeError::MalformedRoot(_)));
    }

    #[test]
    fn missing_features_array_is_malformed_root() {
        let err = decode_feed(r#"{"type": "FeatureCollection"}"#).unwrap_err();
        assert!(matches!(err, DecodeError::MalformedRoot(_)));
    }

    #[test]
    fn empty_collection_is_successful_and_empty() {
        let events = decode_feed(r#"{"features": []}"#).unwrap();
        assert!(events.is_empty());
    }
}
