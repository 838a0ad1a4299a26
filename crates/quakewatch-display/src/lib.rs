//! Pure presentation mapping for decoded seismic events.
//!
//! Everything here is a synchronous function of a [`SeismicEvent`]: no
//! I/O, no shared state, no caching. Derived values are computed per
//! record at render time and thrown away; if a rendering layer wants to
//! cache them, that is its business.
//!
//! The location split deliberately preserves a compatibility quirk: the
//! separator is the literal substring `"of"`, not a whitespace-delimited
//! token, so a place name that merely *contains* "of" splits too. See
//! [`split_location`].

use chrono::{DateTime, Utc};
use quakewatch_types::SeismicEvent;

/// Bucket assigned when the magnitude is unknown.
///
/// The original conflated unknown with zero, which rendered unknown events
/// as minor ones. Unknown instead shares the top bucket, the one already
/// defined as "10 and above or no matching floor".
pub const UNKNOWN_MAGNITUDE_BUCKET: u8 = 10;

/// The literal separator between a directional offset and the primary
/// location, e.g. `"5km SW of Example Town"`.
pub const LOCATION_SEPARATOR: &str = "of";

/// Offset text used when the location carries no separator.
pub const NEAR_THE: &str = "Near the ";

/// Placeholder rendered for an unknown magnitude.
pub const UNKNOWN_MAGNITUDE_TEXT: &str = "?";

// ---------------------------------------------------------------------------
// Individual mappings
// ---------------------------------------------------------------------------

/// Map a magnitude onto its color bucket (1 through 10).
///
/// Buckets follow the floor of the magnitude: 0 and 1 collapse into
/// bucket 1, 2 through 9 map one-to-one, and anything at 10 or above
/// lands in bucket 10. Sub-zero floors clamp up into bucket 1. An unknown
/// or non-finite magnitude gets [`UNKNOWN_MAGNITUDE_BUCKET`], never
/// bucket 1.
pub fn color_bucket(magnitude: Option<f64>) -> u8 {
    let Some(magnitude) = magnitude else {
        return UNKNOWN_MAGNITUDE_BUCKET;
    };
    if magnitude.is_nan() {
        return UNKNOWN_MAGNITUDE_BUCKET;
    }

    let floor = magnitude.floor().clamp(1.0, 10.0);
    // Clamped to 1.0..=10.0 above; the cast cannot truncate or wrap.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let bucket = floor as u8;
    bucket
}

/// Magnitude rendered with one decimal place, or the unknown placeholder.
pub fn magnitude_text(magnitude: Option<f64>) -> String {
    magnitude.map_or_else(|| UNKNOWN_MAGNITUDE_TEXT.to_owned(), |m| format!("{m:.1}"))
}

/// A location split into its offset and primary parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationText {
    /// The directional offset, e.g. `"5km SW of"`, or [`NEAR_THE`].
    pub offset_text: String,
    /// The remainder of the location string, verbatim.
    pub primary_text: String,
}

/// Split a raw location string into offset and primary parts.
///
/// Splits on the *first* occurrence of [`LOCATION_SEPARATOR`] (max two
/// parts): the left part with the separator re-appended becomes the
/// offset, the right part is kept verbatim -- leading whitespace included.
/// Without a separator the offset falls back to [`NEAR_THE`].
///
/// The match is a raw substring, so `"Gulf of Alaska"` splits as
/// `("Gulf of", " Alaska")` even though no offset is present. Known
/// false positive, preserved for compatibility with the source data's
/// established rendering.
pub fn split_location(raw: &str) -> LocationText {
    match raw.split_once(LOCATION_SEPARATOR) {
        Some((offset, primary)) => LocationText {
            offset_text: format!("{offset}{LOCATION_SEPARATOR}"),
            primary_text: primary.to_owned(),
        },
        None => LocationText {
            offset_text: NEAR_THE.to_owned(),
            primary_text: raw.to_owned(),
        },
    }
}

/// Format an epoch-millisecond timestamp as a date like `"Jan 02, 2006"`.
///
/// Always UTC and always English month abbreviations, so the output is
/// deterministic regardless of host locale. Out-of-range timestamps fall
/// back to the epoch rather than failing a render.
pub fn format_date(timestamp_millis: i64) -> String {
    utc(timestamp_millis).format("%b %d, %Y").to_string()
}

/// Format an epoch-millisecond timestamp as a time like `"3:04 PM"` (UTC).
pub fn format_time(timestamp_millis: i64) -> String {
    utc(timestamp_millis).format("%-I:%M %p").to_string()
}

/// Interpret epoch milliseconds as a UTC datetime.
fn utc(timestamp_millis: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(timestamp_millis).unwrap_or(DateTime::UNIX_EPOCH)
}

// ---------------------------------------------------------------------------
// Bundled view
// ---------------------------------------------------------------------------

/// All display fields derived from one event.
///
/// Transient by design: computed on demand, never cached by the core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedDisplay {
    /// Magnitude color bucket, 1 through 10.
    pub color_bucket: u8,
    /// Magnitude with one decimal place, or `"?"` when unknown.
    pub magnitude_text: String,
    /// Directional offset, e.g. `"5km SW of"` or `"Near the "`.
    pub offset_text: String,
    /// Primary location text.
    pub primary_location_text: String,
    /// Event date, e.g. `"Jan 02, 2006"`.
    pub date_text: String,
    /// Event time, e.g. `"3:04 PM"`.
    pub time_text: String,
}

impl DerivedDisplay {
    /// Derive every display field from an event.
    pub fn from_event(event: &SeismicEvent) -> Self {
        let location = split_location(&event.location);
        Self {
            color_bucket: color_bucket(event.magnitude),
            magnitude_text: magnitude_text(event.magnitude),
            offset_text: location.offset_text,
            primary_location_text: location.primary_text,
            date_text: format_date(event.timestamp_millis),
            time_text: format_time(event.timestamp_millis),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 2006-01-02 15:04:05 UTC
    const REFERENCE_MILLIS: i64 = 1_136_214_245_000;

    #[test]
    fn buckets_follow_the_magnitude_floor() {
        assert_eq!(color_bucket(Some(1.2)), 1);
        assert_eq!(color_bucket(Some(2.9)), 2);
        assert_eq!(color_bucket(Some(9.99)), 9);
        assert_eq!(color_bucket(Some(15.0)), 10);
    }

    #[test]
    fn sub_one_and_negative_magnitudes_collapse_into_bucket_one() {
        assert_eq!(color_bucket(Some(0.4)), 1);
        assert_eq!(color_bucket(Some(0.0)), 1);
        assert_eq!(color_bucket(Some(-0.5)), 1);
    }

    #[test]
    fn unknown_magnitude_gets_its_own_bucket_not_one() {
        assert_eq!(color_bucket(None), UNKNOWN_MAGNITUDE_BUCKET);
        assert_ne!(color_bucket(None), color_bucket(Some(0.4)));
        assert_eq!(color_bucket(Some(f64::NAN)), UNKNOWN_MAGNITUDE_BUCKET);
    }

    #[test]
    fn magnitude_text_has_one_decimal_or_placeholder() {
        assert_eq!(magnitude_text(Some(6.3)), "6.3");
        assert_eq!(magnitude_text(Some(7.0)), "7.0");
        assert_eq!(magnitude_text(Some(5.25)), "5.2");
        assert_eq!(magnitude_text(None), "?");
    }

    #[test]
    fn offset_location_splits_on_first_separator() {
        let parts = split_location("5km SW of Example Town");
        assert_eq!(parts.offset_text, "5km SW of");
        assert_eq!(parts.primary_text, " Example Town");
    }

    #[test]
    fn plain_location_falls_back_to_near_the() {
        let parts = split_location("Example Town");
        assert_eq!(parts.offset_text, "Near the ");
        assert_eq!(parts.primary_text, "Example Town");
    }

    #[test]
    fn substring_match_false_positive_is_preserved() {
        // "of" appears as a word inside the place name; the substring
        // split fires anyway. Pinned as the established behavior.
        let parts = split_location("Gulf of Alaska");
        assert_eq!(parts.offset_text, "Gulf of");
        assert_eq!(parts.primary_text, " Alaska");

        // It even fires inside a word.
        let parts = split_location("Sofia, Bulgaria");
        assert_eq!(parts.offset_text, "Sof");
        assert_eq!(parts.primary_text, "ia, Bulgaria");
    }

    #[test]
    fn date_and_time_are_derived_from_the_same_timestamp() {
        assert_eq!(format_date(REFERENCE_MILLIS), "Jan 02, 2006");
        assert_eq!(format_time(REFERENCE_MILLIS), "3:04 PM");
    }

    #[test]
    fn from_event_bundles_every_field() {
        let event = SeismicEvent {
            magnitude: Some(6.3),
            location: "5km SW of Example Town".to_owned(),
            timestamp_millis: REFERENCE_MILLIS,
            detail_link: "https://example.org/event/a".to_owned(),
        };

        let display = DerivedDisplay::from_event(&event);
        assert_eq!(display.color_bucket, 6);
        assert_eq!(display.magnitude_text, "6.3");
        assert_eq!(display.offset_text, "5km SW of");
        assert_eq!(display.primary_location_text, " Example Town");
        assert_eq!(display.date_text, "Jan 02, 2006");
        assert_eq!(display.time_text, "3:04 PM");
    }

    #[test]
    fn unknown_magnitude_event_renders_with_placeholder_and_top_bucket() {
        let event = SeismicEvent {
            magnitude: None,
            location: "Example Town".to_owned(),
            timestamp_millis: REFERENCE_MILLIS,
            detail_link: "https://example.org/event/b".to_owned(),
        };

        let display = DerivedDisplay::from_event(&event);
        assert_eq!(display.color_bucket, UNKNOWN_MAGNITUDE_BUCKET);
        assert_eq!(display.magnitude_text, "?");
        assert_eq!(display.offset_text, "Near the ");
    }
}
