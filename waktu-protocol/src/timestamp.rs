//! Conversion of wire datetimes into UTC civil datetimes.
//!
//! Clients send ISO-8601 date-times carrying an explicit offset or a `Z`
//! designator. Storage keeps the equivalent UTC reading without an offset,
//! so `2020-10-21T06:07:07+07:00` and `2020-10-20T23:07:07Z` become the same
//! stored value.

use std::sync::OnceLock;

use chrono::{DateTime, FixedOffset, NaiveDateTime, SecondsFormat, TimeZone, Timelike, Utc};
use regex::Regex;
use thiserror::Error;

/// Name of the record field carrying the datetime.
pub const WHEN_FIELD: &str = "when";

// Extended ISO-8601 date-time with a mandatory offset. Seconds and the
// fraction are optional; every numeric field is fixed width.
const ISO_OFFSET_DATETIME: &str = concat!(
    r"^[0-9]{4}-[0-9]{2}-[0-9]{2}[Tt][0-9]{2}:[0-9]{2}",
    r"(?::[0-9]{2}(?:\.[0-9]{1,9})?)?",
    r"(?:[Zz]|[+-][0-9]{2}:[0-9]{2})$",
);

// RFC 3339 requires seconds, ISO-8601 does not.
const MINUTE_PRECISION: &str = "%Y-%m-%dT%H:%M%:z";

const MAX_OFFSET_SECONDS: i32 = 18 * 3600;

fn iso_shape() -> &'static Regex {
    static SHAPE: OnceLock<Regex> = OnceLock::new();
    SHAPE.get_or_init(|| {
        Regex::new(ISO_OFFSET_DATETIME).expect("ISO date-time pattern compiles")
    })
}

/// Raised when a non-empty datetime string cannot be read as an
/// offset-aware ISO-8601 date-time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("field `{field}` is not an ISO-8601 date-time with offset: {raw:?}")]
pub struct NormalizationError {
    pub field: &'static str,
    pub raw: String,
}

/// Normalizes a wire datetime into the UTC civil datetime used for storage.
///
/// An empty string yields `Ok(None)`.
pub fn normalize_when(raw: &str) -> Result<Option<NaiveDateTime>, NormalizationError> {
    if raw.is_empty() {
        return Ok(None);
    }

    let parsed = parse_offset_datetime(raw).ok_or_else(|| NormalizationError {
        field: WHEN_FIELD,
        raw: raw.to_string(),
    })?;

    Ok(Some(parsed.with_timezone(&Utc).naive_utc()))
}

/// Renders a stored civil datetime back as a `Z`-qualified RFC 3339 string.
pub fn format_when(value: &NaiveDateTime) -> String {
    Utc.from_utc_datetime(value)
        .to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

fn parse_offset_datetime(raw: &str) -> Option<DateTime<FixedOffset>> {
    if !iso_shape().is_match(raw) {
        return None;
    }

    // Only `T`/`Z` letters survive the shape check.
    let canonical = raw.to_ascii_uppercase();
    let parsed = match DateTime::parse_from_rfc3339(&canonical) {
        Ok(parsed) => parsed,
        Err(_) => {
            let candidate = match canonical.strip_suffix('Z') {
                Some(stem) => format!("{stem}+00:00"),
                None => canonical,
            };
            DateTime::parse_from_str(&candidate, MINUTE_PRECISION).ok()?
        }
    };

    // Leap seconds surface as nanosecond >= 1e9.
    if parsed.nanosecond() >= 1_000_000_000 {
        return None;
    }
    if parsed.offset().local_minus_utc().abs() > MAX_OFFSET_SECONDS {
        return None;
    }

    Some(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn civil(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .and_then(|date| date.and_hms_opt(h, mi, s))
            .expect("valid civil datetime")
    }

    #[test]
    fn offset_and_zulu_forms_agree() {
        let shifted = normalize_when("2020-10-21T06:07:07+07:00").unwrap();
        let zulu = normalize_when("2020-10-20T23:07:07Z").unwrap();

        assert_eq!(shifted, zulu);
        assert_eq!(shifted, Some(civil(2020, 10, 20, 23, 7, 7)));
    }

    #[test]
    fn zulu_is_kept_as_is() {
        assert_eq!(
            normalize_when("2020-10-21T08:07:07Z").unwrap(),
            Some(civil(2020, 10, 21, 8, 7, 7))
        );
    }

    #[test]
    fn negative_offsets_roll_forward() {
        assert_eq!(
            normalize_when("2020-12-31T22:30:00-03:30").unwrap(),
            Some(civil(2021, 1, 1, 2, 0, 0))
        );
    }

    #[test]
    fn fractional_seconds_survive() {
        let value = normalize_when("2020-10-21T06:07:07.250+07:00")
            .unwrap()
            .expect("value");
        assert_eq!(value.nanosecond(), 250_000_000);
    }

    #[test]
    fn minute_precision_is_accepted() {
        assert_eq!(
            normalize_when("2020-10-21T06:07+07:00").unwrap(),
            Some(civil(2020, 10, 20, 23, 7, 0))
        );
        assert_eq!(
            normalize_when("2020-10-21T06:07Z").unwrap(),
            Some(civil(2020, 10, 21, 6, 7, 0))
        );
    }

    #[test]
    fn lowercase_designators_and_extreme_offsets_are_accepted() {
        assert_eq!(
            normalize_when("2020-10-21t08:07:07z").unwrap(),
            Some(civil(2020, 10, 21, 8, 7, 7))
        );
        assert_eq!(
            normalize_when("2020-10-21t08:07z").unwrap(),
            Some(civil(2020, 10, 21, 8, 7, 0))
        );
        assert_eq!(
            normalize_when("2020-10-21T18:00:00+18:00").unwrap(),
            Some(civil(2020, 10, 21, 0, 0, 0))
        );
    }

    #[test]
    fn empty_string_is_no_value() {
        assert_eq!(normalize_when(""), Ok(None));
    }

    #[test]
    fn missing_offset_is_rejected() {
        let err = normalize_when("2020-10-21T06:07:07").unwrap_err();
        assert_eq!(err.field, "when");
        assert_eq!(err.raw, "2020-10-21T06:07:07");
    }

    #[test]
    fn malformed_inputs_are_rejected() {
        for raw in [
            "   ",
            "yesterday",
            "2020-10-21",
            "2020-13-01T00:00:00Z",
            "2020-02-30T00:00:00Z",
            "2020-10-21T25:00:00+07:00",
            "2020-10-21T06:07",
            "2020-10-21T6:7+07:00",
            "2020-1-2T06:07+07:00",
            "2020-10-21T06:07+0700",
            "2020-10-21T06:07 +07:00",
            "2020-10-21T06:07:60+07:00",
            "2020-10-21T23:59:60Z",
            "2020-10-21 06:07:07+07:00",
            "2020-10-21T06:07:07+23:30",
            "2020-10-21T06:07:07+07:75",
            "2020-10-21T06:07:07.+07:00",
            " 2020-10-21T06:07:07Z",
            "2020-10-21T06:07:07Z ",
            "２０２０-10-21T06:07:07Z",
        ] {
            assert!(normalize_when(raw).is_err(), "{raw:?} should not normalize");
        }
    }

    #[test]
    fn zulu_round_trip_is_a_fixed_point() {
        let first = normalize_when("2020-10-20T23:07:07Z").unwrap().expect("value");
        let rendered = format_when(&first);
        assert_eq!(rendered, "2020-10-20T23:07:07Z");

        let second = normalize_when(&rendered).unwrap().expect("value");
        assert_eq!(first, second);
        assert_eq!(format_when(&second), rendered);
    }
}
