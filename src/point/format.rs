//! Text conversions for the numeric and temporal fields of a [`GeoPoint`](super::GeoPoint).
//!
//! Timestamps are handled by `chrono`; this module only pins down the
//! ISO-8601 flavour geo URIs use (UTC with a `Z` suffix).

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};

use crate::error::GeoUriError;

/// Formats a latitude or longitude as compact fixed-notation decimal text.
///
/// Uses the shortest representation that parses back to the same value and
/// never switches to exponential notation, so `53.0` becomes `"53"` and
/// `1e-7` becomes `"0.0000001"`. Callers must not pass the unset sentinel.
pub fn format_lat_lon(value: f64) -> String {
    format!("{}", value)
}

/// Parses a signed decimal latitude or longitude.
///
/// Accepts an optional `+`/`-`, digits and at most one `.`; at least one
/// digit is required. Exponents, `inf` and `NaN` are rejected.
pub fn parse_lat_or_lon(text: &str) -> Result<f64, GeoUriError> {
    let invalid = || GeoUriError::InvalidNumber {
        text: text.to_string(),
    };

    let trimmed = text.trim();
    let unsigned = trimmed
        .strip_prefix('+')
        .or_else(|| trimmed.strip_prefix('-'))
        .unwrap_or(trimmed);

    let mut digits = 0usize;
    let mut dots = 0usize;
    for ch in unsigned.chars() {
        match ch {
            '0'..='9' => digits += 1,
            '.' => dots += 1,
            _ => return Err(invalid()),
        }
    }
    if digits == 0 || dots > 1 {
        return Err(invalid());
    }

    let magnitude = unsigned.parse::<f64>().map_err(|_| invalid())?;
    Ok(if trimmed.starts_with('-') {
        -magnitude
    } else {
        magnitude
    })
}

/// Parses a zoom level.
///
/// Absent or blank text means "no bound" and yields `Ok(None)`.
pub fn parse_zoom(text: Option<&str>) -> Result<Option<i32>, GeoUriError> {
    let Some(text) = text.map(str::trim).filter(|t| !t.is_empty()) else {
        return Ok(None);
    };
    text.parse::<i32>()
        .map(Some)
        .map_err(|_| GeoUriError::InvalidZoom {
            text: text.to_string(),
        })
}

/// Formats a zoom bound, or `None` when there is no bound.
pub fn format_zoom(zoom: Option<i32>) -> Option<String> {
    zoom.map(|z| z.to_string())
}

/// Formats a timestamp as ISO-8601 UTC with a `Z` suffix.
///
/// Fractional seconds are only written when non-zero:
/// `1991-03-03T04:05:06Z`, `1991-03-03T04:05:06.250Z`.
pub fn format_date(time: &DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// Parses an ISO-8601 timestamp.
///
/// Accepts a `Z` suffix, a numeric offset (`+01:00` or `+0100`) or no zone at
/// all (taken as UTC), each with optional fractional seconds.
pub fn parse_date(text: &str) -> Result<DateTime<Utc>, GeoUriError> {
    let text = text.trim();

    let rfc3339_err = match DateTime::parse_from_rfc3339(text) {
        Ok(dt) => return Ok(dt.with_timezone(&Utc)),
        Err(err) => err,
    };

    if let Ok(dt) = DateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f%z") {
        return Ok(dt.with_timezone(&Utc));
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(naive.and_utc());
    }

    Err(GeoUriError::InvalidDate {
        text: text.to_string(),
        source: rfc3339_err,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Timelike};

    #[test]
    fn format_lat_lon_is_compact() {
        assert_eq!(format_lat_lon(53.0), "53");
        assert_eq!(format_lat_lon(-56.7890123), "-56.7890123");
        assert_eq!(format_lat_lon(0.5), "0.5");
    }

    #[test]
    fn format_lat_lon_never_uses_exponent() {
        assert_eq!(format_lat_lon(1e-7), "0.0000001");
        assert!(!format_lat_lon(1.5e20).contains('e'));
    }

    #[test]
    fn parse_lat_or_lon_accepts_signed_decimals() {
        assert_eq!(parse_lat_or_lon("12.345").unwrap(), 12.345);
        assert_eq!(parse_lat_or_lon("-56.789").unwrap(), -56.789);
        assert_eq!(parse_lat_or_lon("+7").unwrap(), 7.0);
        assert_eq!(parse_lat_or_lon(".5").unwrap(), 0.5);
        assert_eq!(parse_lat_or_lon("-0").unwrap(), 0.0);
    }

    #[test]
    fn parse_lat_or_lon_rejects_garbage() {
        for bad in ["", "-", ".", "1.2.3", "abc", "1e5", "NaN", "inf", "1,2"] {
            let err = parse_lat_or_lon(bad).unwrap_err();
            assert!(
                matches!(err, GeoUriError::InvalidNumber { .. }),
                "expected InvalidNumber for {:?}",
                bad
            );
        }
    }

    #[test]
    fn formatted_values_parse_back_exactly() {
        for value in [0.1, -179.999999, 89.123456789012, 1e-7, 12.0] {
            assert_eq!(parse_lat_or_lon(&format_lat_lon(value)).unwrap(), value);
        }
    }

    #[test]
    fn parse_zoom_handles_absent_and_blank() {
        assert_eq!(parse_zoom(None).unwrap(), None);
        assert_eq!(parse_zoom(Some("")).unwrap(), None);
        assert_eq!(parse_zoom(Some("  ")).unwrap(), None);
        assert_eq!(parse_zoom(Some("12")).unwrap(), Some(12));
    }

    #[test]
    fn parse_zoom_rejects_malformed_text() {
        let err = parse_zoom(Some("12a")).unwrap_err();
        assert!(matches!(err, GeoUriError::InvalidZoom { .. }));
        assert_eq!(format_zoom(Some(3)).as_deref(), Some("3"));
        assert_eq!(format_zoom(None), None);
    }

    #[test]
    fn format_date_uses_z_suffix() {
        let time = Utc.with_ymd_and_hms(1991, 3, 3, 4, 5, 6).unwrap();
        assert_eq!(format_date(&time), "1991-03-03T04:05:06Z");

        let with_millis = time.with_nanosecond(250_000_000).unwrap();
        assert_eq!(format_date(&with_millis), "1991-03-03T04:05:06.250Z");
    }

    #[test]
    fn parse_date_accepts_common_iso_variants() {
        let expected = Utc.with_ymd_and_hms(1991, 3, 3, 4, 5, 6).unwrap();
        assert_eq!(parse_date("1991-03-03T04:05:06Z").unwrap(), expected);
        assert_eq!(parse_date("1991-03-03T05:05:06+01:00").unwrap(), expected);
        assert_eq!(parse_date("1991-03-03T05:05:06+0100").unwrap(), expected);
        assert_eq!(parse_date("1991-03-03T04:05:06").unwrap(), expected);

        let fractional = parse_date("1991-03-03T04:05:06.5Z").unwrap();
        assert_eq!(fractional.nanosecond(), 500_000_000);
    }

    #[test]
    fn parse_date_rejects_garbage() {
        let err = parse_date("yesterday").unwrap_err();
        assert!(matches!(err, GeoUriError::InvalidDate { .. }));
    }

    #[test]
    fn date_text_roundtrips() {
        for text in ["1991-03-03T04:05:06Z", "2024-12-31T23:59:59.125Z"] {
            assert_eq!(format_date(&parse_date(text).unwrap()), text);
        }
    }
}
