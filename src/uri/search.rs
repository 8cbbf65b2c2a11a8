//! Priority-ordered pattern search over candidate texts.
//!
//! A geo URI can carry the same information in several places (`q`, the
//! path, `ll`, free-text description...). Every extractor walks the same
//! [`SearchLocations`] in order and takes the first match; later locations
//! are never consulted once something is found.

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::error::GeoUriError;
use crate::point::{parse_date, parse_lat_or_lon};

const DOUBLE: &str = r"([+\-]?[0-9.]+)";

/// `(name)`, optionally preceded by whitespace.
pub(crate) static NAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:\s*\(([^()]+)\))").expect("Invalid name regex"));

/// `lat,lon` with an optional ignored `,alt`.
pub(crate) static LAT_LON_ALT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    let comma_double = format!(r"(?:\s*,\s*{DOUBLE})");
    Regex::new(&format!("{DOUBLE}{comma_double}{comma_double}?"))
        .expect("Invalid lat/lon regex")
});

/// `lat,lon,lat,lon` of a `geoarea:` URI.
pub(crate) static LAT_LON_LAT_LON_PATTERN: Lazy<Regex> = Lazy::new(|| {
    let comma_double = format!(r"(?:\s*,\s*{DOUBLE})");
    Regex::new(&format!("{DOUBLE}{comma_double}{comma_double}{comma_double}"))
        .expect("Invalid area regex")
});

/// ISO-8601 date-time with optional fraction and zone.
pub(crate) static TIME_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"([12][0-9]{3}-[0-9]{2}-[0-9]{2}T[0-9]{2}:[0-9]{2}:[0-9]{2}(?:\.[0-9]+)?(?:Z|[+\-][0-9]{2}:?[0-9]{2})?)",
    )
    .expect("Invalid time regex")
});

/// `href='...'` or `href="..."`.
pub(crate) static HREF_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?:\s*href\s?=\s?['"]([^'"]*)['"])"#).expect("Invalid href regex")
});

/// `src='...'` or `src="..."`.
pub(crate) static SRC_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?:\s*src\s?=\s?['"]([^'"]*)['"])"#).expect("Invalid src regex")
});

/// Candidate texts, highest priority first.
#[derive(Debug, Default, Clone)]
pub struct SearchLocations<'a> {
    candidates: Vec<&'a str>,
}

impl<'a> SearchLocations<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a candidate; absent candidates are skipped.
    pub fn push(&mut self, candidate: Option<&'a str>) -> &mut Self {
        if let Some(candidate) = candidate {
            self.candidates.push(candidate);
        }
        self
    }

    pub fn extend<I>(&mut self, candidates: I) -> &mut Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        self.candidates.extend(candidates);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.candidates.iter().copied()
    }

    /// Captures of the first candidate that `pattern` matches.
    pub fn find(&self, pattern: &Regex) -> Option<Captures<'a>> {
        self.iter().find_map(|candidate| pattern.captures(candidate))
    }

    /// First capture group of the first match.
    pub fn find_group(&self, pattern: &Regex) -> Option<&'a str> {
        self.find(pattern)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }
}

impl<'a> FromIterator<&'a str> for SearchLocations<'a> {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        Self {
            candidates: iter.into_iter().collect(),
        }
    }
}

/// Returns true if a text field still needs a value.
#[inline]
pub fn is_unset(value: &Option<String>) -> bool {
    value.as_deref().is_none_or(str::is_empty)
}

/// Fills `current` with the first `pattern` match if it has no value yet.
pub fn fill_from_pattern(
    current: &mut Option<String>,
    pattern: &Regex,
    locations: &SearchLocations<'_>,
) {
    if !is_unset(current) {
        return;
    }
    if let Some(found) = locations.find_group(pattern) {
        *current = Some(found.to_string());
    }
}

/// Finds the first date-time, trying `explicit` before the pattern search.
///
/// Returns `None` when nothing was found, `Some(Err(_))` when the first
/// candidate found does not parse.
pub fn find_time(
    explicit: Option<&str>,
    locations: &SearchLocations<'_>,
) -> Option<Result<DateTime<Utc>, GeoUriError>> {
    if let Some(text) = explicit.filter(|t| !t.trim().is_empty()) {
        match parse_date(text) {
            Ok(time) => return Some(Ok(time)),
            Err(err) => tracing::warn!("ignoring explicit time: {}", err),
        }
    }
    locations.find_group(&TIME_PATTERN).map(parse_date)
}

/// Fills `current` with the first date-time found, if it has no value yet.
pub fn fill_time(
    current: &mut Option<DateTime<Utc>>,
    explicit: Option<&str>,
    locations: &SearchLocations<'_>,
) {
    if current.is_some() {
        return;
    }
    match find_time(explicit, locations) {
        Some(Ok(time)) => *current = Some(time),
        Some(Err(err)) => tracing::warn!("ignoring time of measurement: {}", err),
        None => {}
    }
}

/// Finds the first `lat,lon[,alt]` group across `locations`.
///
/// Only the first match is considered: if its numbers are malformed the
/// result is `Some(Err(_))` and no further location is tried.
pub fn find_lat_lon(
    locations: &SearchLocations<'_>,
) -> Option<Result<(f64, f64), GeoUriError>> {
    let caps = locations.find(&LAT_LON_ALT_PATTERN)?;
    Some(parse_lat_lon_groups(&caps))
}

fn parse_lat_lon_groups(caps: &Captures<'_>) -> Result<(f64, f64), GeoUriError> {
    Ok((parse_groups(caps, 1)?, parse_groups(caps, 2)?))
}

/// Parses the four numbers of a `geoarea:` URI, north-east first.
pub fn find_area(text: &str) -> Option<Result<[(f64, f64); 2], GeoUriError>> {
    let caps = LAT_LON_LAT_LON_PATTERN.captures(text)?;
    Some(parse_area_groups(&caps))
}

fn parse_area_groups(caps: &Captures<'_>) -> Result<[(f64, f64); 2], GeoUriError> {
    Ok([
        (parse_groups(caps, 1)?, parse_groups(caps, 2)?),
        (parse_groups(caps, 3)?, parse_groups(caps, 4)?),
    ])
}

fn parse_groups(caps: &Captures<'_>, group: usize) -> Result<f64, GeoUriError> {
    let text = caps.get(group).map_or("", |m| m.as_str());
    parse_lat_or_lon(text)
}
