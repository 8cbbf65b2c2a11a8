//! The geographic point record and its text conversions.
//!
//! [`GeoPoint`] is the value every geo URI parses into and renders from.
//! Coordinates use the [`NO_LAT_LON`] sentinel for "unset" (kept distinct
//! from NaN); every other field is an `Option`.
//!
//! # Example
//!
//! ```
//! use geouri::point::{GeoPoint, format_lat_lon};
//!
//! let mut point = GeoPoint::new(53.0, 10.5);
//! point.set_name(Some("Hamburg".to_string()));
//!
//! assert!(!point.is_empty());
//! assert_eq!(point.to_string(), "Hamburg");
//! assert_eq!(format_lat_lon(point.latitude), "53");
//! ```

pub mod format;
mod model;

pub use format::{format_date, format_lat_lon, parse_date, parse_lat_or_lon, parse_zoom};
pub use model::{is_empty, GeoPoint, NO_LAT_LON};
