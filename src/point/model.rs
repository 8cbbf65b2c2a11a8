//! The geographic point record that geo URIs parse into and render from.
//!
//! A [`GeoPoint`] is a passive value holder. Every field except the two
//! coordinates is independently optional, and the codec only ever fills
//! fields that are still unset.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Sentinel for an unset latitude or longitude.
///
/// Distinct from NaN and from any coordinate a geo URI can carry.
pub const NO_LAT_LON: f64 = f64::MIN;

fn no_lat_lon() -> f64 {
    NO_LAT_LON
}

/// A location or track point that can be displayed on a map.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude in degrees north, [`NO_LAT_LON`] if not set.
    #[serde(default = "no_lat_lon")]
    pub latitude: f64,

    /// Longitude in degrees east, [`NO_LAT_LON`] if not set.
    #[serde(default = "no_lat_lon")]
    pub longitude: f64,

    /// When the measurement was taken.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_of_measurement: Option<DateTime<Utc>>,

    /// Short, non-unique marker label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Longer text shown in a popup.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Only show this point at zoom levels `>= zoom_min`. `None` means no lower bound.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zoom_min: Option<i32>,

    /// Only show this point at zoom levels `<= zoom_max`. `None` means no upper bound.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zoom_max: Option<i32>,

    /// Unique identifier of this point.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// URL belonging to this point (rendered as `uri=` in a geo URI).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,

    /// URL of an icon for this point (rendered as `s=` in a geo URI).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
}

impl Default for GeoPoint {
    fn default() -> Self {
        Self {
            latitude: NO_LAT_LON,
            longitude: NO_LAT_LON,
            time_of_measurement: None,
            name: None,
            description: None,
            zoom_min: None,
            zoom_max: None,
            id: None,
            link: None,
            symbol: None,
        }
    }
}

impl GeoPoint {
    /// Creates a point with the given coordinates and nothing else set.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            ..Default::default()
        }
    }

    /// Creates a point with coordinates and a lower zoom bound.
    pub fn with_zoom(latitude: f64, longitude: f64, zoom_min: Option<i32>) -> Self {
        Self {
            zoom_min,
            ..Self::new(latitude, longitude)
        }
    }

    pub fn set_latitude(&mut self, latitude: f64) -> &mut Self {
        self.latitude = latitude;
        self
    }

    pub fn set_longitude(&mut self, longitude: f64) -> &mut Self {
        self.longitude = longitude;
        self
    }

    pub fn set_time_of_measurement(&mut self, time: Option<DateTime<Utc>>) -> &mut Self {
        self.time_of_measurement = time;
        self
    }

    pub fn set_name(&mut self, name: Option<String>) -> &mut Self {
        self.name = name;
        self
    }

    pub fn set_description(&mut self, description: Option<String>) -> &mut Self {
        self.description = description;
        self
    }

    pub fn set_zoom_min(&mut self, zoom_min: Option<i32>) -> &mut Self {
        self.zoom_min = zoom_min;
        self
    }

    pub fn set_zoom_max(&mut self, zoom_max: Option<i32>) -> &mut Self {
        self.zoom_max = zoom_max;
        self
    }

    pub fn set_id(&mut self, id: Option<String>) -> &mut Self {
        self.id = id;
        self
    }

    pub fn set_link(&mut self, link: Option<String>) -> &mut Self {
        self.link = link;
        self
    }

    pub fn set_symbol(&mut self, symbol: Option<String>) -> &mut Self {
        self.symbol = symbol;
        self
    }

    /// Resets every field to its unset value so the record can be reused.
    pub fn clear(&mut self) -> &mut Self {
        *self = Self::default();
        self
    }

    /// Returns an independent copy of this point.
    pub fn duplicate(&self) -> Self {
        self.clone()
    }

    /// Returns true if `value` holds a coordinate (neither NaN nor the sentinel).
    #[inline]
    pub fn is_coordinate_set(value: f64) -> bool {
        !value.is_nan() && value != NO_LAT_LON
    }

    /// Returns true if both coordinates are set.
    pub fn has_lat_lon(&self) -> bool {
        Self::is_coordinate_set(self.latitude) && Self::is_coordinate_set(self.longitude)
    }

    /// Returns true if the point has no usable location.
    ///
    /// See [`GeoPoint::is_empty_lat_lon`].
    pub fn is_empty(&self) -> bool {
        Self::is_empty_lat_lon(self.latitude, self.longitude)
    }

    /// Returns true if either coordinate is NaN or unset, or if both are exactly 0.
    pub fn is_empty_lat_lon(latitude: f64, longitude: f64) -> bool {
        if !Self::is_coordinate_set(latitude) || !Self::is_coordinate_set(longitude) {
            return true;
        }
        latitude == 0.0 && longitude == 0.0
    }
}

/// Like [`GeoPoint::is_empty`], treating a missing point as empty.
pub fn is_empty(point: Option<&GeoPoint>) -> bool {
    point.is_none_or(GeoPoint::is_empty)
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(name) = &self.name {
            return write!(f, "{}", name);
        }
        if let Some(id) = &self.id {
            return write!(f, "#{}", id);
        }
        write!(f, "geo point")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn full_point() -> GeoPoint {
        let mut point = GeoPoint::new(53.5, 10.25);
        point
            .set_name(Some("Hamburg".to_string()))
            .set_description(Some("harbour".to_string()))
            .set_id(Some("p1".to_string()))
            .set_link(Some("https://example.com".to_string()))
            .set_symbol(Some("https://example.com/icon.png".to_string()))
            .set_zoom_min(Some(5))
            .set_zoom_max(Some(7))
            .set_time_of_measurement(Some(Utc.with_ymd_and_hms(1991, 3, 3, 4, 5, 6).unwrap()));
        point
    }

    #[test]
    fn default_point_is_unset() {
        let point = GeoPoint::default();
        assert_eq!(point.latitude, NO_LAT_LON);
        assert_eq!(point.longitude, NO_LAT_LON);
        assert!(point.name.is_none());
        assert!(point.zoom_min.is_none());
        assert!(point.is_empty());
    }

    #[test]
    fn clear_resets_every_field() {
        let mut point = full_point();
        point.clear().set_name(Some("reused".to_string()));

        let mut expected = GeoPoint::default();
        expected.name = Some("reused".to_string());
        assert_eq!(point, expected);
    }

    #[test]
    fn duplicate_is_independent() {
        let original = full_point();
        let mut copy = original.duplicate();
        assert_eq!(copy, original);

        copy.set_name(Some("Bremen".to_string())).set_latitude(1.0);
        assert_eq!(original.name.as_deref(), Some("Hamburg"));
        assert_eq!(original.latitude, 53.5);
    }

    #[test]
    fn empty_when_a_coordinate_is_nan_or_unset() {
        assert!(GeoPoint::is_empty_lat_lon(f64::NAN, 5.0));
        assert!(GeoPoint::is_empty_lat_lon(5.0, f64::NAN));
        assert!(GeoPoint::is_empty_lat_lon(NO_LAT_LON, 5.0));
        assert!(GeoPoint::is_empty_lat_lon(5.0, NO_LAT_LON));
    }

    #[test]
    fn empty_only_when_both_are_zero() {
        assert!(GeoPoint::is_empty_lat_lon(0.0, 0.0));
        assert!(!GeoPoint::is_empty_lat_lon(0.0, 1.0));
        assert!(!GeoPoint::is_empty_lat_lon(1.0, 1.0));
    }

    #[test]
    fn missing_point_is_empty() {
        assert!(is_empty(None));
        assert!(!is_empty(Some(&GeoPoint::new(1.0, 1.0))));
    }

    #[test]
    fn display_prefers_name_then_id() {
        let mut point = GeoPoint::new(1.0, 2.0);
        assert_eq!(point.to_string(), "geo point");

        point.set_id(Some("42".to_string()));
        assert_eq!(point.to_string(), "#42");

        point.set_name(Some("Home".to_string()));
        assert_eq!(point.to_string(), "Home");
    }

    #[test]
    fn json_omits_unset_optionals_and_restores_sentinels() {
        let json = serde_json::to_string(&GeoPoint::new(1.0, 2.0)).unwrap();
        assert_eq!(json, r#"{"latitude":1.0,"longitude":2.0}"#);

        let parsed: GeoPoint = serde_json::from_str(r#"{"name":"x"}"#).unwrap();
        assert_eq!(parsed.latitude, NO_LAT_LON);
        assert_eq!(parsed.longitude, NO_LAT_LON);
        assert_eq!(parsed.name.as_deref(), Some("x"));
    }

    #[test]
    fn json_roundtrip_keeps_timestamp() {
        let point = full_point();
        let json = serde_json::to_string(&point).unwrap();
        let restored: GeoPoint = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, point);
    }
}
