//! Conversion between geo URIs and [`GeoPoint`]s.
//!
//! Format:
//!
//! ```text
//! geo:{lat}{,lon{,alt}}{?q={lat}{,lon}{,alt}{(name)}}{&z=zmin}{&z2=zmax}{&uri=link}{&s=symbol}{&d=description}{&id=id}{&t=time}
//! geoarea:{neLat},{neLon},{swLat},{swLon}
//! ```
//!
//! This follows the IETF geo URI draft closely enough for Android map apps,
//! plus non-standard parameters (`z2`, `uri`, `s`, `d`, `id`, `t`) used by
//! location viewers.
//!
//! Parsing is lenient: each field is taken from the first place that carries
//! it, malformed numbers are logged and skipped, and fields already set on the
//! target point are never overwritten. Formatting is canonical: parameters are
//! always written in the same order.
//!
//! # Example
//!
//! ```
//! use geouri::uri::{GeoUri, GeoUriOptions};
//!
//! let codec = GeoUri::new(GeoUriOptions::FORMAT_REDUNDANT_LAT_LON);
//! let point = codec.from_uri("geo:53.55,9.99?q=(Hamburg)&z=12").unwrap();
//!
//! assert_eq!(point.name.as_deref(), Some("Hamburg"));
//! assert_eq!(point.zoom_min, Some(12));
//! assert_eq!(
//!     codec.to_uri_string(&point),
//!     "geo:53.55,9.99?q=53.55,9.99(Hamburg)&z=12"
//! );
//! ```

mod options;
pub mod query;
mod search;

pub use options::GeoUriOptions;
pub use query::keys;
pub use search::SearchLocations;

use crate::point::format::{format_date, format_lat_lon, format_zoom, parse_zoom};
use crate::point::GeoPoint;
use query::{encode, parse_query, QueryBuilder};
use search::{
    fill_from_pattern, fill_time, find_area, find_lat_lon, is_unset, HREF_PATTERN, NAME_PATTERN,
    SRC_PATTERN,
};

/// Scheme of a single-point URI.
pub const GEO_SCHEME: &str = "geo:";

/// Scheme of a bounding-box URI.
pub const AREA_SCHEME: &str = "geoarea:";

/// Geo URI parser and formatter.
///
/// The codec holds only its [`GeoUriOptions`]; every call builds its own
/// transient state, so one instance can be shared freely.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GeoUri {
    options: GeoUriOptions,
}

impl GeoUri {
    pub fn new(options: GeoUriOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> GeoUriOptions {
        self.options
    }

    #[inline]
    fn is_set(&self, option: GeoUriOptions) -> bool {
        self.options.contains(option)
    }

    /// Parses a `geo:` URI into a new point.
    ///
    /// Returns `None` if `uri` does not use the `geo:` scheme.
    #[allow(clippy::wrong_self_convention)]
    pub fn from_uri(&self, uri: &str) -> Option<GeoPoint> {
        let mut point = GeoPoint::default();
        self.from_uri_into(uri, &mut point)?;
        Some(point)
    }

    /// Parses a `geo:` URI into `point`, filling only fields that are unset.
    ///
    /// Returns `None` (leaving `point` untouched) if `uri` does not use the
    /// `geo:` scheme.
    #[allow(clippy::wrong_self_convention)]
    pub fn from_uri_into<'p>(
        &self,
        uri: &str,
        point: &'p mut GeoPoint,
    ) -> Option<&'p mut GeoPoint> {
        if !uri.starts_with(GEO_SCHEME) {
            tracing::debug!("not a {} uri: {}", GEO_SCHEME, uri);
            return None;
        }

        match uri.split_once('?') {
            Some((path, query)) => self.parse_with_query(path, query, point),
            None => fill_lat_lon(point, &SearchLocations::from_iter([uri])),
        }
        Some(point)
    }

    fn parse_with_query(&self, path: &str, query: &str, point: &mut GeoPoint) {
        let params = parse_query(query);
        let param = |key: &str| params.get(key).map(String::as_str);

        fill_text(&mut point.description, param(keys::DESCRIPTION));
        fill_text(&mut point.link, param(keys::LINK));
        fill_text(&mut point.symbol, param(keys::SYMBOL));
        fill_text(&mut point.id, param(keys::ID));
        fill_zoom(&mut point.zoom_min, param(keys::ZOOM));
        fill_zoom(&mut point.zoom_max, param(keys::ZOOM_MAX));

        let infer_missing = self.is_set(GeoUriOptions::PARSE_INFER_MISSING);
        let description = point.description.clone();

        // q beats the path, which beats the legacy ll parameter
        let mut locations = SearchLocations::new();
        locations
            .push(param(keys::QUERY))
            .push(Some(path))
            .push(param(keys::LAT_LON));
        if infer_missing {
            locations
                .push(description.as_deref())
                .extend(params.values().map(String::as_str));
        }

        fill_from_pattern(&mut point.name, &NAME_PATTERN, &locations);
        fill_time(&mut point.time_of_measurement, param(keys::TIME), &locations);
        fill_lat_lon(point, &locations);

        fill_text(&mut point.name, param(keys::NAME));

        if infer_missing {
            fill_from_pattern(&mut point.link, &HREF_PATTERN, &locations);
            fill_from_pattern(&mut point.symbol, &SRC_PATTERN, &locations);
        }
    }

    /// Parses a `geoarea:` URI into a north-east / south-west pair.
    pub fn area_from_uri(&self, uri: &str) -> Option<[GeoPoint; 2]> {
        let mut area = [GeoPoint::default(), GeoPoint::default()];
        self.area_from_uri_into(uri, &mut area)?;
        Some(area)
    }

    /// Parses a `geoarea:` URI into the first two slots of `area`.
    ///
    /// Slot 0 receives the north-east corner, slot 1 the south-west corner.
    /// Returns `None` (leaving `area` untouched) if there are fewer than two
    /// slots, the scheme differs, or the four coordinates are not all present
    /// and well-formed.
    pub fn area_from_uri_into<'a>(
        &self,
        uri: &str,
        area: &'a mut [GeoPoint],
    ) -> Option<&'a mut [GeoPoint]> {
        if area.len() < 2 || !uri.starts_with(AREA_SCHEME) {
            tracing::debug!("not a {} uri: {}", AREA_SCHEME, uri);
            return None;
        }

        match find_area(uri)? {
            Ok([(ne_lat, ne_lon), (sw_lat, sw_lon)]) => {
                area[0].set_latitude(ne_lat).set_longitude(ne_lon);
                area[1].set_latitude(sw_lat).set_longitude(sw_lon);
                Some(area)
            }
            Err(err) => {
                tracing::warn!("ignoring area uri {}: {}", uri, err);
                None
            }
        }
    }

    /// Fills name, time, link and symbol of `point` from free text.
    ///
    /// Useful when a description has already been isolated, e.g. from a
    /// GPX or KML document. Fields that already have a value are kept.
    pub fn infer_missing<'p>(point: &'p mut GeoPoint, text: &str) -> &'p mut GeoPoint {
        let locations = SearchLocations::from_iter([text]);

        fill_from_pattern(&mut point.name, &NAME_PATTERN, &locations);
        fill_time(&mut point.time_of_measurement, None, &locations);
        fill_from_pattern(&mut point.link, &HREF_PATTERN, &locations);
        fill_from_pattern(&mut point.symbol, &SRC_PATTERN, &locations);
        point
    }

    /// Sets the unset coordinates of `point` from the first `lat,lon` found
    /// in `candidates`.
    pub fn parse_lat_lon<'p>(point: &'p mut GeoPoint, candidates: &[&str]) -> &'p mut GeoPoint {
        fill_lat_lon(point, &candidates.iter().copied().collect());
        point
    }

    /// Formats a bare location with an optional lower zoom bound.
    pub fn to_uri_string_lat_lon(
        &self,
        latitude: f64,
        longitude: f64,
        zoom: Option<i32>,
    ) -> String {
        self.to_uri_string(&GeoPoint::with_zoom(latitude, longitude, zoom))
    }

    /// Formats `point` as a canonical `geo:` URI.
    ///
    /// Parameters appear in the fixed order `q`, `z`, `z2`, `uri`, `s`, `d`,
    /// `id`, `t`, each only when it has a value.
    pub fn to_uri_string(&self, point: &GeoPoint) -> String {
        let mut base = String::from(GEO_SCHEME);
        push_lat_lon(&mut base, point);

        let mut builder = QueryBuilder::new(base);
        builder
            .param(keys::QUERY, self.format_query(point).as_deref())
            .param(keys::ZOOM, format_zoom(point.zoom_min).as_deref())
            .param(keys::ZOOM_MAX, format_zoom(point.zoom_max).as_deref())
            .encoded_param(keys::LINK, point.link.as_deref())
            .encoded_param(keys::SYMBOL, point.symbol.as_deref())
            .encoded_param(keys::DESCRIPTION, point.description.as_deref())
            .param(keys::ID, point.id.as_deref())
            .param(
                keys::TIME,
                point.time_of_measurement.as_ref().map(format_date).as_deref(),
            );
        builder.finish()
    }

    /// Formats a bounding box as a `geoarea:` URI.
    pub fn to_area_uri_string(&self, north_east: &GeoPoint, south_west: &GeoPoint) -> String {
        let coords = [
            north_east.latitude,
            north_east.longitude,
            south_west.latitude,
            south_west.longitude,
        ];
        let joined: Vec<String> = coords.iter().map(|&c| format_lat_lon(c)).collect();
        format!("{}{}", AREA_SCHEME, joined.join(","))
    }

    /// Value of the `q` parameter: `{lat,lon}{(name)}`, or `None` if empty.
    fn format_query(&self, point: &GeoPoint) -> Option<String> {
        let mut q = String::new();
        if self.is_set(GeoUriOptions::FORMAT_REDUNDANT_LAT_LON) {
            push_lat_lon(&mut q, point);
        }
        if let Some(name) = &point.name {
            q.push('(');
            q.push_str(&encode(name));
            q.push(')');
        }
        (!q.is_empty()).then_some(q)
    }
}

/// Fuzz-only entrypoint for `geo:` parsing under every option combination.
#[cfg(feature = "fuzzing")]
pub fn fuzz_parse_geo_uri(input: &str) {
    let uri = format!("{}{}", GEO_SCHEME, input);
    for bits in [0, 0x1, 0x100, 0x101] {
        let codec = GeoUri::new(GeoUriOptions::from_bits(bits));
        if let Some(point) = codec.from_uri(&uri) {
            let _ = codec.to_uri_string(&point);
        }
    }
    let mut point = GeoPoint::default();
    GeoUri::infer_missing(&mut point, input);
}

/// Fuzz-only entrypoint for `geoarea:` parsing.
#[cfg(feature = "fuzzing")]
pub fn fuzz_parse_area_uri(input: &str) {
    let codec = GeoUri::default();
    if let Some([ne, sw]) = codec.area_from_uri(&format!("{}{}", AREA_SCHEME, input)) {
        let _ = codec.to_area_uri_string(&ne, &sw);
    }
}

fn push_lat_lon(out: &mut String, point: &GeoPoint) {
    if !GeoPoint::is_coordinate_set(point.latitude) {
        return;
    }
    out.push_str(&format_lat_lon(point.latitude));
    if GeoPoint::is_coordinate_set(point.longitude) {
        out.push(',');
        out.push_str(&format_lat_lon(point.longitude));
    }
}

fn fill_text(current: &mut Option<String>, value: Option<&str>) {
    if is_unset(current) {
        if let Some(value) = value {
            *current = Some(value.to_string());
        }
    }
}

fn fill_zoom(current: &mut Option<i32>, value: Option<&str>) {
    if current.is_some() {
        return;
    }
    match parse_zoom(value) {
        Ok(zoom) => *current = zoom,
        Err(err) => tracing::warn!("ignoring zoom: {}", err),
    }
}

fn fill_lat_lon(point: &mut GeoPoint, locations: &SearchLocations<'_>) {
    match find_lat_lon(locations) {
        Some(Ok((lat, lon))) => {
            if !GeoPoint::is_coordinate_set(point.latitude) {
                point.latitude = lat;
            }
            if !GeoPoint::is_coordinate_set(point.longitude) {
                point.longitude = lon;
            }
        }
        Some(Err(err)) => tracing::warn!("ignoring coordinates: {}", err),
        None => {}
    }
}
