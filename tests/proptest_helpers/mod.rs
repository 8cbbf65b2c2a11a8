#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use geouri::point::GeoPoint;
use proptest::prelude::*;
use proptest::strategy::BoxedStrategy;
use proptest::test_runner::{Config as ProptestConfig, FileFailurePersistence};

pub fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(256);

    let mut config = ProptestConfig::with_failure_persistence(FileFailurePersistence::WithSource(
        "proptest-regressions",
    ));
    config.cases = cases;
    config.max_shrink_iters = 1024;
    config
}

pub fn latitude_strategy() -> BoxedStrategy<f64> {
    (-90.0f64..=90.0).boxed()
}

pub fn longitude_strategy() -> BoxedStrategy<f64> {
    (-180.0f64..=180.0).boxed()
}

/// Names go inside `(...)`, so they must be non-empty and paren-free.
///
/// Commas are left out too: a `q=(a.,.)` would otherwise look like a
/// (malformed) `lat,lon` pair ahead of the path coordinates.
pub fn name_strategy() -> BoxedStrategy<String> {
    "[A-Za-z][A-Za-z0-9 .'&=?-]{0,20}".boxed()
}

/// Free text for the form-encoded parameters (`d`, `uri`, `s`).
pub fn free_text_strategy() -> BoxedStrategy<String> {
    "\\PC{1,40}".boxed()
}

/// Ids are written unencoded, so stick to URI-safe characters.
pub fn id_strategy() -> BoxedStrategy<String> {
    "[A-Za-z0-9_.-]{1,16}".boxed()
}

pub fn zoom_strategy() -> BoxedStrategy<i32> {
    (0i32..=22).boxed()
}

/// Timestamps between 1970 and ~2096 with millisecond precision.
pub fn time_strategy() -> BoxedStrategy<DateTime<Utc>> {
    (0i64..4_000_000_000_000)
        .prop_map(|millis| {
            Utc.timestamp_millis_opt(millis)
                .single()
                .expect("timestamp in range")
        })
        .boxed()
}

/// A point with every field set.
pub fn arb_point_full() -> BoxedStrategy<GeoPoint> {
    (
        (latitude_strategy(), longitude_strategy()),
        (name_strategy(), free_text_strategy(), id_strategy()),
        (free_text_strategy(), free_text_strategy()),
        (zoom_strategy(), zoom_strategy()),
        time_strategy(),
    )
        .prop_map(
            |((lat, lon), (name, description, id), (link, symbol), (zmin, zmax), time)| {
                let mut point = GeoPoint::new(lat, lon);
                point
                    .set_name(Some(name))
                    .set_description(Some(description))
                    .set_id(Some(id))
                    .set_link(Some(link))
                    .set_symbol(Some(symbol))
                    .set_zoom_min(Some(zmin))
                    .set_zoom_max(Some(zmax))
                    .set_time_of_measurement(Some(time));
                point
            },
        )
        .boxed()
}

/// A located point whose optional fields are each independently present.
pub fn arb_point_sparse() -> BoxedStrategy<GeoPoint> {
    (
        (latitude_strategy(), longitude_strategy()),
        (
            prop::option::of(name_strategy()),
            prop::option::of(free_text_strategy()),
            prop::option::of(id_strategy()),
        ),
        (
            prop::option::of(free_text_strategy()),
            prop::option::of(free_text_strategy()),
        ),
        (
            prop::option::of(zoom_strategy()),
            prop::option::of(zoom_strategy()),
        ),
        prop::option::of(time_strategy()),
    )
        .prop_map(
            |((lat, lon), (name, description, id), (link, symbol), (zmin, zmax), time)| {
                let mut point = GeoPoint::new(lat, lon);
                point
                    .set_name(name)
                    .set_description(description)
                    .set_id(id)
                    .set_link(link)
                    .set_symbol(symbol)
                    .set_zoom_min(zmin)
                    .set_zoom_max(zmax)
                    .set_time_of_measurement(time);
                point
            },
        )
        .boxed()
}
