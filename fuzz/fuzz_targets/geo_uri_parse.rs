//! Fuzz target for geo: URI parsing.
//!
//! This fuzzer feeds arbitrary UTF-8 text (prefixed with the geo: scheme)
//! to the parser with every option combination, checking for panics,
//! crashes, or hangs.

#![no_main]

use geouri::uri::fuzz_parse_geo_uri;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 1024 * 1024 {
        return;
    }

    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    fuzz_parse_geo_uri(text);
});
