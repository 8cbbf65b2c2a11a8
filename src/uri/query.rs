//! Query-string handling: decoding into a lookup map and building new ones.

use std::collections::BTreeMap;

use url::form_urlencoded;

/// Query keys understood by the geo URI codec.
pub mod keys {
    /// Free text holding `lat,lon` and/or `(name)`.
    pub const QUERY: &str = "q";
    /// Legacy combined `lat,lon`.
    pub const LAT_LON: &str = "ll";
    pub const ZOOM: &str = "z";
    pub const ZOOM_MAX: &str = "z2";
    pub const LINK: &str = "uri";
    pub const SYMBOL: &str = "s";
    pub const DESCRIPTION: &str = "d";
    pub const ID: &str = "id";
    pub const TIME: &str = "t";
    pub const NAME: &str = "name";
}

/// Decoded query parameters, keyed by name.
///
/// The last occurrence of a duplicated key wins. Iteration is in key order.
pub type QueryParams = BTreeMap<String, String>;

/// Splits `query` (the text after `?`) into decoded parameters.
///
/// Each `&`-separated parameter is split on its first `=`; parameters
/// without `=` are ignored. Keys and values are form-decoded (`+` is space).
pub fn parse_query(query: &str) -> QueryParams {
    let mut params = QueryParams::new();
    for param in query.split('&') {
        if !param.contains('=') {
            continue;
        }
        if let Some((key, value)) = form_urlencoded::parse(param.as_bytes()).next() {
            params.insert(key.into_owned(), value.into_owned());
        }
    }
    params
}

/// Form-encodes a parameter value.
pub fn encode(raw: &str) -> String {
    form_urlencoded::byte_serialize(raw.as_bytes()).collect()
}

/// Accumulates `key=value` pairs onto a URI, starting with `?` and
/// continuing with `&`.
///
/// Each formatting call owns its builder, so the separator state never
/// leaks between calls.
#[derive(Debug)]
pub struct QueryBuilder {
    buf: String,
    delim: char,
}

impl QueryBuilder {
    /// Starts a builder on top of the scheme/path part of a URI.
    pub fn new(base: String) -> Self {
        Self { buf: base, delim: '?' }
    }

    /// Appends `key=value` verbatim if `value` is present.
    pub fn param(&mut self, key: &str, value: Option<&str>) -> &mut Self {
        if let Some(value) = value {
            self.buf.push(self.delim);
            self.buf.push_str(key);
            self.buf.push('=');
            self.buf.push_str(value);
            self.delim = '&';
        }
        self
    }

    /// Appends `key=value` with `value` form-encoded, if present.
    pub fn encoded_param(&mut self, key: &str, value: Option<&str>) -> &mut Self {
        let encoded = value.map(encode);
        self.param(key, encoded.as_deref())
    }

    pub fn finish(self) -> String {
        self.buf
    }
}
