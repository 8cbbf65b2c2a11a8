use std::path::PathBuf;
use thiserror::Error;

/// The main error type for geouri operations.
#[derive(Debug, Error)]
pub enum GeoUriError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid latitude/longitude '{text}': expected a signed decimal number")]
    InvalidNumber { text: String },

    #[error("Invalid zoom level '{text}': expected an integer")]
    InvalidZoom { text: String },

    #[error("Invalid ISO-8601 timestamp '{text}': {source}")]
    InvalidDate {
        text: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("Not a geo URI: '{0}' (expected 'geo:' or 'geoarea:' scheme)")]
    NotAGeoUri(String),

    #[error("Failed to parse point JSON from {path}: {source}")]
    PointJsonParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write point JSON: {0}")]
    PointJsonWrite(#[source] serde_json::Error),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}
