//! geouri: lenient `geo:` URI parsing and canonical formatting.
//!
//! Geo URIs come in many shapes: the IETF draft form (`geo:53.5,10`), the
//! Android map-app form with a `q` query (`geo:0,0?q=53.5,10(Hamburg)`), and
//! vendor extensions carrying zoom bounds, links, icons, ids and timestamps.
//! geouri reads all of them into a single [`point::GeoPoint`] record and
//! writes that record back as one canonical URI.
//!
//! # Modules
//!
//! - [`point`]: The point record plus number/date text conversions
//! - [`uri`]: The geo URI codec ([`uri::GeoUri`]) and its options
//! - [`error`]: Error types for geouri operations

pub mod error;
pub mod point;
pub mod uri;

use std::fmt::Write as _;
use std::io::Read;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

pub use error::GeoUriError;
pub use point::GeoPoint;
pub use uri::{GeoUri, GeoUriOptions};

/// The geouri CLI application.
#[derive(Parser)]
#[command(name = "geouri")]
#[command(version, author, about)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Parse a geo: or geoarea: URI and print the point(s).
    Parse(ParseArgs),
    /// Format a point from JSON as a canonical geo URI.
    Format(FormatArgs),
    /// Infer name, time, link and symbol from free text.
    Infer(InferArgs),
}

/// Arguments for the parse subcommand.
#[derive(clap::Args)]
struct ParseArgs {
    /// The URI to parse.
    uri: String,

    /// Fill missing fields from the description and other query values.
    #[arg(long, env = "GEOURI_INFER_MISSING")]
    infer_missing: bool,

    /// Output format ('text' or 'json').
    #[arg(long, default_value = "text")]
    output: String,
}

/// Arguments for the format subcommand.
#[derive(clap::Args)]
struct FormatArgs {
    /// Point JSON file, or '-' for stdin.
    input: PathBuf,

    /// Repeat latitude/longitude in the q parameter.
    #[arg(long, env = "GEOURI_REDUNDANT_LAT_LON")]
    redundant_lat_lon: bool,

    /// Input is a [north_east, south_west] array; write a geoarea: URI.
    #[arg(long)]
    area: bool,
}

/// Arguments for the infer subcommand.
#[derive(clap::Args)]
struct InferArgs {
    /// Free text to mine, e.g. an HTML description.
    text: String,

    /// Output format ('text' or 'json').
    #[arg(long, default_value = "text")]
    output: String,
}

/// Run the geouri CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), GeoUriError> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Parse(args)) => run_parse(args),
        Some(Commands::Format(args)) => run_format(args),
        Some(Commands::Infer(args)) => run_infer(args),
        None => {
            println!("geouri {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Lenient geo: URI parser and canonical formatter.");
            println!();
            println!("Run 'geouri --help' for usage information.");
            Ok(())
        }
    }
}

/// Execute the parse subcommand.
fn run_parse(args: ParseArgs) -> Result<(), GeoUriError> {
    let mut options = GeoUriOptions::DEFAULT;
    if args.infer_missing {
        options |= GeoUriOptions::PARSE_INFER_MISSING;
    }
    let codec = GeoUri::new(options);

    if args.uri.starts_with(uri::AREA_SCHEME) {
        let area = codec
            .area_from_uri(&args.uri)
            .ok_or_else(|| GeoUriError::NotAGeoUri(args.uri.clone()))?;
        return match args.output.as_str() {
            "json" => print_json(&area),
            "text" => {
                print!("north_east:\n{}", render_point_text(&area[0]));
                print!("south_west:\n{}", render_point_text(&area[1]));
                Ok(())
            }
            other => Err(unsupported_output(other)),
        };
    }

    let point = codec
        .from_uri(&args.uri)
        .ok_or_else(|| GeoUriError::NotAGeoUri(args.uri.clone()))?;
    print_point(&point, &args.output)
}

/// Execute the format subcommand.
fn run_format(args: FormatArgs) -> Result<(), GeoUriError> {
    let json = read_input(&args.input)?;
    let parse_err = |source| GeoUriError::PointJsonParse {
        path: args.input.clone(),
        source,
    };

    let mut options = GeoUriOptions::DEFAULT;
    if args.redundant_lat_lon {
        options |= GeoUriOptions::FORMAT_REDUNDANT_LAT_LON;
    }
    let codec = GeoUri::new(options);

    let uri = if args.area {
        let [north_east, south_west]: [GeoPoint; 2] =
            serde_json::from_str(&json).map_err(parse_err)?;
        codec.to_area_uri_string(&north_east, &south_west)
    } else {
        let point: GeoPoint = serde_json::from_str(&json).map_err(parse_err)?;
        codec.to_uri_string(&point)
    };

    println!("{}", uri);
    Ok(())
}

/// Execute the infer subcommand.
fn run_infer(args: InferArgs) -> Result<(), GeoUriError> {
    let mut point = GeoPoint::default();
    GeoUri::infer_missing(&mut point, &args.text);
    print_point(&point, &args.output)
}

fn read_input(path: &Path) -> Result<String, GeoUriError> {
    if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        Ok(buf)
    } else {
        Ok(std::fs::read_to_string(path)?)
    }
}

fn print_point(point: &GeoPoint, output: &str) -> Result<(), GeoUriError> {
    match output {
        "json" => print_json(point),
        "text" => {
            print!("{}", render_point_text(point));
            Ok(())
        }
        other => Err(unsupported_output(other)),
    }
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<(), GeoUriError> {
    let json = serde_json::to_string_pretty(value).map_err(GeoUriError::PointJsonWrite)?;
    println!("{}", json);
    Ok(())
}

fn unsupported_output(other: &str) -> GeoUriError {
    GeoUriError::UnsupportedFormat(format!("'{}' (supported: text, json)", other))
}

/// Renders the set fields of a point as `key: value` lines.
fn render_point_text(point: &GeoPoint) -> String {
    let mut out = String::new();
    let mut line = |key: &str, value: Option<String>| {
        if let Some(value) = value {
            let _ = writeln!(out, "  {}: {}", key, value);
        }
    };

    let coord = |v: f64| GeoPoint::is_coordinate_set(v).then(|| crate::point::format_lat_lon(v));
    line("latitude", coord(point.latitude));
    line("longitude", coord(point.longitude));
    line("name", point.name.clone());
    line("description", point.description.clone());
    line("zoom_min", point.zoom_min.map(|z| z.to_string()));
    line("zoom_max", point.zoom_max.map(|z| z.to_string()));
    line("id", point.id.clone());
    line("link", point.link.clone());
    line("symbol", point.symbol.clone());
    line(
        "time",
        point.time_of_measurement.as_ref().map(crate::point::format_date),
    );
    out
}
