use std::path::PathBuf;

use clap::Parser;

use crate::types::GeodeticPoint;

/// Conversion direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Mode {
    /// Geodetic (lat, lon, height) → local (east, north, up)
    #[value(name = "to-enu")]
    ToEnu,
    /// Local (east, north, up) → geodetic (lat, lon, height)
    #[value(name = "to-llh")]
    ToLlh,
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mode::ToEnu => write!(f, "to-enu"),
            Mode::ToLlh => write!(f, "to-llh"),
        }
    }
}

/// Output encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[value(name = "text")]
    Text,
    #[value(name = "json")]
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Horizontal circle of ENU sample points around the reference.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleConfig {
    pub radius: f64,
    pub height: f64,
    pub period: u32,
    pub samples: usize,
}

impl Default for CircleConfig {
    fn default() -> Self {
        Self {
            radius: 100.0,
            height: 50.0,
            period: 60,
            samples: 60,
        }
    }
}

/// Fully resolved run configuration (constructed from CLI args).
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub reference: GeodeticPoint,
    pub mode: Mode,
    pub input: Option<PathBuf>,
    pub points: Vec<[f64; 3]>,
    pub circle: Option<CircleConfig>,
    pub output: Option<PathBuf>,
    pub format: OutputFormat,
    pub verbose: bool,
    pub log_json: bool,
    pub threads: Option<usize>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            reference: GeodeticPoint::default(),
            mode: Mode::ToEnu,
            input: None,
            points: Vec::new(),
            circle: None,
            output: None,
            format: OutputFormat::Text,
            verbose: false,
            log_json: false,
            threads: None,
        }
    }
}

/// CLI argument definition (clap derive).
#[derive(Parser, Debug)]
#[command(
    name = "geo-enu",
    about = "WGS-84 geodetic <-> local East-North-Up converter",
    version
)]
pub struct CliArgs {
    /// Reference latitude in degrees
    #[arg(long, allow_hyphen_values = true)]
    pub ref_lat: f64,

    /// Reference longitude in degrees
    #[arg(long, allow_hyphen_values = true)]
    pub ref_lon: f64,

    /// Reference height above the ellipsoid in metres
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    pub ref_height: f64,

    /// Conversion direction
    #[arg(short = 'm', long, value_enum, default_value = "to-enu")]
    pub mode: Mode,

    /// File of whitespace- or comma-separated triples, one per line
    #[arg(short = 'i', long)]
    pub input: Option<PathBuf>,

    /// Single point as `a,b,c` (repeatable)
    #[arg(short = 'p', long = "point", value_parser = parse_point, allow_hyphen_values = true)]
    pub points: Vec<[f64; 3]>,

    /// Generate ENU samples on a circle of this radius in metres (to-llh only)
    #[arg(long)]
    pub circle_radius: Option<f64>,

    /// Up component of the circle samples in metres
    #[arg(long, default_value_t = 50.0, allow_hyphen_values = true)]
    pub circle_height: f64,

    /// Samples per revolution
    #[arg(long, default_value_t = 60)]
    pub circle_period: u32,

    /// Number of circle samples to emit
    #[arg(long, default_value_t = 60)]
    pub circle_samples: usize,

    /// Output file (default: stdout)
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,

    /// Output format: text or json
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Enable verbose logging
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub log_json: bool,

    /// Worker thread count (default: all cores)
    #[arg(short = 'j', long)]
    pub threads: Option<usize>,
}

/// Parse `a,b,c` (commas and/or whitespace) into a triple.
pub fn parse_point(s: &str) -> Result<[f64; 3], String> {
    let values = s
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
        .map(|t| t.parse::<f64>().map_err(|e| format!("invalid number {t:?}: {e}")))
        .collect::<Result<Vec<f64>, String>>()?;

    match values.as_slice() {
        [a, b, c] => Ok([*a, *b, *c]),
        _ => Err(format!("expected 3 values, found {}", values.len())),
    }
}

impl From<CliArgs> for PipelineConfig {
    fn from(args: CliArgs) -> Self {
        let circle = args.circle_radius.map(|radius| CircleConfig {
            radius,
            height: args.circle_height,
            period: args.circle_period,
            samples: args.circle_samples,
        });

        PipelineConfig {
            reference: GeodeticPoint::new(args.ref_lat, args.ref_lon, args.ref_height),
            mode: args.mode,
            input: args.input,
            points: args.points,
            circle,
            output: args.output,
            format: args.format,
            verbose: args.verbose,
            log_json: args.log_json,
            threads: args.threads,
        }
    }
}
