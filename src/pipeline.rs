use std::f64::consts::PI;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::{debug, info};

use crate::config::{CircleConfig, Mode, OutputFormat, PipelineConfig, parse_point};
use crate::engine::GeodeticEngine;
use crate::error::{GeodeticError, Result};
use crate::types::{EnuPoint, GeodeticPoint};

/// Summary of a completed conversion run.
#[derive(Debug)]
pub struct ProcessingResult {
    pub point_count: usize,
    pub duration: Duration,
}

/// Converted points, tagged by direction.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Converted {
    Enu(Vec<EnuPoint>),
    Llh(Vec<GeodeticPoint>),
}

impl Converted {
    pub fn len(&self) -> usize {
        match self {
            Converted::Enu(v) => v.len(),
            Converted::Llh(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Batch conversion driver -- gathers input, converts, writes output.
pub struct Pipeline;

impl Pipeline {
    /// Run a full conversion.
    pub fn run(config: &PipelineConfig) -> Result<ProcessingResult> {
        let start = Instant::now();

        let reference = config.reference;
        info!(
            lat = reference.lat,
            lon = reference.lon,
            height = reference.height,
            mode = %config.mode,
            "Starting conversion"
        );

        let triples = gather_input(config)?;
        info!(points = triples.len(), "Input gathered");

        let engine =
            GeodeticEngine::with_reference(reference.lat, reference.lon, reference.height);
        let converted = convert(&engine, config.mode, &triples)?;

        match &config.output {
            Some(path) => {
                info!(output = %path.display(), format = %config.format, "Writing output");
                let file = File::create(path).map_err(|e| {
                    GeodeticError::Output(format!("Failed to create {}: {e}", path.display()))
                })?;
                write_converted(&converted, config.format, BufWriter::new(file))?;
            }
            None => {
                let stdout = io::stdout();
                write_converted(&converted, config.format, stdout.lock())?;
            }
        }

        let duration = start.elapsed();
        info!(points = converted.len(), elapsed = ?duration, "Conversion complete");

        Ok(ProcessingResult {
            point_count: converted.len(),
            duration,
        })
    }
}

/// Collect triples from the input file, `--point` values and circle samples,
/// in that order.
fn gather_input(config: &PipelineConfig) -> Result<Vec<[f64; 3]>> {
    let mut triples = Vec::new();

    if let Some(path) = &config.input {
        triples.extend(read_triples(path)?);
    }

    triples.extend_from_slice(&config.points);

    if let Some(circle) = &config.circle {
        if config.mode != Mode::ToLlh {
            return Err(GeodeticError::Input(
                "circle samples are ENU points and require --mode to-llh".into(),
            ));
        }
        let samples = circular_samples(circle)?;
        debug!(count = samples.len(), "Generated circle samples");
        triples.extend(samples.iter().map(|p| [p.east, p.north, p.up]));
    }

    if triples.is_empty() {
        return Err(GeodeticError::Input(
            "no points given; use --input, --point or --circle-radius".into(),
        ));
    }

    Ok(triples)
}

fn convert(engine: &GeodeticEngine, mode: Mode, triples: &[[f64; 3]]) -> Result<Converted> {
    match mode {
        Mode::ToEnu => {
            let points: Vec<GeodeticPoint> = triples.iter().copied().map(Into::into).collect();
            Ok(Converted::Enu(engine.to_enu_batch(&points)?))
        }
        Mode::ToLlh => {
            let points: Vec<EnuPoint> = triples.iter().copied().map(Into::into).collect();
            Ok(Converted::Llh(engine.to_llh_batch(&points)?))
        }
    }
}

/// Read a file of triples.
pub fn read_triples(path: &Path) -> Result<Vec<[f64; 3]>> {
    let content = fs::read_to_string(path).map_err(|e| {
        GeodeticError::Input(format!("Failed to read {}: {e}", path.display()))
    })?;
    parse_triples(&content)
}

/// Parse one triple per line; blank lines and `#` comments are skipped.
pub fn parse_triples(content: &str) -> Result<Vec<[f64; 3]>> {
    content
        .lines()
        .enumerate()
        .filter_map(|(i, line)| {
            let line = line.split('#').next().unwrap_or("").trim();
            (!line.is_empty()).then_some((i + 1, line))
        })
        .map(|(line_no, line)| {
            parse_point(line)
                .map_err(|e| GeodeticError::Input(format!("line {line_no}: {e}")))
        })
        .collect()
}

/// ENU points on a horizontal circle around the reference.
///
/// Sample `k` sits at angle `2π·(k mod period)/period`, so the sequence
/// repeats every `period` samples.
pub fn circular_samples(circle: &CircleConfig) -> Result<Vec<EnuPoint>> {
    if circle.period == 0 {
        return Err(GeodeticError::Input("circle period must be positive".into()));
    }
    let period = circle.period as usize;

    Ok((0..circle.samples)
        .map(|k| {
            let angle = 2.0 * PI * (k % period) as f64 / period as f64;
            EnuPoint::new(
                circle.radius * angle.cos(),
                circle.radius * angle.sin(),
                circle.height,
            )
        })
        .collect())
}

/// Write converted points as text (one line each) or a JSON array.
pub fn write_converted<W: Write>(
    converted: &Converted,
    format: OutputFormat,
    mut out: W,
) -> Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut out, converted)
                .map_err(|e| GeodeticError::Output(format!("JSON encoding failed: {e}")))?;
            writeln!(out)?;
        }
        OutputFormat::Text => match converted {
            Converted::Enu(points) => {
                for p in points {
                    writeln!(out, "{:.4} {:.4} {:.4}", p.east, p.north, p.up)?;
                }
            }
            Converted::Llh(points) => {
                for p in points {
                    writeln!(out, "{:.9} {:.9} {:.4}", p.lat, p.lon, p.height)?;
                }
            }
        },
    }
    out.flush()?;
    Ok(())
}
