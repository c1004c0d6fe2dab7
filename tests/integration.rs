//! End-to-end integration tests.
//!
//! These tests write synthetic point files, run the full pipeline,
//! and read the converted output back.

use std::fs;
use std::path::Path;

use geo_enu::config::{CircleConfig, Mode, OutputFormat, PipelineConfig};
use geo_enu::types::{EnuPoint, GeodeticPoint};
use geo_enu::{GeodeticEngine, GeodeticError, Pipeline};

const TOKYO: (f64, f64, f64) = (35.681_236, 139.767_125, 40.0);

/// Write a small grid of geodetic points around Tokyo Station.
fn write_geodetic_grid(path: &Path) -> Vec<[f64; 3]> {
    let mut content = String::from("# lat lon height\n");
    let mut points = Vec::new();
    for i in 0..5 {
        for j in 0..5 {
            let p = [
                TOKYO.0 + i as f64 * 0.001,
                TOKYO.1 + j as f64 * 0.001,
                TOKYO.2 + (i * j) as f64,
            ];
            content.push_str(&format!("{} {} {}\n", p[0], p[1], p[2]));
            points.push(p);
        }
    }
    fs::write(path, content).unwrap();
    points
}

fn tokyo_reference() -> GeodeticPoint {
    GeodeticPoint::new(TOKYO.0, TOKYO.1, TOKYO.2)
}

#[test]
fn to_enu_then_to_llh_round_trip() {
    let tmp = tempfile::tempdir().unwrap();
    let input = tmp.path().join("points.txt");
    let enu_path = tmp.path().join("enu.json");
    let llh_path = tmp.path().join("llh.json");

    let original = write_geodetic_grid(&input);

    let config = PipelineConfig {
        reference: tokyo_reference(),
        mode: Mode::ToEnu,
        input: Some(input),
        output: Some(enu_path.clone()),
        format: OutputFormat::Json,
        ..Default::default()
    };
    let result = Pipeline::run(&config).expect("to-enu should succeed");
    assert_eq!(result.point_count, original.len());

    let enu: Vec<EnuPoint> =
        serde_json::from_str(&fs::read_to_string(&enu_path).unwrap()).unwrap();
    assert_eq!(enu.len(), original.len());
    // First point is the anchor itself
    assert!(enu[0].east.abs() < 1e-6);
    assert!(enu[0].north.abs() < 1e-6);
    assert!(enu[0].up.abs() < 1e-6);

    let config = PipelineConfig {
        reference: tokyo_reference(),
        mode: Mode::ToLlh,
        points: enu.iter().map(|p| [p.east, p.north, p.up]).collect(),
        output: Some(llh_path.clone()),
        format: OutputFormat::Json,
        ..Default::default()
    };
    Pipeline::run(&config).expect("to-llh should succeed");

    let llh: Vec<GeodeticPoint> =
        serde_json::from_str(&fs::read_to_string(&llh_path).unwrap()).unwrap();
    for (p, q) in original.iter().zip(&llh) {
        assert!((p[0] - q.lat).abs() < 1e-7, "lat {} vs {}", p[0], q.lat);
        assert!((p[1] - q.lon).abs() < 1e-7, "lon {} vs {}", p[1], q.lon);
        assert!((p[2] - q.height).abs() < 1e-6, "h {} vs {}", p[2], q.height);
    }
}

#[test]
fn text_output_one_line_per_point() {
    let tmp = tempfile::tempdir().unwrap();
    let output = tmp.path().join("out.txt");

    let config = PipelineConfig {
        reference: GeodeticPoint::new(0.0, 0.0, 0.0),
        mode: Mode::ToEnu,
        points: vec![[0.0, 0.0, 100.0], [0.0, 0.0, 0.0]],
        output: Some(output.clone()),
        ..Default::default()
    };
    let result = Pipeline::run(&config).unwrap();
    assert_eq!(result.point_count, 2);

    let text = fs::read_to_string(&output).unwrap();
    let rows: Vec<Vec<f64>> = text
        .lines()
        .map(|l| l.split_whitespace().map(|v| v.parse().unwrap()).collect())
        .collect();
    assert_eq!(rows, vec![vec![0.0, 0.0, 100.0], vec![0.0, 0.0, 0.0]]);
}

#[test]
fn circle_samples_stay_near_reference() {
    let tmp = tempfile::tempdir().unwrap();
    let output = tmp.path().join("circle.json");

    let config = PipelineConfig {
        reference: tokyo_reference(),
        mode: Mode::ToLlh,
        circle: Some(CircleConfig {
            radius: 300.0,
            height: 20.0,
            period: 60,
            samples: 120,
        }),
        output: Some(output.clone()),
        format: OutputFormat::Json,
        ..Default::default()
    };
    let result = Pipeline::run(&config).unwrap();
    assert_eq!(result.point_count, 120);

    let llh: Vec<GeodeticPoint> =
        serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();

    // Second revolution retraces the first
    assert_eq!(llh[0], llh[60]);

    let engine = GeodeticEngine::with_reference(TOKYO.0, TOKYO.1, TOKYO.2);
    for p in &llh {
        let (e, n, u) = engine.to_enu(p.lat, p.lon, p.height).unwrap();
        assert!(((e * e + n * n).sqrt() - 300.0).abs() < 1e-6);
        assert!((u - 20.0).abs() < 1e-6);
    }
}

#[test]
fn malformed_input_returns_error() {
    let tmp = tempfile::tempdir().unwrap();
    let input = tmp.path().join("bad.txt");
    fs::write(&input, "35.0 139.0 10\n35.0 oops 10\n").unwrap();

    let config = PipelineConfig {
        reference: tokyo_reference(),
        input: Some(input),
        output: Some(tmp.path().join("out.txt")),
        ..Default::default()
    };

    let err = Pipeline::run(&config).unwrap_err();
    assert!(matches!(err, GeodeticError::Input(_)));
    assert!(err.to_string().contains("line 2"));
}

#[test]
fn missing_input_returns_error() {
    let tmp = tempfile::tempdir().unwrap();
    let config = PipelineConfig {
        reference: tokyo_reference(),
        input: Some(tmp.path().join("nonexistent.txt")),
        output: Some(tmp.path().join("out.txt")),
        ..Default::default()
    };

    assert!(Pipeline::run(&config).is_err());
}

#[test]
fn engine_requires_reference() {
    let engine = GeodeticEngine::new();
    assert!(matches!(
        engine.to_llh(1.0, 2.0, 3.0),
        Err(GeodeticError::UninitializedFrame)
    ));

    engine.set_reference(TOKYO.0, TOKYO.1, TOKYO.2);
    let (lat, lon, h) = engine.to_llh(0.0, 0.0, 0.0).unwrap();
    assert!((lat - TOKYO.0).abs() < 1e-9);
    assert!((lon - TOKYO.1).abs() < 1e-9);
    assert!((h - TOKYO.2).abs() < 1e-6);
}
