//! Edge case tests for boundary conditions and unusual inputs.
//!
//! Tests cover:
//! - Malformed stages (empty, zero, non-finite taps; zero decimation)
//! - Non-positive rates
//! - Empty cascades and collapsed grids

use foldback::analysis::{AnalysisConfig, CascadeState, compose_cascade};
use foldback::{Cascade, Error, Stage, analyze_stage, filters, spectrum};

// Malformed stages

#[test]
fn zero_tap_fails_as_invalid_stage() {
    let err = analyze_stage(&[0.0], 1, 48_000.0, 48_000.0, &AnalysisConfig::default());
    assert!(matches!(err, Err(Error::InvalidStage { .. })));
}

#[test]
fn empty_taps() {
    let err = analyze_stage(&[], 2, 48_000.0, 24_000.0, &AnalysisConfig::default());
    assert!(matches!(err, Err(Error::InvalidStage { .. })));
}

#[test]
fn zero_decimation() {
    assert!(matches!(
        Stage::new(vec![1.0], 0),
        Err(Error::InvalidStage { .. })
    ));
}

#[test]
fn infinite_tap() {
    assert!(matches!(
        Stage::new(vec![1.0, f64::INFINITY], 2),
        Err(Error::InvalidStage { .. })
    ));
}

#[test]
fn zero_dc_gain_cannot_be_normalized() {
    assert!(matches!(
        filters::normalize(&[1.0, -2.0, 1.0]),
        Err(Error::InvalidStage { .. })
    ));
}

// Rates

#[test]
fn non_positive_input_rate() {
    for rate in [0.0, -48_000.0, f64::NAN] {
        let err = analyze_stage(&[1.0], 1, rate, 48_000.0, &AnalysisConfig::default());
        assert!(matches!(err, Err(Error::Domain { .. })), "rate {rate}");
    }
}

#[test]
fn non_positive_final_rate() {
    let err = analyze_stage(&[1.0], 2, 48_000.0, 0.0, &AnalysisConfig::default());
    assert!(matches!(err, Err(Error::Domain { .. })));
}

#[test]
fn cascade_with_zero_rate() {
    let stages = vec![Stage::new(vec![1.0], 2).unwrap()];
    assert!(matches!(
        compose_cascade(&stages, 0.0, &AnalysisConfig::default()),
        Err(Error::Domain { .. })
    ));
}

// Empty and collapsed cascades

#[test]
fn empty_cascade() {
    assert!(matches!(
        compose_cascade(&[], 48_000.0, &AnalysisConfig::default()),
        Err(Error::EmptyCascade)
    ));
    assert!(matches!(
        Cascade::new(Vec::new(), 48_000.0),
        Err(Error::EmptyCascade)
    ));
}

#[test]
fn resolution_smaller_than_total_decimation() {
    let stages = vec![
        Stage::new(vec![1.0], 8).unwrap(),
        Stage::new(vec![1.0], 8).unwrap(),
    ];
    let cfg = AnalysisConfig {
        cascade_bins: 32,
        ..AnalysisConfig::default()
    };
    assert!(matches!(
        compose_cascade(&stages, 48_000.0, &cfg),
        Err(Error::InvalidSize { .. })
    ));
}

#[test]
fn state_refuses_collapsed_grid() {
    let stage = Stage::new(vec![1.0], 4).unwrap();
    let (state, _) = CascadeState::new(48_000.0, 2).unwrap().apply(&stage).unwrap();
    assert_eq!(state.grid().bins, 0);
    assert!(matches!(state.apply(&stage), Err(Error::InvalidSize { .. })));
}

#[test]
fn zero_resolution() {
    let cfg = AnalysisConfig {
        stage_bins: 0,
        ..AnalysisConfig::default()
    };
    assert!(matches!(
        analyze_stage(&[1.0], 1, 48_000.0, 48_000.0, &cfg),
        Err(Error::InvalidSize { .. })
    ));
}

// Single-sample filters

#[test]
fn single_tap_stage_with_decimation() {
    let cfg = AnalysisConfig {
        stage_bins: 16,
        ..AnalysisConfig::default()
    };
    let a = analyze_stage(&[3.0], 2, 32_000.0, 16_000.0, &cfg).unwrap();
    // all-pass: both zones contribute unity everywhere
    for v in &a.alias.folded_magnitude {
        assert!((v - 2.0).abs() < 1e-12);
    }
}

#[test]
fn decibels_of_silence_are_finite() {
    let db = spectrum::to_decibels(&[0.0, 0.0]);
    assert!(db.iter().all(|v| v.is_finite()));
}
