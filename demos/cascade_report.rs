//! Cascade Report Example
//!
//! This example analyzes a two-stage PDM microphone decimation chain
//! (3.072 MHz -> 96 kHz -> 16 kHz) built from windowed-sinc lowpass taps.
//!
//! Run with `RUST_LOG=info` (or `debug` for per-stage grids).

use foldback::{AnalysisConfig, Cascade, analyze_cascade};
use log::{error, info};
use std::f64::consts::PI;

/// Hamming-windowed sinc lowpass with cutoff `cutoff` in cycles/sample.
fn windowed_sinc(num_taps: usize, cutoff: f64) -> Vec<f64> {
    let m = (num_taps - 1) as f64 / 2.0;
    (0..num_taps)
        .map(|i| {
            let x = i as f64 - m;
            let sinc = if x.abs() < 1e-12 {
                2.0 * cutoff
            } else {
                (2.0 * PI * cutoff * x).sin() / (PI * x)
            };
            let window = 0.54 - 0.46 * (2.0 * PI * i as f64 / (num_taps - 1) as f64).cos();
            sinc * window
        })
        .collect()
}

fn main() {
    env_logger::init();
    info!("Cascade Report Example");

    let input_rate = 3_072_000.0;
    let stage1 = windowed_sinc(256, 0.5 / 32.0);
    let stage2 = windowed_sinc(65, 0.45 / 6.0);

    let cascade = match Cascade::from_pairs(vec![(stage1, 32), (stage2, 6)], input_rate) {
        Ok(c) => c,
        Err(e) => {
            error!("Invalid cascade: {}", e);
            return;
        }
    };

    let config = AnalysisConfig::default();
    let report = match analyze_cascade(&cascade, &config) {
        Ok(r) => r,
        Err(e) => {
            error!("Analysis failed: {}", e);
            return;
        }
    };

    for (k, stage) in report.stages.iter().enumerate() {
        let band_edge = stage.output_rate / 2.0 * 0.9;
        info!(
            "Stage {}: {} Hz -> {} Hz, {} taps",
            k + 1,
            stage.input_rate,
            stage.output_rate,
            stage.taps.len()
        );
        if let Some(alias) = stage.alias.peak_alias_db(band_edge) {
            info!("  - peak alias below {:.0} Hz: {:.1} dB", band_edge, alias);
        }
        let rejected = stage.rejected_later.iter().filter(|&&r| r).count();
        info!(
            "  - {} of {} bins removed by later stages",
            rejected,
            stage.rejected_later.len()
        );
    }

    let passband = report.output_rate() / 2.0 * 0.8;
    info!("Combined: output rate {} Hz", report.output_rate());
    if let Some(ripple) = report.passband_ripple_db(passband) {
        info!("  - passband ripple below {:.0} Hz: {:.3} dB", passband, ripple);
    }
    info!(
        "  - equivalent filter: {} taps at {} Hz",
        report.equivalent_taps.len(),
        cascade.input_rate()
    );
}
