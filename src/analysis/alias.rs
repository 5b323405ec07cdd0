//! Per-stage frequency response and decimation aliasing.
//!
//! Decimating by `D` folds the input half band `[0, fs_in / 2)` into `D`
//! Nyquist zones of width `fs_out / 2`. Zone `n` lands on the output
//! baseband with its frequency order preserved when `n` is even and mirrored
//! when `n` is odd, so the magnitude seen after decimation is bounded by the
//! sum of all zones folded that way.

use super::AnalysisConfig;
use crate::spectrum::{self, FrequencyResponse};
use crate::stage::Stage;
use crate::utils;
use ndarray::{Array1, Array2, ArrayView1, Axis};

/// Fold one Nyquist-zone block onto the baseband axis.
///
/// Even zones keep their order; odd zones are reversed.
///
/// # Example
/// ```
/// use foldback::analysis::fold_block;
/// use ndarray::array;
///
/// let block = array![1.0, 2.0, 3.0];
/// assert_eq!(fold_block(true, block.view()), array![1.0, 2.0, 3.0]);
/// assert_eq!(fold_block(false, block.view()), array![3.0, 2.0, 1.0]);
/// ```
pub fn fold_block(even: bool, block: ArrayView1<'_, f64>) -> Array1<f64> {
    let mut folded = block.to_owned();
    if !even {
        folded.invert_axis(Axis(0));
    }
    folded
}

/// Sum the `decimation` zones of a magnitude response onto the baseband.
///
/// `magnitude` holds `decimation * nfft` bins spanning the input half band.
///
/// # Errors
/// Returns `Error::InvalidSize` if `nfft` is zero or `magnitude` is not
/// exactly `decimation * nfft` long.
pub fn fold_aliases(magnitude: &[f64], nfft: usize, decimation: usize) -> crate::Result<Vec<f64>> {
    utils::valid_bins(nfft, "nfft")?;
    utils::valid_decimation(decimation)?;
    let zones = Array2::from_shape_vec((decimation, nfft), magnitude.to_vec()).map_err(|_| {
        crate::Error::InvalidSize {
            name: "magnitude",
            value: magnitude.len(),
            reason: "must hold exactly decimation * nfft bins",
        }
    })?;
    log::trace!("folding {decimation} zones of {nfft} bins");

    let folded = zones
        .rows()
        .into_iter()
        .enumerate()
        .fold(Array1::<f64>::zeros(nfft), |acc, (n, zone)| {
            acc + fold_block(n % 2 == 0, zone)
        });
    Ok(folded.to_vec())
}

/// Folded response and alias level of one stage on the output baseband.
#[derive(Debug, Clone, PartialEq)]
pub struct AliasProfile {
    /// First `nfft` bins of the stage frequency axis (input-rate Hz).
    pub frequencies: Vec<f64>,
    /// Magnitude of the baseband zone alone.
    pub baseband_magnitude: Vec<f64>,
    /// Sum of all zones folded onto the baseband.
    pub folded_magnitude: Vec<f64>,
    /// `folded_magnitude - baseband_magnitude`, linear.
    pub alias_level: Vec<f64>,
}

impl AliasProfile {
    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }

    pub fn folded_db(&self) -> Vec<f64> {
        spectrum::to_decibels(&self.folded_magnitude)
    }

    pub fn alias_level_db(&self) -> Vec<f64> {
        spectrum::to_decibels(&self.alias_level)
    }

    /// Highest alias level in dB over `[0, band_edge)`.
    ///
    /// Returns `None` when no bin falls inside the band.
    pub fn peak_alias_db(&self, band_edge: f64) -> Option<f64> {
        let inside: Vec<f64> = self
            .frequencies
            .iter()
            .zip(&self.alias_level)
            .take_while(|&(&f, _)| f < band_edge)
            .map(|(_, &a)| a)
            .collect();
        spectrum::to_decibels(&inside).into_iter().reduce(f64::max)
    }
}

/// Result of analyzing one decimating stage.
#[derive(Debug, Clone, PartialEq)]
pub struct StageAnalysis {
    /// Rate the stage filter runs at.
    pub input_rate: f64,
    /// Rate after the stage's decimation.
    pub output_rate: f64,
    pub decimation: usize,
    /// Taps scaled to unity DC gain.
    pub taps: Vec<f64>,
    /// Response over `[0, input_rate / 2)` at `nfft * decimation` bins.
    pub response: FrequencyResponse,
    pub alias: AliasProfile,
    /// Per bin of `response`: `true` when a later stage removes that
    /// frequency before the cascade output at the final rate.
    pub rejected_later: Vec<bool>,
}

impl StageAnalysis {
    /// Analyze a validated stage running at `input_rate` in a cascade that
    /// ends at `final_rate`.
    ///
    /// `final_rate` only affects [`StageAnalysis::rejected_later`].
    ///
    /// # Errors
    /// Returns `Error::Domain` for non-positive rates and `Error::InvalidSize`
    /// for an invalid configuration.
    pub fn compute(
        stage: &Stage,
        input_rate: f64,
        final_rate: f64,
        config: &AnalysisConfig,
    ) -> crate::Result<Self> {
        utils::valid_rate(input_rate, "input_rate")?;
        utils::valid_rate(final_rate, "final_rate")?;
        config.validate()?;

        let nfft = config.stage_bins;
        let decimation = stage.decimation();
        let n_points = nfft
            .checked_mul(decimation)
            .ok_or(crate::Error::InvalidSize {
                name: "stage_bins",
                value: nfft,
                reason: "stage_bins * decimation overflows",
            })?;

        let taps = stage.normalized_taps()?;
        let response = spectrum::freqz(&taps, input_rate, n_points)?;
        let magnitude = response.magnitude();

        let folded_magnitude = fold_aliases(&magnitude, nfft, decimation)?;
        let baseband_magnitude = magnitude[..nfft].to_vec();
        let alias_level = folded_magnitude
            .iter()
            .zip(&baseband_magnitude)
            .map(|(folded, base)| folded - base)
            .collect();

        let output_rate = input_rate / decimation as f64;
        let rejected_later =
            later_stage_rejection(response.frequencies(), input_rate, output_rate, final_rate);

        log::debug!(
            "stage analysis: {} taps, decimation {}, {} Hz -> {} Hz, {} bins",
            taps.len(),
            decimation,
            input_rate,
            output_rate,
            n_points
        );

        Ok(Self {
            input_rate,
            output_rate,
            decimation,
            taps,
            alias: AliasProfile {
                frequencies: response.frequencies()[..nfft].to_vec(),
                baseband_magnitude,
                folded_magnitude,
                alias_level,
            },
            response,
            rejected_later,
        })
    }
}

/// Analyze one stage given as raw taps and decimation factor.
///
/// # Errors
/// Returns `Error::InvalidStage` if `decimation < 1`, `taps` is empty,
/// non-finite or has zero DC gain, and `Error::Domain` if either rate is
/// not positive.
///
/// # Example
/// ```
/// use foldback::analysis::{AnalysisConfig, analyze_stage};
///
/// let cfg = AnalysisConfig::default();
/// let a = analyze_stage(&[1.0], 1, 48_000.0, 48_000.0, &cfg).unwrap();
/// assert!(a.alias.alias_level.iter().all(|&v| v == 0.0));
/// ```
pub fn analyze_stage(
    taps: &[f64],
    decimation: usize,
    input_rate: f64,
    final_rate: f64,
    config: &AnalysisConfig,
) -> crate::Result<StageAnalysis> {
    let stage = Stage::new(taps.to_vec(), decimation)?;
    StageAnalysis::compute(&stage, input_rate, final_rate, config)
}

fn same_rate(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * a.abs().max(b.abs())
}

/// Mark the bins of a stage response that never reach the cascade output.
///
/// For the last stage (`output_rate == final_rate`) everything above the
/// output Nyquist frequency is removed. For an earlier stage, only bins
/// within `final_rate / 2` of a multiple of `output_rate` fold onto the
/// final passband; every other bin is removed by a later stage.
fn later_stage_rejection(
    frequencies: &[f64],
    input_rate: f64,
    output_rate: f64,
    final_rate: f64,
) -> Vec<bool> {
    if same_rate(output_rate, final_rate) {
        return frequencies.iter().map(|&f| f > output_rate / 2.0).collect();
    }

    let half = final_rate / 2.0;
    let limit = input_rate + output_rate;
    frequencies
        .iter()
        .map(|&f| {
            let center = (f / output_rate).round() * output_rate;
            !(center < limit && (f - center).abs() < half)
        })
        .collect()
}
