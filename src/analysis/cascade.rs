//! Frequency-domain composition of a decimating cascade.
//!
//! Every stage's response is sampled on the grid of the rate it actually
//! runs at. The rate shrinks exactly by each decimation factor while the bin
//! count is floor-divided, so grids share one bin spacing only while every
//! shrink before the last stage is exact (`bins % decimation == 0`). Then
//! bin `k` of every stage is the same physical frequency and the cascade
//! response is the pointwise product over the bins each stage covers. An
//! inexact shrink widens the spacing of later grids slightly and is logged
//! as a warning.

use super::{AnalysisConfig, CombinedSpan};
use crate::spectrum::{self, FrequencyResponse};
use crate::stage::Stage;
use crate::utils;
use num_complex::Complex64;

/// Sample rate and bin count of one evaluation grid over `[0, sample_rate / 2)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RateGrid {
    pub sample_rate: f64,
    pub bins: usize,
}

/// Running state of a cascade composition.
///
/// Holds the accumulated complex product plus the grid the *next* stage
/// will be evaluated on. Applying a stage evaluates it on that grid,
/// multiplies it in, then shrinks the grid by the stage's decimation.
#[derive(Debug, Clone, PartialEq)]
pub struct CascadeState {
    grid: RateGrid,
    accumulator: Vec<Complex64>,
    last_axis: Vec<f64>,
    stages_applied: usize,
}

impl CascadeState {
    /// Start a composition at `input_rate` with `bins` bins of resolution.
    ///
    /// # Errors
    /// Returns `Error::Domain` for a non-positive rate and
    /// `Error::InvalidSize` for zero bins.
    pub fn new(input_rate: f64, bins: usize) -> crate::Result<Self> {
        utils::valid_rate(input_rate, "input_rate")?;
        utils::valid_bins(bins, "bins")?;
        Ok(Self {
            grid: RateGrid {
                sample_rate: input_rate,
                bins,
            },
            accumulator: vec![Complex64::new(1.0, 0.0); bins],
            last_axis: Vec::new(),
            stages_applied: 0,
        })
    }

    /// Grid the next stage will be evaluated on.
    pub fn grid(&self) -> RateGrid {
        self.grid
    }

    /// Full accumulator, at the starting resolution.
    ///
    /// Only the leading bins have been multiplied by every applied stage;
    /// see [`CascadeState::response`].
    pub fn accumulator(&self) -> &[Complex64] {
        &self.accumulator
    }

    pub fn stages_applied(&self) -> usize {
        self.stages_applied
    }

    /// Evaluate `stage` on the current grid, fold it into the product and
    /// shrink the grid.
    ///
    /// Returns the new state and the stage's own response.
    ///
    /// # Errors
    /// Returns `Error::InvalidSize` when the grid has already shrunk to zero
    /// bins.
    pub fn apply(mut self, stage: &Stage) -> crate::Result<(Self, FrequencyResponse)> {
        let RateGrid { sample_rate, bins } = self.grid;
        if bins == 0 {
            return Err(crate::Error::InvalidSize {
                name: "bins",
                value: 0,
                reason: "grid collapsed; increase the starting resolution",
            });
        }

        let taps = stage.normalized_taps()?;
        let response = spectrum::freqz(&taps, sample_rate, bins)?;
        utils::multiply_into(&mut self.accumulator[..bins], response.values());

        let decimation = stage.decimation();
        if bins % decimation != 0 {
            log::warn!(
                "cascade stage {}: {} bins not divisible by decimation {}, later grids drift in spacing",
                self.stages_applied,
                bins,
                decimation
            );
        }
        self.grid = RateGrid {
            sample_rate: sample_rate / decimation as f64,
            bins: bins / decimation,
        };
        self.last_axis = response.frequencies().to_vec();
        self.stages_applied += 1;

        log::debug!(
            "cascade stage {}: evaluated {} bins at {} Hz, next grid {} bins at {} Hz",
            self.stages_applied - 1,
            bins,
            sample_rate,
            self.grid.bins,
            self.grid.sample_rate
        );

        Ok((self, response))
    }

    /// The composed response so far, truncated to `span`.
    ///
    /// # Errors
    /// Returns `Error::EmptyCascade` if no stage has been applied.
    pub fn response(&self, span: CombinedSpan) -> crate::Result<CascadeResponse> {
        if self.stages_applied == 0 {
            return Err(crate::Error::EmptyCascade);
        }
        let n = match span {
            CombinedSpan::FinalBand => self.grid.bins,
            CombinedSpan::LastStageBand => self.last_axis.len(),
        };
        let response = FrequencyResponse::new(
            self.last_axis[..n].to_vec(),
            self.accumulator[..n].to_vec(),
        )?;
        Ok(CascadeResponse {
            response,
            sample_rate: self.grid.sample_rate,
            bins: self.grid.bins,
        })
    }
}

/// The composed cascade response with the grid valid after the last stage.
#[derive(Debug, Clone, PartialEq)]
pub struct CascadeResponse {
    pub response: FrequencyResponse,
    /// Rate after the last stage's decimation.
    pub sample_rate: f64,
    /// Bins left after the last stage's shrink.
    pub bins: usize,
}

/// Output of [`compose_cascade`].
#[derive(Debug, Clone, PartialEq)]
pub struct CascadeAnalysis {
    pub combined: CascadeResponse,
    /// Each stage's response on the grid it was evaluated on.
    pub stages: Vec<FrequencyResponse>,
    /// The grid each stage was evaluated on, in stage order.
    pub grids: Vec<RateGrid>,
}

/// Compose the frequency response of a whole cascade.
///
/// Starts from `config.cascade_bins` bins at `input_rate`, then for each
/// stage in order: evaluate its normalized taps on the current grid,
/// multiply into the running product, shrink rate and bins by its
/// decimation. The stages are processed strictly in order; each grid
/// depends on the previous stage's shrink.
///
/// # Errors
/// Returns `Error::EmptyCascade` for no stages, `Error::Domain` for a
/// non-positive rate and `Error::InvalidSize` if the resolution is smaller
/// than the total decimation.
///
/// # Example
/// ```
/// use foldback::Stage;
/// use foldback::analysis::{AnalysisConfig, compose_cascade};
///
/// let stages = vec![
///     Stage::new(vec![1.0; 8], 4).unwrap(),
///     Stage::new(vec![1.0; 4], 2).unwrap(),
/// ];
/// let cfg = AnalysisConfig::default();
/// let out = compose_cascade(&stages, 3_072_000.0, &cfg).unwrap();
/// assert_eq!(out.combined.sample_rate, 384_000.0);
/// assert_eq!(out.combined.bins, 32768 / 8);
/// assert_eq!(out.combined.response.len(), 32768 / 8);
/// ```
pub fn compose_cascade(
    stages: &[Stage],
    input_rate: f64,
    config: &AnalysisConfig,
) -> crate::Result<CascadeAnalysis> {
    if stages.is_empty() {
        return Err(crate::Error::EmptyCascade);
    }
    utils::valid_rate(input_rate, "input_rate")?;
    config.validate()?;

    let total = stages
        .iter()
        .fold(1usize, |acc, s| acc.saturating_mul(s.decimation()));
    if config.cascade_bins < total {
        return Err(crate::Error::InvalidSize {
            name: "cascade_bins",
            value: config.cascade_bins,
            reason: "smaller than the total decimation of the cascade",
        });
    }

    let start = CascadeState::new(input_rate, config.cascade_bins)?;
    let (state, responses, grids) = stages.iter().try_fold(
        (start, Vec::with_capacity(stages.len()), Vec::with_capacity(stages.len())),
        |(state, mut responses, mut grids), stage| {
            grids.push(state.grid());
            let (state, response) = state.apply(stage)?;
            responses.push(response);
            Ok::<_, crate::Error>((state, responses, grids))
        },
    )?;

    Ok(CascadeAnalysis {
        combined: state.response(config.combined_span)?,
        stages: responses,
        grids,
    })
}
