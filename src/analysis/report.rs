use super::{AnalysisConfig, CascadeAnalysis, StageAnalysis, compose_cascade};
use crate::filters;
use crate::spectrum::{self, FrequencyResponse};
use crate::stage::Cascade;

/// Everything known about a cascade: per-stage alias analysis, the
/// frequency-domain composition and the single-rate equivalent filter.
#[derive(Debug, Clone, PartialEq)]
pub struct CascadeReport {
    /// One entry per stage, each at its own input rate.
    pub stages: Vec<StageAnalysis>,
    pub composition: CascadeAnalysis,
    /// Normalized taps of the equivalent filter at the input rate.
    pub equivalent_taps: Vec<f64>,
    /// Response of `equivalent_taps` on the composition's starting grid.
    pub equivalent_response: FrequencyResponse,
}

impl CascadeReport {
    /// Rate at the cascade output.
    pub fn output_rate(&self) -> f64 {
        self.composition.combined.sample_rate
    }

    /// Peak-to-peak ripple in dB of the composed response over `[0, band_edge)`.
    pub fn passband_ripple_db(&self, band_edge: f64) -> Option<f64> {
        self.composition
            .combined
            .response
            .passband_ripple_db(band_edge)
    }

    /// Worst alias level in dB over `[0, band_edge)` across all stages.
    pub fn peak_alias_db(&self, band_edge: f64) -> Option<f64> {
        self.stages
            .iter()
            .filter_map(|s| s.alias.peak_alias_db(band_edge))
            .reduce(f64::max)
    }
}

/// Analyze a whole cascade.
///
/// Each stage is analyzed at the rate it runs at, against the cascade's
/// output rate; the composition and the equivalent filter are computed with
/// the same configuration.
///
/// # Example
/// ```
/// use foldback::{AnalysisConfig, Cascade, analyze_cascade};
///
/// let cascade = Cascade::from_pairs(
///     vec![(vec![1.0; 8], 4), (vec![1.0, 2.0, 1.0], 2)],
///     3_072_000.0,
/// )
/// .unwrap();
/// let report = analyze_cascade(&cascade, &AnalysisConfig::default()).unwrap();
/// assert_eq!(report.stages.len(), 2);
/// assert_eq!(report.output_rate(), 384_000.0);
/// ```
pub fn analyze_cascade(cascade: &Cascade, config: &AnalysisConfig) -> crate::Result<CascadeReport> {
    config.validate()?;
    let final_rate = cascade.output_rate();

    let stages = cascade
        .stages()
        .iter()
        .zip(cascade.stage_rates())
        .map(|(stage, rate)| StageAnalysis::compute(stage, rate, final_rate, config))
        .collect::<crate::Result<Vec<_>>>()?;

    let composition = compose_cascade(cascade.stages(), cascade.input_rate(), config)?;

    let equivalent_taps = filters::equivalent_filter(cascade.stages())?;
    let equivalent_response =
        spectrum::freqz(&equivalent_taps, cascade.input_rate(), config.cascade_bins)?;

    log::info!(
        "analyzed {} stages: {} Hz -> {} Hz, equivalent filter {} taps",
        cascade.len(),
        cascade.input_rate(),
        final_rate,
        equivalent_taps.len()
    );

    Ok(CascadeReport {
        stages,
        composition,
        equivalent_taps,
        equivalent_response,
    })
}
