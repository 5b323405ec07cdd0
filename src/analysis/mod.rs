//! Stage alias analysis and cascade response composition.
//!
//! - [`alias`] — per-stage response, decimation alias folding and the
//!   "rejected by a later stage" mask.
//! - [`cascade`] — the running product of stage responses across shrinking
//!   `(sample rate, bins)` grids.
//! - [`report`] — everything above for a whole [`Cascade`](crate::Cascade).

pub mod alias;
pub mod cascade;
pub mod report;

pub use alias::{AliasProfile, StageAnalysis, analyze_stage, fold_aliases, fold_block};
pub use cascade::{CascadeAnalysis, CascadeResponse, CascadeState, RateGrid, compose_cascade};
pub use report::{CascadeReport, analyze_cascade};

/// How much of the composed cascade response is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CombinedSpan {
    /// Truncate to the bins left after the last stage's decimation, i.e. the
    /// cascade output band `[0, output_rate / 2)`.
    #[default]
    FinalBand,
    /// Keep every bin the last stage was evaluated on, i.e.
    /// `[0, last_stage_input_rate / 2)`.
    LastStageBand,
}

/// Resolution and reporting knobs shared by the analysis entry points.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    /// Bins per output Nyquist zone in single-stage alias analysis.
    pub stage_bins: usize,
    /// Bins of the input-rate half band the cascade composition starts from.
    pub cascade_bins: usize,
    /// Span of the reported composed response.
    pub combined_span: CombinedSpan,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            stage_bins: 1024,
            cascade_bins: 32768,
            combined_span: CombinedSpan::FinalBand,
        }
    }
}

impl AnalysisConfig {
    /// Check that both resolutions are non-zero.
    pub fn validate(&self) -> crate::Result<()> {
        crate::utils::valid_bins(self.stage_bins, "stage_bins")?;
        crate::utils::valid_bins(self.cascade_bins, "cascade_bins")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let cfg = AnalysisConfig::default();
        assert_eq!(cfg.stage_bins, 1024);
        assert_eq!(cfg.cascade_bins, 32768);
        assert_eq!(cfg.combined_span, CombinedSpan::FinalBand);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_config_rejects_zero_bins() {
        let cfg = AnalysisConfig {
            stage_bins: 0,
            ..AnalysisConfig::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(crate::Error::InvalidSize {
                name: "stage_bins",
                ..
            })
        ));
    }
}
