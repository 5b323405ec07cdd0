//! Cascade stages and their sample-rate bookkeeping.

use crate::filters;
use crate::utils;

/// One decimating FIR stage: a tap set followed by keep-1-in-`decimation`.
///
/// Construction validates the stage, so a `Stage` value is always
/// analyzable: taps are non-empty, finite and have a non-zero DC gain, and
/// the decimation factor is at least 1.
#[derive(Debug, Clone, PartialEq)]
pub struct Stage {
    taps: Vec<f64>,
    decimation: usize,
}

impl Stage {
    /// Create a validated stage.
    ///
    /// # Errors
    /// Returns `Error::InvalidStage` if `decimation == 0`, `taps` is empty or
    /// non-finite, or the taps cannot be normalized (zero DC gain).
    ///
    /// # Example
    /// ```
    /// use foldback::Stage;
    ///
    /// let stage = Stage::new(vec![0.25, 0.5, 0.25], 2).unwrap();
    /// assert_eq!(stage.decimation(), 2);
    ///
    /// assert!(Stage::new(vec![0.0], 1).is_err());
    /// assert!(Stage::new(vec![1.0], 0).is_err());
    /// ```
    pub fn new(taps: Vec<f64>, decimation: usize) -> crate::Result<Self> {
        utils::valid_decimation(decimation)?;
        filters::dc_gain(&taps)?;
        Ok(Self { taps, decimation })
    }

    /// Coefficients as supplied (not normalized).
    pub fn taps(&self) -> &[f64] {
        &self.taps
    }

    pub fn decimation(&self) -> usize {
        self.decimation
    }

    /// Coefficients scaled to unity DC gain.
    pub fn normalized_taps(&self) -> crate::Result<Vec<f64>> {
        filters::normalize(&self.taps)
    }
}

/// An ordered list of stages running from `input_rate` downwards.
///
/// Stage 0 runs first. The rate entering stage `k` is `input_rate` divided
/// by the decimation factors of stages `0..k`.
#[derive(Debug, Clone, PartialEq)]
pub struct Cascade {
    stages: Vec<Stage>,
    input_rate: f64,
}

impl Cascade {
    /// Create a cascade.
    ///
    /// # Errors
    /// Returns `Error::EmptyCascade` if `stages` is empty and `Error::Domain`
    /// if `input_rate` is not a positive finite number.
    pub fn new(stages: Vec<Stage>, input_rate: f64) -> crate::Result<Self> {
        if stages.is_empty() {
            return Err(crate::Error::EmptyCascade);
        }
        utils::valid_rate(input_rate, "input_rate")?;
        Ok(Self { stages, input_rate })
    }

    /// Build a cascade from raw `(taps, decimation)` pairs.
    pub fn from_pairs<I>(pairs: I, input_rate: f64) -> crate::Result<Self>
    where
        I: IntoIterator<Item = (Vec<f64>, usize)>,
    {
        let stages = pairs
            .into_iter()
            .enumerate()
            .map(|(k, (taps, decimation))| {
                Stage::new(taps, decimation).map_err(|e| match e {
                    crate::Error::InvalidStage { reason } => {
                        crate::Error::invalid_stage(format!("stage {k}: {reason}"))
                    }
                    other => other,
                })
            })
            .collect::<crate::Result<Vec<_>>>()?;
        Self::new(stages, input_rate)
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    pub fn input_rate(&self) -> f64 {
        self.input_rate
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Construction rejects empty cascades, so this is never `true`.
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Product of all decimation factors (saturating).
    pub fn total_decimation(&self) -> usize {
        self.stages
            .iter()
            .fold(1usize, |acc, s| acc.saturating_mul(s.decimation))
    }

    /// Rate entering each stage, in stage order.
    pub fn stage_rates(&self) -> Vec<f64> {
        let mut fs = self.input_rate;
        self.stages
            .iter()
            .map(|s| {
                let rate = fs;
                fs /= s.decimation as f64;
                rate
            })
            .collect()
    }

    /// Rate leaving the last stage.
    pub fn output_rate(&self) -> f64 {
        self.stages
            .iter()
            .fold(self.input_rate, |fs, s| fs / s.decimation as f64)
    }
}
