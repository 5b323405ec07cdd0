//! Tap normalization and single-rate equivalents of multirate cascades.
//!
//! A cascade `h0 -> v d0 -> h1 -> v d1 -> ...` is equivalent (up to the
//! final decimation) to one filter running at the input rate. By the noble
//! identity, moving `h1` in front of `v d0` turns it into `h1` zero-stuffed
//! by `d0`, so the whole chain collapses by repeated zero-stuffing and
//! convolution from the last stage backwards.

use crate::stage::Stage;
use crate::utils;

/// Sum of the taps, i.e. the filter's gain at DC.
///
/// # Errors
/// Returns `Error::InvalidStage` if the taps are empty or non-finite, or if
/// the DC gain vanishes relative to the tap magnitudes (the filter cannot be
/// normalized).
pub fn dc_gain(taps: &[f64]) -> crate::Result<f64> {
    utils::valid_taps(taps)?;
    let sum: f64 = taps.iter().sum();
    let l1: f64 = taps.iter().map(|t| t.abs()).sum();
    if l1 == 0.0 {
        return Err(crate::Error::invalid_stage("taps are all zero"));
    }
    if sum.abs() <= f64::EPSILON * l1 {
        return Err(crate::Error::invalid_stage(
            "taps have zero gain at DC and cannot be normalized",
        ));
    }
    Ok(sum)
}

/// Scale taps so the response at DC is exactly 1.
///
/// Length and shape are unchanged; only the overall gain moves.
///
/// # Example
/// ```
/// use foldback::filters::normalize;
///
/// let taps = normalize(&[1.0, 2.0, 1.0]).unwrap();
/// assert_eq!(taps, vec![0.25, 0.5, 0.25]);
/// ```
pub fn normalize(taps: &[f64]) -> crate::Result<Vec<f64>> {
    let gain = dc_gain(taps)?;
    Ok(taps.iter().map(|t| t / gain).collect())
}

fn convolve_full(x: &[f64], h: &[f64]) -> Vec<f64> {
    if x.is_empty() || h.is_empty() {
        return Vec::new();
    }
    let mut out = vec![0.0; x.len() + h.len() - 1];
    for (i, &xv) in x.iter().enumerate() {
        for (j, &hv) in h.iter().enumerate() {
            out[i + j] += xv * hv;
        }
    }
    out
}

/// Zero-stuff by `factor`: `factor - 1` zeros after every sample but the last.
fn upsample(x: &[f64], factor: usize) -> Vec<f64> {
    if x.is_empty() {
        return Vec::new();
    }
    let factor = factor.max(1);
    let mut out = vec![0.0; (x.len() - 1) * factor + 1];
    for (i, &v) in x.iter().enumerate() {
        out[i * factor] = v;
    }
    out
}

/// Combine a higher-rate stage with the decimated-rate filter that follows it.
///
/// `running` operates after a decimation by `decimation`; it is rate-expanded
/// and convolved with `earlier`, giving one filter at `earlier`'s rate.
///
/// # Example
/// ```
/// use foldback::filters::combined_filter;
///
/// let c = combined_filter(&[1.0, 1.0], &[1.0, 2.0], 2);
/// assert_eq!(c, vec![1.0, 1.0, 2.0, 2.0]);
/// ```
pub fn combined_filter(earlier: &[f64], running: &[f64], decimation: usize) -> Vec<f64> {
    convolve_full(earlier, &upsample(running, decimation))
}

/// Single-rate equivalent of a whole cascade, normalized to unity DC gain.
///
/// Folds [`combined_filter`] from the last stage back to the first, so it is
/// called `stages.len() - 1` times. The result runs at the first stage's
/// input rate.
///
/// # Errors
/// Returns `Error::EmptyCascade` for no stages.
pub fn equivalent_filter(stages: &[Stage]) -> crate::Result<Vec<f64>> {
    let (last, earlier) = stages.split_last().ok_or(crate::Error::EmptyCascade)?;
    let combined = earlier.iter().rev().fold(last.taps().to_vec(), |running, stage| {
        combined_filter(stage.taps(), &running, stage.decimation())
    });
    log::debug!(
        "equivalent filter: {} stages -> {} taps",
        stages.len(),
        combined.len()
    );
    normalize(&combined)
}
