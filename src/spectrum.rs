//! Frequency responses of finite tap sequences and dB conversion.

use crate::fft;
use num_complex::Complex64;

/// Amplitude floor used by [`to_decibels`]: maps 0 to -300 dB.
pub const DEFAULT_AMIN: f64 = 1e-15;

/// A sampled complex frequency response with its frequency axis in Hz.
///
/// `frequencies` is non-decreasing and always has the same length as
/// `values`.
#[derive(Debug, Clone, PartialEq)]
pub struct FrequencyResponse {
    frequencies: Vec<f64>,
    values: Vec<Complex64>,
}

impl FrequencyResponse {
    /// Pair a frequency axis with response values.
    ///
    /// # Errors
    /// Returns `Error::InvalidSize` if the lengths differ and
    /// `Error::Domain` if the axis decreases anywhere.
    pub fn new(frequencies: Vec<f64>, values: Vec<Complex64>) -> crate::Result<Self> {
        if frequencies.len() != values.len() {
            return Err(crate::Error::InvalidSize {
                name: "values",
                value: values.len(),
                reason: "must match the frequency axis length",
            });
        }
        if let Some(w) = frequencies.windows(2).find(|w| w[1] < w[0] || w[1].is_nan()) {
            return Err(crate::Error::Domain {
                name: "frequencies",
                value: w[1],
                reason: "frequency axis must be non-decreasing",
            });
        }
        Ok(Self {
            frequencies,
            values,
        })
    }

    pub fn frequencies(&self) -> &[f64] {
        &self.frequencies
    }

    pub fn values(&self) -> &[Complex64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// `|H(f)|` at every bin.
    pub fn magnitude(&self) -> Vec<f64> {
        crate::utils::magnitudes(&self.values)
    }

    /// `20 log10 |H(f)|` at every bin, floored at [`DEFAULT_AMIN`].
    pub fn magnitude_db(&self) -> Vec<f64> {
        to_decibels(&self.magnitude())
    }

    /// Keep only the first `n` bins (or all of them if there are fewer).
    pub fn truncated(&self, n: usize) -> Self {
        let n = n.min(self.len());
        Self {
            frequencies: self.frequencies[..n].to_vec(),
            values: self.values[..n].to_vec(),
        }
    }

    /// Peak-to-peak variation in dB of the response over `[0, band_edge)`.
    ///
    /// Returns `None` when no bin falls inside the band.
    pub fn passband_ripple_db(&self, band_edge: f64) -> Option<f64> {
        let mags: Vec<f64> = self
            .frequencies
            .iter()
            .zip(&self.values)
            .take_while(|&(&f, _)| f < band_edge)
            .map(|(_, v)| v.norm())
            .collect();
        if mags.is_empty() {
            return None;
        }
        let db = to_decibels(&mags);
        let max = db.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let min = db.iter().copied().fold(f64::INFINITY, f64::min);
        Some(max - min)
    }
}

/// Compute the frequency response of a FIR filter.
///
/// Evaluates `H(f) = sum_n taps[n] * exp(-j 2 pi f n / sample_rate)` at
/// `n_points` equally spaced frequencies `k * sample_rate / (2 * n_points)`,
/// i.e. over the half band `[0, sample_rate / 2)`.
///
/// # Arguments
/// * `taps` - FIR coefficients
/// * `sample_rate` - Rate the taps run at, in Hz
/// * `n_points` - Number of frequency points
///
/// # Errors
/// Returns an error if the taps are empty or non-finite, the rate is not
/// positive, or `n_points` is zero.
///
/// # Example
/// ```
/// use foldback::spectrum::freqz;
///
/// let response = freqz(&[0.5, 0.5], 48_000.0, 512).unwrap();
/// assert_eq!(response.len(), 512);
/// assert!((response.magnitude()[0] - 1.0).abs() < 1e-12);
/// assert!(response.frequencies()[511] < 24_000.0);
/// ```
pub fn freqz(taps: &[f64], sample_rate: f64, n_points: usize) -> crate::Result<FrequencyResponse> {
    crate::utils::valid_taps(taps)?;
    crate::utils::valid_rate(sample_rate, "sample_rate")?;
    crate::utils::valid_bins(n_points, "n_points")?;

    let n_fft = 2 * n_points;
    let mut values = fft::rfft_wrapped(taps, n_fft)?;
    values.truncate(n_points);

    let bin_hz = sample_rate / n_fft as f64;
    let frequencies = (0..n_points).map(|k| k as f64 * bin_hz).collect();

    Ok(FrequencyResponse {
        frequencies,
        values,
    })
}

/// Convert amplitudes to dB scale.
/// `S_db = 20 * log10(max(S, amin))`
pub fn amplitude_to_db(amplitude: &[f64], amin: f64) -> Vec<f64> {
    amplitude
        .iter()
        .map(|&a| 20.0 * a.abs().max(amin).log10())
        .collect()
}

/// Convert amplitudes to dB with the default floor.
///
/// A zero amplitude maps to `20 * log10(DEFAULT_AMIN)` (-300 dB) instead of
/// negative infinity.
pub fn to_decibels(amplitude: &[f64]) -> Vec<f64> {
    amplitude_to_db(amplitude, DEFAULT_AMIN)
}

/// Convert dB scale back to amplitude.
/// `S = 10^(S_db / 20)`
pub fn db_to_amplitude(db: &[f64]) -> Vec<f64> {
    db.iter().map(|&v| 10.0f64.powf(v / 20.0)).collect()
}
