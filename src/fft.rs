use num_complex::Complex64;
use realfft::RealFftPlanner;

/// Compute the real-to-complex FFT (rfft) of a real-valued input.
///
/// Returns only the non-redundant half of the spectrum (due to symmetry for
/// real inputs).
///
/// # Arguments
/// * `input` - Real-valued input signal
///
/// # Returns
/// Complex FFT output of length input.len() / 2 + 1
///
/// # Example
/// ```
/// use foldback::fft::rfft;
///
/// let signal = vec![1.0f64; 1024];
/// let spectrum = rfft(&signal).unwrap();
/// assert_eq!(spectrum.len(), 513); // 1024/2 + 1
/// ```
pub fn rfft(input: &[f64]) -> crate::Result<Vec<Complex64>> {
    if input.is_empty() {
        return Ok(Vec::new());
    }
    let len = input.len();
    let mut planner = RealFftPlanner::<f64>::new();
    let r2c = planner.plan_fft_forward(len);
    let mut in_buf = input.to_vec();
    let mut out_buf = r2c.make_output_vec();
    r2c.process(&mut in_buf, &mut out_buf)
        .map_err(|e| crate::Error::Transform(e.to_string()))?;
    Ok(out_buf)
}

/// Compute the `n_fft`-point rfft of `input`, padding or wrapping it to length.
///
/// Inputs shorter than `n_fft` are zero-padded. Longer inputs are wrapped
/// (sample `i` accumulates into slot `i % n_fft`), which leaves the DFT at
/// the `n_fft` grid frequencies unchanged. The result is therefore the exact
/// DTFT of `input` sampled at `k / n_fft` cycles per sample.
///
/// # Arguments
/// * `input` - Real-valued sequence of any length
/// * `n_fft` - Transform length (must be > 0)
///
/// # Returns
/// Complex spectrum of length n_fft / 2 + 1
pub fn rfft_wrapped(input: &[f64], n_fft: usize) -> crate::Result<Vec<Complex64>> {
    crate::utils::valid_bins(n_fft, "n_fft")?;
    let mut buffer = vec![0.0f64; n_fft];
    for (i, &x) in input.iter().enumerate() {
        buffer[i % n_fft] += x;
    }
    rfft(&buffer)
}
