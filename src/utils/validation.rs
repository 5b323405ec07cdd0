/// Validate a tap sequence.
///
/// Checks that the taps satisfy the following conditions:
/// - The sequence is not empty
/// - All coefficients are finite (no NaN or Inf)
///
/// # Example
/// ```
/// use foldback::utils::valid_taps;
///
/// assert!(valid_taps(&[0.25, 0.5, 0.25]).is_ok());
/// assert!(valid_taps(&[]).is_err());
/// ```
pub fn valid_taps(taps: &[f64]) -> crate::Result<()> {
    if taps.is_empty() {
        return Err(crate::Error::invalid_stage("taps are empty"));
    }

    if let Some(pos) = taps.iter().position(|t| !t.is_finite()) {
        return Err(crate::Error::invalid_stage(format!(
            "tap {pos} is not finite ({})",
            taps[pos]
        )));
    }

    Ok(())
}

/// Validate a decimation factor. Zero is the only invalid value for `usize`.
pub fn valid_decimation(decimation: usize) -> crate::Result<()> {
    if decimation == 0 {
        return Err(crate::Error::invalid_stage(
            "decimation factor must be at least 1",
        ));
    }
    Ok(())
}

/// Ensure a sample rate is finite and strictly positive.
///
/// # Arguments
/// * `rate` - Rate in Hz
/// * `name` - Name of the parameter (for error messages)
///
/// # Example
/// ```
/// use foldback::utils::valid_rate;
///
/// assert!(valid_rate(48_000.0, "input_rate").is_ok());
/// assert!(valid_rate(0.0, "input_rate").is_err());
/// assert!(valid_rate(f64::NAN, "input_rate").is_err());
/// ```
pub fn valid_rate(rate: f64, name: &'static str) -> crate::Result<()> {
    if !rate.is_finite() {
        return Err(crate::Error::Domain {
            name,
            value: rate,
            reason: "must be finite",
        });
    }
    if rate <= 0.0 {
        return Err(crate::Error::Domain {
            name,
            value: rate,
            reason: "must be > 0",
        });
    }
    Ok(())
}

/// Ensure an analysis resolution is non-zero.
pub fn valid_bins(bins: usize, name: &'static str) -> crate::Result<()> {
    if bins == 0 {
        return Err(crate::Error::InvalidSize {
            name,
            value: 0,
            reason: "must be > 0",
        });
    }
    Ok(())
}
