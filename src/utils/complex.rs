use num_complex::Complex64;

/// Magnitudes of a complex sequence.
///
/// # Arguments
/// * `values` - Complex samples
///
/// # Returns
/// `|x|` for every element, in order
pub fn magnitudes(values: &[Complex64]) -> Vec<f64> {
    values.iter().map(|v| v.norm()).collect()
}

/// Multiply `other` pointwise into the leading entries of `acc`.
///
/// Only `min(acc.len(), other.len())` entries are touched; the tail of the
/// longer sequence is left as it was.
pub fn multiply_into(acc: &mut [Complex64], other: &[Complex64]) {
    for (a, b) in acc.iter_mut().zip(other) {
        *a *= *b;
    }
}
