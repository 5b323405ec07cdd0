mod complex;
mod validation;

// Complex number operations
pub use complex::{magnitudes, multiply_into};

// Validation operations
pub use validation::{valid_bins, valid_decimation, valid_rate, valid_taps};
