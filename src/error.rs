/// Crate-level error type for the foldback cascade analysis library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A stage has malformed taps or decimation factor.
    #[error("invalid stage: {reason}")]
    InvalidStage { reason: String },

    /// A rate or level lies outside the domain the analysis is defined on.
    #[error("invalid `{name}`: got {value}, {reason}")]
    Domain {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    /// There are no stages to analyze.
    #[error("cascade has no stages")]
    EmptyCascade,

    /// An analysis resolution is zero or too small for the cascade.
    #[error("invalid size for `{name}`: {value} ({reason})")]
    InvalidSize {
        name: &'static str,
        value: usize,
        reason: &'static str,
    },

    /// The FFT backend rejected its buffers.
    #[error("spectral transform failed: {0}")]
    Transform(String),
}

impl Error {
    pub(crate) fn invalid_stage(reason: impl Into<String>) -> Self {
        Error::InvalidStage {
            reason: reason.into(),
        }
    }
}

/// Convenience Result type for foldback operations.
pub type Result<T> = std::result::Result<T, Error>;
