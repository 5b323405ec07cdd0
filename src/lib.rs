//! Frequency-response and alias analysis for multistage decimating FIR
//! cascades.
//!
//! Foldback takes an ordered list of `(taps, decimation)` stages, such as the
//! decimation chain behind a PDM microphone array, and reports how each stage
//! filters and aliases, and how the cascade behaves as a whole.
//!
//! # Features
//!
//! - **Stage analysis** — stage response over `D` output Nyquist zones, the
//!   folded (decimated) response, alias level, and which bins a later stage
//!   removes anyway
//! - **Cascade composition** — running product of stage responses, each
//!   evaluated on the grid of the rate it runs at
//! - **Equivalent filter** — single-rate taps of the whole cascade by
//!   zero-stuffing and convolution
//! - **Spectra** — FIR frequency response (`freqz`) and dB conversion
//!
//! # Quick Start
//!
//! ```rust
//! use foldback::{AnalysisConfig, Cascade, analyze_cascade};
//!
//! // 3.072 MHz in, decimate by 4 then by 2
//! let cascade = Cascade::from_pairs(
//!     vec![(vec![1.0; 16], 4), (vec![1.0, 2.0, 2.0, 1.0], 2)],
//!     3_072_000.0,
//! )
//! .unwrap();
//!
//! let report = analyze_cascade(&cascade, &AnalysisConfig::default()).unwrap();
//! assert_eq!(report.output_rate(), 384_000.0);
//! assert_eq!(report.composition.combined.bins, 32768 / 8);
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`analysis`] | Stage alias analysis, cascade composition, reports |
//! | [`stage`] | `Stage` and `Cascade` value types and rate bookkeeping |
//! | [`filters`] | Tap normalization, equivalent filter construction |
//! | [`spectrum`] | `freqz`, `FrequencyResponse`, dB conversion |
//! | [`fft`] | Real FFT helpers |
//! | [`utils`] | Validation and complex helpers |
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T>`], an alias for
//! `std::result::Result<T, Error>`. Malformed stages give
//! [`Error::InvalidStage`], non-positive rates [`Error::Domain`] and an
//! empty cascade [`Error::EmptyCascade`].
//!
//! # Logging
//!
//! The crate logs through the [`log`] facade (`debug` per evaluated stage,
//! `info` per cascade report) and never installs a logger itself.

#![forbid(unsafe_code)]

pub mod error;
pub use error::{Error, Result};

pub mod analysis;
pub mod fft;
pub mod filters;
pub mod spectrum;
pub mod stage;
pub mod utils;

pub use analysis::{AnalysisConfig, CombinedSpan, analyze_cascade, analyze_stage, compose_cascade};
pub use spectrum::FrequencyResponse;
pub use stage::{Cascade, Stage};
