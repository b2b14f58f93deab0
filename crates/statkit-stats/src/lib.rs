//! Step-by-step statistics for the statkit toolkit.
//!
//! Every computation in this crate returns a typed result record that can
//! render the derivation of each value, with the formula substituted by the
//! concrete numbers of the sample. The crate provides:
//!
//! - **Samples**: validated, read-only collections of finite observations
//! - **Descriptive statistics**: measures of center and spread
//! - **Percentiles**: linear-interpolation percentiles over sorted data
//! - **Five-number summary**: quartiles, IQR and outlier fences
//! - **Hypothesis testing**: the one-sample t-test
//! - **Explanations**: the textual trace of each calculation
//!
//! # Modules
//!
//! - [`sample`]: The [`Sample`] type and number parsing
//! - [`descriptive`]: Measures of center and spread
//! - [`percentiles`]: Percentile computation and storage
//! - [`summary`]: Five-number summary with outlier detection
//! - [`hypothesis`]: One-sample t-test
//! - [`explain`]: Rendering of calculation steps
//!
//! # Examples
//!
//! ## Computing measures of center
//!
//! ```
//! use statkit_stats::{Mode, Sample, descriptive};
//!
//! let sample = Sample::new([1.0, 1.0, 2.0, 3.0]).unwrap();
//! let center = descriptive::measures_of_center(&sample).unwrap();
//! assert_eq!(center.mean, 1.75);
//! assert_eq!(center.median, 1.5);
//! assert_eq!(center.mode, Mode::Values { values: vec![1.0], frequency: 2 });
//! ```
//!
//! ## Running a one-sample t-test
//!
//! ```
//! use statkit_stats::{Sample, hypothesis::{self, Alternative}};
//!
//! let sample: Sample = "85 92 78 88 95 82 79 91 87 84".parse().unwrap();
//! let result = hypothesis::one_sample_t_test(&sample, 85.0, 0.05, Alternative::TwoSided).unwrap();
//! assert_eq!(result.degrees_of_freedom, 9);
//! assert!(!result.reject_null);
//! ```
//!
//! ## Printing the derivation
//!
//! ```
//! use statkit_stats::{Explain as _, Sample, descriptive};
//!
//! let sample = Sample::new([2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
//! let spread = descriptive::measures_of_spread(&sample).unwrap();
//! println!("{}", spread.explanation());
//! ```

pub use self::{
    descriptive::{CenterMeasures, Mode, SpreadMeasures},
    explain::{Explain, Explanation},
    hypothesis::{Alternative, StatResult},
    sample::Sample,
    summary::FiveNumberSummary,
};

pub mod descriptive;
pub mod explain;
pub mod hypothesis;
pub mod percentiles;
pub mod sample;
pub mod summary;

/// Input that makes a statistic undefined or cannot be read as a sample.
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum InvalidInput {
    #[display("sample is empty")]
    EmptySample,
    #[display("value #{position} is not a finite number")]
    NonFinite { position: usize },
    #[display("cannot parse {token:?} as a number")]
    Parse { token: String },
    #[display("{statistic} needs at least {required} values, got {actual}")]
    TooFewValues {
        statistic: &'static str,
        required: usize,
        actual: usize,
    },
    #[display("sample has zero variance, so the {statistic} is undefined")]
    ZeroVariance { statistic: &'static str },
    #[display("significance level must be between 0 and 1 (exclusive), got {alpha}")]
    InvalidAlpha { alpha: f64 },
    #[display("{name} must be a finite number")]
    NonFiniteParameter { name: &'static str },
    #[display("{statistic} overflows the range of a 64-bit float")]
    Overflow { statistic: &'static str },
}
