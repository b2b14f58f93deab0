use std::{fmt, str::FromStr};

use crate::InvalidInput;

/// An ordered, non-empty collection of finite observations.
///
/// A `Sample` is validated once on construction and is read-only afterwards,
/// so every statistic in this crate can rely on `n >= 1` and finite values.
///
/// # Examples
///
/// ```
/// use statkit_stats::Sample;
///
/// let sample = Sample::new([3.0, 1.0, 2.0]).unwrap();
/// assert_eq!(sample.len(), 3);
/// assert_eq!(sample.sorted(), vec![1.0, 2.0, 3.0]);
///
/// let parsed: Sample = "3, 1 2".parse().unwrap();
/// assert_eq!(parsed, sample);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    values: Vec<f64>,
}

impl Sample {
    /// Builds a sample from the given values.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidInput::EmptySample`] if there are no values and
    /// [`InvalidInput::NonFinite`] if any value is NaN or infinite.
    pub fn new<I>(values: I) -> Result<Self, InvalidInput>
    where
        I: IntoIterator<Item = f64>,
    {
        let values = values.into_iter().collect::<Vec<_>>();
        if values.is_empty() {
            return Err(InvalidInput::EmptySample);
        }
        if let Some(index) = values.iter().position(|v| !v.is_finite()) {
            return Err(InvalidInput::NonFinite {
                position: index + 1,
            });
        }
        Ok(Self { values })
    }

    /// Parses whitespace and/or comma separated numbers.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidInput::Parse`] for the first token that is not a
    /// number, and the errors of [`Sample::new`] otherwise.
    pub fn parse(text: &str) -> Result<Self, InvalidInput> {
        let values = text
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|token| !token.is_empty())
            .map(parse_value)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(values)
    }

    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always `false`: a sample holds at least one value.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns a copy of the values in ascending order.
    #[must_use]
    pub fn sorted(&self) -> Vec<f64> {
        let mut sorted = self.values.clone();
        sorted.sort_by(f64::total_cmp);
        sorted
    }

    #[must_use]
    pub fn sum(&self) -> f64 {
        self.values.iter().sum()
    }

    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn mean(&self) -> f64 {
        self.sum() / self.len() as f64
    }

    #[must_use]
    pub fn min(&self) -> f64 {
        self.values.iter().copied().fold(f64::INFINITY, f64::min)
    }

    #[must_use]
    pub fn max(&self) -> f64 {
        self.values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }
}

impl AsRef<[f64]> for Sample {
    fn as_ref(&self) -> &[f64] {
        &self.values
    }
}

impl FromStr for Sample {
    type Err = InvalidInput;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Sample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_values(&self.values))
    }
}

/// Parses a single finite number, trimming surrounding whitespace.
///
/// # Errors
///
/// Returns [`InvalidInput::Parse`] if the token is not a finite number.
///
/// # Examples
///
/// ```
/// use statkit_stats::sample::parse_value;
///
/// assert_eq!(parse_value(" -2.5 "), Ok(-2.5));
/// assert!(parse_value("abc").is_err());
/// assert!(parse_value("inf").is_err());
/// ```
pub fn parse_value(token: &str) -> Result<f64, InvalidInput> {
    let trimmed = token.trim();
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(InvalidInput::Parse {
            token: trimmed.to_owned(),
        }),
    }
}

/// Formats values as `[a, b, c]` using the shortest round-trip notation.
///
/// # Examples
///
/// ```
/// use statkit_stats::sample::format_values;
///
/// assert_eq!(format_values(&[85.0, 92.5, -1.0]), "[85, 92.5, -1]");
/// ```
#[must_use]
pub fn format_values(values: &[f64]) -> String {
    let items = values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    format!("[{items}]")
}
