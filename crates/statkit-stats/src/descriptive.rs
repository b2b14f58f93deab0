//! Measures of center and spread.

use crate::{Explain, InvalidInput, Sample, sample::format_values};

/// The most frequent value(s) of a sample.
#[derive(Debug, Clone, PartialEq)]
pub enum Mode {
    /// Every value appears exactly once.
    ///
    /// This includes a single-value sample, whose one value has frequency 1.
    /// Reporting that value as the mode ("appears 1 times") is the other
    /// common convention; statkit treats frequency 1 as no mode at all.
    NoMode,
    /// All values attaining the maximum frequency, ascending.
    Values { values: Vec<f64>, frequency: usize },
}

/// Mean, median and mode of a sample.
///
/// Produced by [`measures_of_center`].
#[derive(Debug, Clone)]
pub struct CenterMeasures {
    /// The sample values in their original order.
    pub values: Vec<f64>,
    /// The sample values sorted in ascending order.
    pub sorted: Vec<f64>,
    /// The number of values.
    pub n: usize,
    /// The sum of all values.
    pub sum: f64,
    /// The arithmetic mean `Σx / n`.
    pub mean: f64,
    /// The middle value, or the average of the two middle values for even `n`.
    pub median: f64,
    /// The most frequent value(s).
    pub mode: Mode,
}

/// Variance, standard deviation and range of a sample.
///
/// Variance and standard deviation use Bessel's correction (divide by `n - 1`).
/// Produced by [`measures_of_spread`].
#[derive(Debug, Clone)]
pub struct SpreadMeasures {
    /// The sample values in their original order.
    pub values: Vec<f64>,
    /// The number of values.
    pub n: usize,
    /// The arithmetic mean.
    pub mean: f64,
    /// `x - x̄` for each value, in sample order.
    pub deviations: Vec<f64>,
    /// `(x - x̄)²` for each value, in sample order.
    pub squared_deviations: Vec<f64>,
    /// `Σ(x - x̄)²`.
    pub sum_squared_deviations: f64,
    /// The sample variance `Σ(x - x̄)² / (n - 1)`.
    pub variance: f64,
    /// The sample standard deviation `√s²`.
    pub std_dev: f64,
    /// The smallest value.
    pub min: f64,
    /// The largest value.
    pub max: f64,
    /// `max - min`.
    pub range: f64,
}

/// Computes the mean, median and mode of a sample.
///
/// When every value is unique the mode is [`Mode::NoMode`] rather than the
/// whole sample.
///
/// # Examples
///
/// ```
/// # use statkit_stats::{Mode, Sample, descriptive::measures_of_center};
/// let center = measures_of_center(&Sample::new([1.0, 2.0, 3.0, 4.0]).unwrap());
/// let center = center.unwrap();
/// assert_eq!(center.mean, 2.5);
/// assert_eq!(center.median, 2.5);
/// assert_eq!(center.mode, Mode::NoMode);
/// ```
///
/// # Errors
///
/// Returns [`InvalidInput::Overflow`] if the sum of the values does not fit
/// in an `f64`.
pub fn measures_of_center(sample: &Sample) -> Result<CenterMeasures, InvalidInput> {
    let sum = sample.sum();
    if !sum.is_finite() {
        return Err(InvalidInput::Overflow { statistic: "sum" });
    }
    let sorted = sample.sorted();
    let n = sorted.len();
    let median = median_of_sorted(&sorted);
    let mode = mode_of_sorted(&sorted);

    Ok(CenterMeasures {
        values: sample.values().to_vec(),
        n,
        sum,
        mean: sample.mean(),
        median,
        mode,
        sorted,
    })
}

/// Computes the sample variance, standard deviation and range.
///
/// # Errors
///
/// Returns [`InvalidInput::TooFewValues`] for a single-value sample, where
/// the `n - 1` divisor is zero, and [`InvalidInput::Overflow`] if the sum,
/// the range or the variance does not fit in an `f64`.
///
/// # Examples
///
/// ```
/// # use statkit_stats::{Sample, descriptive::measures_of_spread};
/// let sample = Sample::new([2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
/// let spread = measures_of_spread(&sample).unwrap();
/// assert_eq!(spread.sum_squared_deviations, 32.0);
/// assert_eq!(spread.range, 7.0);
///
/// assert!(measures_of_spread(&Sample::new([1.0]).unwrap()).is_err());
/// ```
#[expect(clippy::cast_precision_loss)]
pub fn measures_of_spread(sample: &Sample) -> Result<SpreadMeasures, InvalidInput> {
    let n = sample.len();
    if n < 2 {
        return Err(InvalidInput::TooFewValues {
            statistic: "sample variance",
            required: 2,
            actual: n,
        });
    }

    if !sample.sum().is_finite() {
        return Err(InvalidInput::Overflow { statistic: "sum" });
    }
    let mean = sample.mean();
    let deviations = sample.values().iter().map(|x| x - mean).collect::<Vec<_>>();
    let squared_deviations = deviations.iter().map(|d| d.powi(2)).collect::<Vec<_>>();
    let sum_squared_deviations = squared_deviations.iter().sum::<f64>();
    let variance = sum_squared_deviations / (n - 1) as f64;
    if !variance.is_finite() {
        return Err(InvalidInput::Overflow {
            statistic: "sample variance",
        });
    }
    let min = sample.min();
    let max = sample.max();
    let range = max - min;
    if !range.is_finite() {
        return Err(InvalidInput::Overflow { statistic: "range" });
    }

    Ok(SpreadMeasures {
        values: sample.values().to_vec(),
        n,
        mean,
        deviations,
        squared_deviations,
        sum_squared_deviations,
        variance,
        std_dev: variance.sqrt(),
        min,
        max,
        range,
    })
}

/// Computes the Bessel-corrected standard deviation of a sample.
///
/// # Errors
///
/// Returns the errors of [`measures_of_spread`].
pub fn sample_std_dev(sample: &Sample) -> Result<f64, InvalidInput> {
    measures_of_spread(sample).map(|spread| spread.std_dev)
}

fn median_of_sorted(sorted: &[f64]) -> f64 {
    let n = sorted.len();
    if n % 2 == 0 {
        sorted[n / 2 - 1] / 2.0 + sorted[n / 2] / 2.0
    } else {
        sorted[n / 2]
    }
}

fn mode_of_sorted(sorted: &[f64]) -> Mode {
    let runs = sorted
        .chunk_by(|a, b| a == b)
        .map(|run| (run[0], run.len()))
        .collect::<Vec<_>>();
    let frequency = runs.iter().map(|(_, count)| *count).max().unwrap_or(0);
    if frequency <= 1 {
        return Mode::NoMode;
    }
    let values = runs
        .into_iter()
        .filter(|(_, count)| *count == frequency)
        .map(|(value, _)| value)
        .collect();
    Mode::Values { values, frequency }
}

impl Explain for CenterMeasures {
    fn title(&self) -> &'static str {
        "MEASURES OF CENTER"
    }

    fn steps(&self) -> Vec<String> {
        let n = self.n;
        let mut lines = vec![
            format!("Sample size: n = {n}"),
            format!("Data: {}", format_values(&self.values)),
            String::new(),
            "MEAN:".to_owned(),
            format!("x̄ = Σx/n = {}/{n} = {:.4}", self.sum, self.mean),
            String::new(),
            "MEDIAN:".to_owned(),
            format!("Sorted data: {}", format_values(&self.sorted)),
        ];
        if n % 2 == 0 {
            let (low, high) = (self.sorted[n / 2 - 1], self.sorted[n / 2]);
            lines.push(format!(
                "n is even: median = ({low} + {high})/2 = {:.4}",
                self.median
            ));
        } else {
            lines.push(format!(
                "n is odd: median = value at position {} = {:.4}",
                n / 2 + 1,
                self.median
            ));
        }
        lines.push(String::new());
        lines.push("MODE:".to_owned());
        lines.push(mode_line(&self.mode));
        lines
    }

    fn summary(&self) -> Vec<String> {
        vec![
            format!("n = {}", self.n),
            format!("Mean = {:.4}", self.mean),
            format!("Median = {:.4}", self.median),
            mode_line(&self.mode),
        ]
    }
}

fn mode_line(mode: &Mode) -> String {
    match mode {
        Mode::NoMode => "No mode (all values appear once)".to_owned(),
        Mode::Values { values, frequency } if values.len() == 1 => {
            format!("Mode = {:.4} (appears {frequency} times)", values[0])
        }
        Mode::Values { values, frequency } => format!(
            "Modes = {} (each appears {frequency} times)",
            format_values(values)
        ),
    }
}

impl Explain for SpreadMeasures {
    fn title(&self) -> &'static str {
        "MEASURES OF SPREAD"
    }

    fn steps(&self) -> Vec<String> {
        let rounded = |values: &[f64]| {
            let items = values
                .iter()
                .map(|v| format!("{v:.4}"))
                .collect::<Vec<_>>();
            format!("[{}]", items.join(", "))
        };
        vec![
            format!("Data: {}", format_values(&self.values)),
            format!("Mean: x̄ = {:.4}", self.mean),
            String::new(),
            "VARIANCE:".to_owned(),
            format!("Deviations from mean: {}", rounded(&self.deviations)),
            format!("Squared deviations: {}", rounded(&self.squared_deviations)),
            format!("Σ(x - x̄)² = {:.4}", self.sum_squared_deviations),
            format!(
                "s² = Σ(x - x̄)²/(n-1) = {:.4}/{} = {:.4}",
                self.sum_squared_deviations,
                self.n - 1,
                self.variance
            ),
            String::new(),
            "STANDARD DEVIATION:".to_owned(),
            format!("s = √(s²) = √{:.4} = {:.4}", self.variance, self.std_dev),
            String::new(),
            "RANGE:".to_owned(),
            format!(
                "Range = max - min = {:.4} - {:.4} = {:.4}",
                self.max, self.min, self.range
            ),
        ]
    }

    fn summary(&self) -> Vec<String> {
        vec![
            format!("Variance (s²) = {:.4}", self.variance),
            format!("Standard deviation (s) = {:.4}", self.std_dev),
            format!("Range = {:.4}", self.range),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(values: &[f64]) -> Sample {
        Sample::new(values.iter().copied()).unwrap()
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-6,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_median_even_and_odd() {
        assert_eq!(measures_of_center(&sample(&[1.0, 2.0, 3.0, 4.0])).unwrap().median, 2.5);
        assert_eq!(measures_of_center(&sample(&[1.0, 2.0, 3.0])).unwrap().median, 2.0);
        assert_eq!(measures_of_center(&sample(&[3.0, 1.0, 2.0])).unwrap().median, 2.0);
        assert_eq!(measures_of_center(&sample(&[7.0])).unwrap().median, 7.0);
    }

    #[test]
    fn test_single_mode() {
        let center = measures_of_center(&sample(&[1.0, 1.0, 2.0, 3.0])).unwrap();
        assert_eq!(
            center.mode,
            Mode::Values {
                values: vec![1.0],
                frequency: 2
            }
        );
    }

    #[test]
    fn test_all_unique_has_no_mode() {
        let center = measures_of_center(&sample(&[1.0, 2.0, 3.0])).unwrap();
        assert_eq!(center.mode, Mode::NoMode);
        assert!(center.summary().contains(&"No mode (all values appear once)".to_owned()));
    }

    #[test]
    fn test_multiple_modes_are_ascending() {
        let center = measures_of_center(&sample(&[3.0, 1.0, 3.0, 2.0, 1.0])).unwrap();
        assert_eq!(
            center.mode,
            Mode::Values {
                values: vec![1.0, 3.0],
                frequency: 2
            }
        );
    }

    #[test]
    fn test_spread_uses_bessel_correction() {
        let spread = measures_of_spread(&sample(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0])).unwrap();
        assert_close(spread.mean, 5.0);
        assert_close(spread.variance, 4.571_429);
        assert_close(spread.std_dev, 2.138_090);
        assert_close(spread.range, 7.0);
        assert_eq!(spread.min, 2.0);
        assert_eq!(spread.max, 9.0);
    }

    #[test]
    fn test_spread_of_single_value_is_invalid() {
        let err = measures_of_spread(&sample(&[5.0])).unwrap_err();
        assert_eq!(
            err,
            InvalidInput::TooFewValues {
                statistic: "sample variance",
                required: 2,
                actual: 1
            }
        );
    }

    #[test]
    fn test_constant_sample_has_zero_spread() {
        let spread = measures_of_spread(&sample(&[4.0, 4.0, 4.0])).unwrap();
        assert_eq!(spread.variance, 0.0);
        assert_eq!(spread.std_dev, 0.0);
        assert_eq!(spread.range, 0.0);
    }

    #[test]
    fn test_center_steps_show_substituted_formula() {
        let center = measures_of_center(&sample(&[1.0, 2.0, 3.0, 4.0])).unwrap();
        let steps = center.steps();
        assert!(steps.contains(&"x̄ = Σx/n = 10/4 = 2.5000".to_owned()));
        assert!(steps.contains(&"n is even: median = (2 + 3)/2 = 2.5000".to_owned()));
    }

    #[test]
    fn test_spread_steps_show_divisor() {
        let spread = measures_of_spread(&sample(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0])).unwrap();
        let steps = spread.steps();
        assert!(steps.contains(&"s² = Σ(x - x̄)²/(n-1) = 32.0000/7 = 4.5714".to_owned()));
        assert!(steps.contains(&"s = √(s²) = √4.5714 = 2.1381".to_owned()));
    }

    #[test]
    fn test_center_of_overflowing_sum_is_invalid() {
        let err = measures_of_center(&sample(&[1.7e308, 1.7e308])).unwrap_err();
        assert_eq!(err, InvalidInput::Overflow { statistic: "sum" });
    }

    #[test]
    fn test_median_of_huge_values_does_not_overflow() {
        let center = measures_of_center(&sample(&[-1.5e308, 1.0e308, 1.5e308])).unwrap();
        assert_eq!(center.median, 1.0e308);
        let center = measures_of_center(&sample(&[1.0e308, 1.2e308, -1.0e308, -1.2e308])).unwrap();
        assert_eq!(center.median, 0.0);
    }

    #[test]
    fn test_spread_overflow_is_invalid() {
        let err = measures_of_spread(&sample(&[1e308, -1e308, 0.0])).unwrap_err();
        assert!(matches!(err, InvalidInput::Overflow { .. }), "{err:?}");
        let err = measures_of_spread(&sample(&[1.7e308, 1.7e308, 1.7e308])).unwrap_err();
        assert_eq!(err, InvalidInput::Overflow { statistic: "sum" });
    }

    #[test]
    fn test_single_value_has_no_mode() {
        let center = measures_of_center(&sample(&[7.0])).unwrap();
        assert_eq!(center.mode, Mode::NoMode);
    }
}
