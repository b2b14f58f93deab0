use crate::{Explain, InvalidInput, Sample, percentiles::Percentiles, sample::format_values};

/// Multiplier of the IQR that places the outlier fences beyond Q1 and Q3.
pub const FENCE_MULTIPLIER: f64 = 1.5;

const QUARTILE_POINTS: [f64; 3] = [25.0, 50.0, 75.0];

/// Five-number summary of a sample with Tukey outlier fences.
///
/// Quartiles are linear-interpolation percentiles (see
/// [`compute_percentile`](crate::percentiles::compute_percentile)).
///
/// # Examples
///
/// ```
/// use statkit_stats::{FiveNumberSummary, Sample};
///
/// let sample = Sample::new([1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 100.0]).unwrap();
/// let summary = FiveNumberSummary::new(&sample).unwrap();
/// assert_eq!(summary.q1, 3.25);
/// assert_eq!(summary.q3, 7.75);
/// assert_eq!(summary.outliers, vec![100.0]);
/// ```
#[derive(Debug, Clone)]
pub struct FiveNumberSummary {
    /// The sample values sorted in ascending order.
    pub sorted: Vec<f64>,
    pub min: f64,
    /// The 25th percentile.
    pub q1: f64,
    /// The 50th percentile.
    pub median: f64,
    /// The 75th percentile.
    pub q3: f64,
    pub max: f64,
    /// `Q3 - Q1`.
    pub iqr: f64,
    /// `Q1 - 1.5 × IQR`.
    pub lower_fence: f64,
    /// `Q3 + 1.5 × IQR`.
    pub upper_fence: f64,
    /// Values strictly outside the fences, in sample order.
    pub outliers: Vec<f64>,
}

impl FiveNumberSummary {
    /// Computes the summary of `sample`.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidInput::Overflow`] if a quartile, the IQR or a fence
    /// does not fit in an `f64`.
    pub fn new(sample: &Sample) -> Result<Self, InvalidInput> {
        let sorted = sample.sorted();
        let quartiles = Percentiles::from_sorted(&sorted, &QUARTILE_POINTS);
        // every point is present for a non-empty sample
        let quartile = |p: f64| quartiles.get(p).unwrap_or(f64::NAN);
        let q1 = quartile(25.0);
        let median = quartile(50.0);
        let q3 = quartile(75.0);
        let iqr = q3 - q1;
        let lower_fence = q1 - FENCE_MULTIPLIER * iqr;
        let upper_fence = q3 + FENCE_MULTIPLIER * iqr;
        if ![q1, median, q3, iqr, lower_fence, upper_fence]
            .iter()
            .all(|v| v.is_finite())
        {
            return Err(InvalidInput::Overflow {
                statistic: "interquartile range",
            });
        }
        let outliers = sample
            .values()
            .iter()
            .copied()
            .filter(|&v| v < lower_fence || v > upper_fence)
            .collect();

        Ok(Self {
            min: sample.min(),
            max: sample.max(),
            q1,
            median,
            q3,
            iqr,
            lower_fence,
            upper_fence,
            outliers,
            sorted,
        })
    }

    fn outlier_line(&self) -> String {
        if self.outliers.is_empty() {
            "No outliers detected".to_owned()
        } else {
            format!("Outliers: {}", format_values(&self.outliers))
        }
    }
}

/// Computes the five-number summary, IQR and outliers of a sample.
///
/// # Errors
///
/// Returns the errors of [`FiveNumberSummary::new`].
pub fn five_number_summary(sample: &Sample) -> Result<FiveNumberSummary, InvalidInput> {
    FiveNumberSummary::new(sample)
}

impl Explain for FiveNumberSummary {
    fn title(&self) -> &'static str {
        "FIVE-NUMBER SUMMARY"
    }

    fn steps(&self) -> Vec<String> {
        let mut lines = vec![
            format!("Sorted data: {}", format_values(&self.sorted)),
            format!("Min = {:.4}", self.min),
            format!("Q1 = {:.4}", self.q1),
            format!("Median = {:.4}", self.median),
            format!("Q3 = {:.4}", self.q3),
            format!("Max = {:.4}", self.max),
            String::new(),
            format!(
                "IQR = Q3 - Q1 = {:.4} - {:.4} = {:.4}",
                self.q3, self.q1, self.iqr
            ),
            String::new(),
            "OUTLIER DETECTION:".to_owned(),
            format!(
                "Lower fence = Q1 - {FENCE_MULTIPLIER}×IQR = {:.4} - {FENCE_MULTIPLIER}×{:.4} = {:.4}",
                self.q1, self.iqr, self.lower_fence
            ),
            format!(
                "Upper fence = Q3 + {FENCE_MULTIPLIER}×IQR = {:.4} + {FENCE_MULTIPLIER}×{:.4} = {:.4}",
                self.q3, self.iqr, self.upper_fence
            ),
        ];
        lines.push(self.outlier_line());
        lines
    }

    fn summary(&self) -> Vec<String> {
        vec![
            format!(
                "Min = {:.4}, Q1 = {:.4}, Median = {:.4}, Q3 = {:.4}, Max = {:.4}",
                self.min, self.q1, self.median, self.q3, self.max
            ),
            format!("IQR = {:.4}", self.iqr),
            self.outlier_line(),
        ]
    }
}
