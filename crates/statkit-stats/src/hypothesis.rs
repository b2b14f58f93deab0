//! One-sample hypothesis testing.

use std::str::FromStr;

use statrs::distribution::{ContinuousCDF, StudentsT};

use crate::{Explain, InvalidInput, Sample, descriptive};

/// Significance level used when none is given.
pub const DEFAULT_ALPHA: f64 = 0.05;

const T_TEST_NAME: &str = "One-Sample t-test";

/// The alternative hypothesis H₁ of a test.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum Alternative {
    /// H₁: μ ≠ μ₀
    #[default]
    #[display("two-sided")]
    TwoSided,
    /// H₁: μ > μ₀
    #[display("greater")]
    Greater,
    /// H₁: μ < μ₀
    #[display("less")]
    Less,
}

impl Alternative {
    /// All alternatives, in menu order.
    pub const ALL: [Self; 3] = [Self::TwoSided, Self::Greater, Self::Less];

    /// The relation H₁ asserts between μ and μ₀.
    #[must_use]
    pub fn relation(self) -> &'static str {
        match self {
            Self::TwoSided => "≠",
            Self::Greater => ">",
            Self::Less => "<",
        }
    }

    fn conclusion(self) -> &'static str {
        match self {
            Self::TwoSided => "different from",
            Self::Greater => "greater than",
            Self::Less => "less than",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("unknown alternative '{input}' (expected two-sided, greater or less)")]
pub struct ParseAlternativeError {
    input: String,
}

impl FromStr for Alternative {
    type Err = ParseAlternativeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "two-sided" | "two_sided" | "two" | "!=" => Ok(Self::TwoSided),
            "greater" | "g" | ">" => Ok(Self::Greater),
            "less" | "l" | "<" => Ok(Self::Less),
            _ => Err(ParseAlternativeError {
                input: s.to_owned(),
            }),
        }
    }
}

/// Outcome of a hypothesis test, with the steps that produced it.
#[derive(Debug, Clone)]
pub struct StatResult {
    pub test_name: &'static str,
    /// The test statistic (t for a t-test).
    pub statistic: f64,
    pub degrees_of_freedom: usize,
    /// Probability of a statistic at least as extreme under H₀, in `[0, 1]`.
    pub p_value: f64,
    /// Positive quantile bounding the rejection region.
    ///
    /// For [`Alternative::Less`] the region lies below its negation.
    pub critical_value: Option<f64>,
    /// `(1 - alpha)` confidence interval for the mean. One-sided intervals
    /// are unbounded on one end.
    pub confidence_interval: Option<(f64, f64)>,
    pub alpha: f64,
    pub alternative: Alternative,
    /// `p_value < alpha`.
    pub reject_null: bool,
    pub interpretation: String,
    pub steps: Vec<String>,
}

/// Tests whether the population mean differs from `mu0`.
///
/// The statistic is `t = (x̄ - μ₀) / (s / √n)` with `n - 1` degrees of
/// freedom; p-value and critical value come from Student's t distribution.
/// H₀ is rejected iff the p-value is below `alpha`.
///
/// # Errors
///
/// - [`InvalidInput::InvalidAlpha`] unless `0 < alpha < 1`
/// - [`InvalidInput::NonFiniteParameter`] if `mu0` is not finite
/// - [`InvalidInput::TooFewValues`] if the sample has fewer than two values
/// - [`InvalidInput::ZeroVariance`] if all values are equal
/// - [`InvalidInput::Overflow`] if the sample's spread does not fit in an `f64`
///
/// # Examples
///
/// ```
/// use statkit_stats::{Sample, hypothesis::{Alternative, one_sample_t_test}};
///
/// let sample = Sample::new([10.1, 10.3, 9.9, 10.2, 10.4]).unwrap();
/// let result = one_sample_t_test(&sample, 5.0, 0.05, Alternative::Greater).unwrap();
/// assert!(result.reject_null);
/// assert!(result.p_value < 0.001);
/// ```
#[expect(clippy::cast_precision_loss)]
pub fn one_sample_t_test(
    sample: &Sample,
    mu0: f64,
    alpha: f64,
    alternative: Alternative,
) -> Result<StatResult, InvalidInput> {
    if !(alpha > 0.0 && alpha < 1.0) {
        return Err(InvalidInput::InvalidAlpha { alpha });
    }
    if !mu0.is_finite() {
        return Err(InvalidInput::NonFiniteParameter {
            name: "hypothesized mean",
        });
    }
    let n = sample.len();
    if n < 2 {
        return Err(InvalidInput::TooFewValues {
            statistic: "t-test",
            required: 2,
            actual: n,
        });
    }

    if sample.min().total_cmp(&sample.max()).is_eq() {
        return Err(InvalidInput::ZeroVariance {
            statistic: "t statistic",
        });
    }
    let mean = sample.mean();
    let std_dev = descriptive::sample_std_dev(sample)?;

    let df = n - 1;
    let standard_error = std_dev / (n as f64).sqrt();
    let t = (mean - mu0) / standard_error;
    if !t.is_finite() {
        return Err(InvalidInput::ZeroVariance {
            statistic: "t statistic",
        });
    }

    let distribution =
        StudentsT::new(0.0, 1.0, df as f64).map_err(|_| InvalidInput::TooFewValues {
            statistic: "t-test",
            required: 2,
            actual: n,
        })?;
    let p_value = match alternative {
        Alternative::TwoSided => 2.0 * (1.0 - distribution.cdf(t.abs())),
        Alternative::Greater => 1.0 - distribution.cdf(t),
        Alternative::Less => distribution.cdf(t),
    }
    .clamp(0.0, 1.0);
    let critical_value = match alternative {
        Alternative::TwoSided => distribution.inverse_cdf(1.0 - alpha / 2.0),
        Alternative::Greater | Alternative::Less => distribution.inverse_cdf(1.0 - alpha),
    };
    let margin = critical_value * standard_error;
    let confidence_interval = match alternative {
        Alternative::TwoSided => (mean - margin, mean + margin),
        Alternative::Greater => (mean - margin, f64::INFINITY),
        Alternative::Less => (f64::NEG_INFINITY, mean + margin),
    };

    let reject_null = p_value < alpha;
    let interpretation = format!(
        "{} H₀ at α = {alpha}",
        if reject_null {
            "Reject"
        } else {
            "Fail to reject"
        }
    );

    let trace = TTestTrace {
        n,
        mean,
        std_dev,
        mu0,
        alpha,
        alternative,
        t,
        df,
        p_value,
        critical_value,
        confidence_interval,
        reject_null,
    };

    Ok(StatResult {
        test_name: T_TEST_NAME,
        statistic: t,
        degrees_of_freedom: df,
        p_value,
        critical_value: Some(critical_value),
        confidence_interval: Some(confidence_interval),
        alpha,
        alternative,
        reject_null,
        interpretation,
        steps: trace.lines(),
    })
}

/// Intermediate values of a t-test, captured for the explanation.
struct TTestTrace {
    n: usize,
    mean: f64,
    std_dev: f64,
    mu0: f64,
    alpha: f64,
    alternative: Alternative,
    t: f64,
    df: usize,
    p_value: f64,
    critical_value: f64,
    confidence_interval: (f64, f64),
    reject_null: bool,
}

impl TTestTrace {
    fn lines(&self) -> Vec<String> {
        let Self {
            n,
            mean,
            std_dev,
            mu0,
            alpha,
            alternative,
            t,
            df,
            p_value,
            critical_value,
            confidence_interval,
            reject_null,
        } = *self;

        let critical_line = match alternative {
            Alternative::TwoSided => format!("Critical value = ±{critical_value:.4}"),
            Alternative::Greater => format!("Critical value = {critical_value:.4}"),
            Alternative::Less => format!("Critical value = -{critical_value:.4}"),
        };
        let decision = if reject_null {
            vec![
                format!("P-value ({p_value:.6}) < α ({alpha}): REJECT H₀"),
                format!(
                    "Evidence suggests the mean is significantly {} {mu0}",
                    alternative.conclusion()
                ),
            ]
        } else {
            vec![
                format!("P-value ({p_value:.6}) ≥ α ({alpha}): FAIL TO REJECT H₀"),
                format!(
                    "Insufficient evidence to conclude the mean is {} {mu0}",
                    alternative.conclusion()
                ),
            ]
        };

        let mut lines = vec![
            format!("Sample size: n = {n}"),
            format!("Sample mean: x̄ = {mean:.4}"),
            format!("Sample std dev: s = {std_dev:.4}"),
            format!("Hypothesized mean: μ₀ = {mu0}"),
            format!("Significance level: α = {alpha}"),
            String::new(),
            "STEP 1: HYPOTHESES".to_owned(),
            format!("H₀: μ = {mu0}"),
            format!("H₁: μ {} {mu0}", alternative.relation()),
            String::new(),
            "STEP 2: TEST STATISTIC".to_owned(),
            "t = (x̄ - μ₀)/(s/√n)".to_owned(),
            format!("t = ({mean:.4} - {mu0})/({std_dev:.4}/√{n})"),
            format!("t = {t:.4} (df = {df})"),
            String::new(),
            "STEP 3: P-VALUE".to_owned(),
            format!("P-value = {p_value:.6}"),
            critical_line,
            String::new(),
            "STEP 4: DECISION".to_owned(),
        ];
        lines.extend(decision);
        lines.push(String::new());
        lines.push(format!(
            "{:.1}% confidence interval for μ: {}",
            (1.0 - alpha) * 100.0,
            format_interval(confidence_interval)
        ));
        lines
    }
}

fn format_interval((low, high): (f64, f64)) -> String {
    let bound = |v: f64| {
        if v.is_infinite() {
            let symbol = if v.is_sign_positive() { "+∞" } else { "-∞" };
            symbol.to_owned()
        } else {
            format!("{v:.4}")
        }
    };
    format!("({}, {})", bound(low), bound(high))
}

impl Explain for StatResult {
    fn title(&self) -> &'static str {
        "ONE-SAMPLE T-TEST"
    }

    fn steps(&self) -> Vec<String> {
        self.steps.clone()
    }

    fn summary(&self) -> Vec<String> {
        let mut lines = vec![
            format!("Test: {} ({})", self.test_name, self.alternative),
            format!(
                "t = {:.4} (df = {})",
                self.statistic, self.degrees_of_freedom
            ),
            format!("P-value = {:.6}", self.p_value),
        ];
        if let Some(cv) = self.critical_value {
            lines.push(format!("Critical value = {cv:.4}"));
        }
        if let Some(interval) = self.confidence_interval {
            lines.push(format!(
                "{:.1}% CI = {}",
                (1.0 - self.alpha) * 100.0,
                format_interval(interval)
            ));
        }
        lines.push(self.interpretation.clone());
        lines
    }
}
