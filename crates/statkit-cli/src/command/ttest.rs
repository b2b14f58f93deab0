use std::io::{self, Write as _};

use statkit_stats::{
    Alternative, Sample,
    hypothesis::{DEFAULT_ALPHA, one_sample_t_test},
};

use super::GlobalArgs;
use crate::util::{self, SourceArg};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct TtestArg {
    #[command(flatten)]
    pub(crate) source: SourceArg,
    /// Hypothesized population mean μ₀
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) mu0: f64,
    /// Significance level
    #[arg(long, default_value_t = DEFAULT_ALPHA)]
    pub(crate) alpha: f64,
    /// Alternative hypothesis: two-sided, greater or less
    #[arg(long, default_value_t = Alternative::TwoSided)]
    pub(crate) alternative: Alternative,
}

pub(crate) fn run(arg: &TtestArg, global: &GlobalArgs) -> anyhow::Result<()> {
    let store = global.open_store()?;
    let (source, sample) = arg.source.load(&store)?;
    log::info!(
        "testing {} values from {source} against μ₀ = {}",
        sample.len(),
        arg.mu0
    );

    let mut stdout = io::stdout().lock();
    write_t_test(
        &mut stdout,
        &sample,
        arg.mu0,
        arg.alpha,
        arg.alternative,
        global.show_steps(),
    )?;
    stdout.flush()?;
    Ok(())
}

pub(crate) fn write_t_test<W>(
    out: &mut W,
    sample: &Sample,
    mu0: f64,
    alpha: f64,
    alternative: Alternative,
    show_steps: bool,
) -> anyhow::Result<()>
where
    W: io::Write + ?Sized,
{
    let result = one_sample_t_test(sample, mu0, alpha, alternative)?;
    log::debug!(
        "t = {}, p = {}, reject = {}",
        result.statistic,
        result.p_value,
        result.reject_null
    );
    util::write_report(out, &result, show_steps)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCORES: [f64; 10] = [85.0, 92.0, 78.0, 88.0, 95.0, 82.0, 79.0, 91.0, 87.0, 84.0];

    fn render(values: &[f64], alternative: Alternative, show_steps: bool) -> anyhow::Result<String> {
        let sample = Sample::new(values.iter().copied()).unwrap();
        let mut out = vec![];
        write_t_test(&mut out, &sample, 85.0, DEFAULT_ALPHA, alternative, show_steps)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_brief_report() {
        let text = render(&SCORES, Alternative::TwoSided, false).unwrap();
        assert!(text.starts_with("\n=== ONE-SAMPLE T-TEST ===\n"));
        assert!(text.contains("t = 0.6226 (df = 9)"));
        assert!(text.contains("Fail to reject H₀"));
    }

    #[test]
    fn test_steps_are_printed() {
        let text = render(&SCORES, Alternative::Greater, true).unwrap();
        assert!(text.contains("STEP 1"));
        assert!(text.contains("STEP 4"));
    }

    #[test]
    fn test_constant_sample_is_an_error() {
        assert!(render(&[85.0, 85.0, 85.0], Alternative::TwoSided, true).is_err());
    }
}
