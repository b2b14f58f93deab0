use std::io::{self, Write as _};

use rand::{Rng, SeedableRng as _};
use rand_distr::Normal;
use rand_pcg::Pcg32;
use statkit_stats::{Alternative, Sample, hypothesis::DEFAULT_ALPHA};

use super::{
    GlobalArgs,
    describe::{self, Sections},
    ttest,
};

/// Test scores of ten students.
pub(crate) const DEMO_SCORES: [f64; 10] =
    [85.0, 92.0, 78.0, 88.0, 95.0, 82.0, 79.0, 91.0, 87.0, 84.0];
/// Hypothesized mean score the demo tests against.
pub(crate) const DEMO_MU0: f64 = 85.0;

const GENERATED_MEAN: f64 = 85.0;
const GENERATED_STD_DEV: f64 = 5.0;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct DemoArg {
    /// Use N scores drawn from N(85, 5²) instead of the built-in ones
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u32).range(2..))]
    generate: Option<u32>,
    /// Seed of the score generator
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

pub(crate) fn run(arg: &DemoArg, global: &GlobalArgs) -> anyhow::Result<()> {
    let sample = match arg.generate {
        Some(count) => {
            log::info!("generating {count} demo scores with seed {}", arg.seed);
            let mut rng = Pcg32::seed_from_u64(arg.seed);
            generate_scores(&mut rng, count as usize)?
        }
        None => demo_sample()?,
    };

    let mut stdout = io::stdout().lock();
    write_demo(&mut stdout, &sample, global.show_steps())?;
    stdout.flush()?;
    Ok(())
}

pub(crate) fn demo_sample() -> anyhow::Result<Sample> {
    Ok(Sample::new(DEMO_SCORES)?)
}

/// Draws `count` normally distributed scores rounded to one decimal.
pub(crate) fn generate_scores<R>(rng: &mut R, count: usize) -> anyhow::Result<Sample>
where
    R: Rng + ?Sized,
{
    let normal = Normal::new(GENERATED_MEAN, GENERATED_STD_DEV)?;
    let values = (0..count)
        .map(|_| (rng.sample(normal) * 10.0).round() / 10.0)
        .collect::<Vec<_>>();
    Ok(Sample::new(values)?)
}

/// Runs every analysis on `sample`, then a two-sided t-test against 85.
pub(crate) fn write_demo<W>(out: &mut W, sample: &Sample, show_steps: bool) -> anyhow::Result<()>
where
    W: io::Write + ?Sized,
{
    writeln!(out, "DEMO: student test scores")?;
    writeln!(out, "Data: {sample}")?;
    describe::write_descriptive(out, sample, Sections::ALL, show_steps)?;
    ttest::write_t_test(
        out,
        sample,
        DEMO_MU0,
        DEFAULT_ALPHA,
        Alternative::TwoSided,
        show_steps,
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_runs_every_analysis() {
        let mut out = vec![];
        write_demo(&mut out, &demo_sample().unwrap(), false).unwrap();
        let text = String::from_utf8(out).unwrap();
        for title in [
            "MEASURES OF CENTER",
            "MEASURES OF SPREAD",
            "FIVE-NUMBER SUMMARY",
            "ONE-SAMPLE T-TEST",
        ] {
            assert!(text.contains(title), "{title}");
        }
        assert!(text.contains("t = 0.6226 (df = 9)"));
    }

    #[test]
    fn test_generated_scores_are_reproducible() {
        let a = generate_scores(&mut Pcg32::seed_from_u64(7), 30).unwrap();
        let b = generate_scores(&mut Pcg32::seed_from_u64(7), 30).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 30);
        for &value in a.values() {
            assert!((value * 10.0 - (value * 10.0).round()).abs() < 1e-9);
        }
    }
}
