use std::io::{self, Write as _};

use statkit_stats::{
    Explanation, Sample,
    descriptive::{measures_of_center, measures_of_spread},
    summary::five_number_summary,
};

use super::GlobalArgs;
use crate::util::{self, SourceArg};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct DescribeArg {
    #[command(flatten)]
    pub(crate) source: SourceArg,
    /// Show measures of center (mean, median, mode)
    #[arg(long)]
    center: bool,
    /// Show measures of spread (variance, standard deviation, range)
    #[arg(long)]
    spread: bool,
    /// Show the five-number summary and outliers
    #[arg(long)]
    summary: bool,
}

/// Which descriptive reports to print.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Sections {
    pub(crate) center: bool,
    pub(crate) spread: bool,
    pub(crate) summary: bool,
}

impl Sections {
    pub(crate) const ALL: Self = Self {
        center: true,
        spread: true,
        summary: true,
    };
    pub(crate) const CENTER: Self = Self {
        center: true,
        spread: false,
        summary: false,
    };
    pub(crate) const SPREAD: Self = Self {
        center: false,
        spread: true,
        summary: false,
    };
    pub(crate) const SUMMARY: Self = Self {
        center: false,
        spread: false,
        summary: true,
    };
}

impl DescribeArg {
    fn sections(&self) -> Sections {
        let Self {
            source: _,
            center,
            spread,
            summary,
        } = *self;
        if center || spread || summary {
            Sections {
                center,
                spread,
                summary,
            }
        } else {
            Sections::ALL
        }
    }
}

pub(crate) fn run(arg: &DescribeArg, global: &GlobalArgs) -> anyhow::Result<()> {
    let store = global.open_store()?;
    let (source, sample) = arg.source.load(&store)?;
    log::info!("describing {} values from {source}", sample.len());

    let mut stdout = io::stdout().lock();
    write_descriptive(&mut stdout, &sample, arg.sections(), global.show_steps())?;
    stdout.flush()?;
    Ok(())
}

/// Prints the selected reports for `sample`.
///
/// All reports are computed before anything is written, so a sample that
/// cannot produce one of them prints nothing.
pub(crate) fn write_descriptive<W>(
    out: &mut W,
    sample: &Sample,
    sections: Sections,
    show_steps: bool,
) -> anyhow::Result<()>
where
    W: io::Write + ?Sized,
{
    let mut reports = vec![];
    if sections.center {
        reports.push(Explanation::of(&measures_of_center(sample)?, show_steps));
    }
    if sections.spread {
        reports.push(Explanation::of(&measures_of_spread(sample)?, show_steps));
    }
    if sections.summary {
        reports.push(Explanation::of(&five_number_summary(sample)?, show_steps));
    }
    for report in &reports {
        util::write_explanation(out, report)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn describe(values: &[f64], sections: Sections, show_steps: bool) -> anyhow::Result<String> {
        let sample = Sample::new(values.iter().copied()).unwrap();
        let mut out = vec![];
        write_descriptive(&mut out, &sample, sections, show_steps)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_all_sections_in_order() {
        let text = describe(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0], Sections::ALL, true).unwrap();
        let center = text.find("=== MEASURES OF CENTER ===").unwrap();
        let spread = text.find("=== MEASURES OF SPREAD ===").unwrap();
        let summary = text.find("=== FIVE-NUMBER SUMMARY ===").unwrap();
        assert!(center < spread && spread < summary);
    }

    #[test]
    fn test_single_section() {
        let text = describe(&[1.0, 2.0, 3.0], Sections::SUMMARY, false).unwrap();
        assert!(text.contains("FIVE-NUMBER SUMMARY"));
        assert!(!text.contains("MEASURES OF CENTER"));
    }

    #[test]
    fn test_single_value_spread_prints_nothing() {
        assert!(describe(&[5.0], Sections::ALL, true).is_err());
        let text = describe(&[5.0], Sections::CENTER, true).unwrap();
        assert!(text.contains("No mode"));
    }

    #[test]
    fn test_no_flags_selects_everything() {
        assert_eq!(DescribeArg::default().sections(), Sections::ALL);
        let arg = DescribeArg {
            spread: true,
            ..DescribeArg::default()
        };
        assert_eq!(arg.sections(), Sections::SPREAD);
    }
}
