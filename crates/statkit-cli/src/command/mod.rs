use std::path::PathBuf;

use clap::{Parser, Subcommand};
use statkit_data::{DatasetStore, store::DATA_DIR_ENV};

use self::{data::DataCommand, demo::DemoArg, describe::DescribeArg, ttest::TtestArg};
use crate::util;

pub(crate) mod data;
pub(crate) mod demo;
pub(crate) mod describe;
mod interactive;
pub(crate) mod ttest;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    #[command(flatten)]
    global: GlobalArgs,
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct GlobalArgs {
    /// Directory holding saved datasets [default: ~/.statstoolkit]
    #[arg(long, global = true, env = DATA_DIR_ENV)]
    data_dir: Option<PathBuf>,
    /// Print results only, without the calculation steps
    #[arg(long, short, global = true)]
    quiet: bool,
}

impl GlobalArgs {
    pub(crate) fn open_store(&self) -> anyhow::Result<DatasetStore> {
        util::open_store(self.data_dir.as_deref())
    }

    pub(crate) fn show_steps(&self) -> bool {
        !self.quiet
    }
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Start the interactive menu (the default)
    Interactive,
    /// Run every analysis on sample test scores
    Demo(#[clap(flatten)] DemoArg),
    /// Compute descriptive statistics of a sample
    Describe(#[clap(flatten)] DescribeArg),
    /// Run a one-sample t-test
    Ttest(#[clap(flatten)] TtestArg),
    /// Manage saved datasets
    #[command(subcommand)]
    Data(DataCommand),
}

pub fn run() -> anyhow::Result<()> {
    let CommandArgs { global, mode } = CommandArgs::parse();
    match mode.unwrap_or(Mode::Interactive) {
        Mode::Interactive => interactive::run(&global)?,
        Mode::Demo(arg) => demo::run(&arg, &global)?,
        Mode::Describe(arg) => describe::run(&arg, &global)?,
        Mode::Ttest(arg) => ttest::run(&arg, &global)?,
        Mode::Data(command) => data::run(&command, &global)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory as _;
    use statkit_data::SampleSource;
    use statkit_stats::Alternative;

    use super::*;

    fn parse(args: &[&str]) -> Result<CommandArgs, clap::Error> {
        CommandArgs::try_parse_from(std::iter::once("statkit").chain(args.iter().copied()))
    }

    #[test]
    fn test_command_definition_is_valid() {
        CommandArgs::command().debug_assert();
    }

    #[test]
    fn test_no_subcommand_means_interactive() {
        let args = parse(&[]).unwrap();
        assert!(args.mode.is_none());
        assert!(args.global.show_steps());
    }

    #[test]
    fn test_ttest_arguments() {
        let args = parse(&[
            "ttest",
            "--values",
            "-1 2 3",
            "--mu0",
            "-0.5",
            "--alternative",
            "less",
            "--quiet",
        ])
        .unwrap();
        assert!(!args.global.show_steps());
        let Some(Mode::Ttest(arg)) = args.mode else {
            panic!("expected ttest mode");
        };
        assert_eq!(arg.mu0, -0.5);
        assert_eq!(arg.alpha, statkit_stats::hypothesis::DEFAULT_ALPHA);
        assert_eq!(arg.alternative, Alternative::Less);
        assert_eq!(
            arg.source.to_source().unwrap(),
            SampleSource::Literal("-1 2 3".to_owned())
        );
    }

    #[test]
    fn test_source_is_required_and_exclusive() {
        assert!(parse(&["describe"]).is_err());
        assert!(parse(&["describe", "--values", "1 2", "--dataset", "x"]).is_err());
        assert!(parse(&["describe", "--dataset", "x", "--column", "a"]).is_err());

        let args = parse(&["describe", "--csv", "data.csv", "--column", "score"]).unwrap();
        let Some(Mode::Describe(arg)) = args.mode else {
            panic!("expected describe mode");
        };
        assert_eq!(
            arg.source.to_source().unwrap(),
            SampleSource::Csv {
                path: PathBuf::from("data.csv"),
                column: Some("score".to_owned()),
            }
        );
    }

    #[test]
    fn test_demo_generate_needs_two_values() {
        assert!(parse(&["demo", "--generate", "1"]).is_err());
        assert!(parse(&["demo", "--generate", "30", "--seed", "7"]).is_ok());
    }

    #[test]
    fn test_unknown_alternative_is_rejected() {
        let result = parse(&["ttest", "--values", "1 2", "--mu0", "0", "--alternative", "up"]);
        assert!(result.is_err());
    }
}
