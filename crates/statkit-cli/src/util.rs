use std::{
    io::{self, Write},
    path::{Path, PathBuf},
};

use anyhow::Context;
use statkit_data::{DatasetStore, SampleSource};
use statkit_stats::{Explain, Explanation, Sample};

/// Command-line selection of the sample to analyze.
#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct SourceArg {
    /// Values separated by spaces or commas, e.g. "85 92 78"
    #[arg(
        long,
        allow_hyphen_values = true,
        required_unless_present_any = ["dataset", "csv"],
        conflicts_with_all = ["dataset", "csv"],
    )]
    values: Option<String>,
    /// Name of a saved dataset
    #[arg(long, conflicts_with = "csv")]
    dataset: Option<String>,
    /// CSV file to read a column from
    #[arg(long)]
    csv: Option<PathBuf>,
    /// Column of the CSV file [default: first numeric column]
    #[arg(long, requires = "csv")]
    column: Option<String>,
}

impl SourceArg {
    pub(crate) fn to_source(&self) -> anyhow::Result<SampleSource> {
        let SourceArg {
            values,
            dataset,
            csv,
            column,
        } = self;
        match (values, dataset, csv) {
            (Some(text), _, _) => Ok(SampleSource::Literal(text.clone())),
            (None, Some(name), _) => Ok(SampleSource::Dataset(name.clone())),
            (None, None, Some(path)) => Ok(SampleSource::Csv {
                path: path.clone(),
                column: column.clone(),
            }),
            (None, None, None) => anyhow::bail!("one of --values, --dataset or --csv is required"),
        }
    }

    pub(crate) fn load(&self, store: &DatasetStore) -> anyhow::Result<(SampleSource, Sample)> {
        let source = self.to_source()?;
        let sample = source
            .load(store)
            .with_context(|| format!("Failed to read sample from {source}"))?;
        Ok((source, sample))
    }
}

/// Opens the dataset store at `data_dir`, or at the per-user default.
pub(crate) fn open_store(data_dir: Option<&Path>) -> anyhow::Result<DatasetStore> {
    let dir = match data_dir {
        Some(dir) => dir.to_path_buf(),
        None => DatasetStore::default_dir().unwrap_or_else(|| {
            log::warn!("no home directory found, storing datasets under the current directory");
            PathBuf::from(".statstoolkit")
        }),
    };
    log::debug!("using data directory {}", dir.display());
    DatasetStore::open(&dir)
        .with_context(|| format!("Failed to open data directory {}", dir.display()))
}

/// Writes a result preceded by a blank line, with or without its steps.
pub(crate) fn write_report<W, E>(out: &mut W, item: &E, show_steps: bool) -> io::Result<()>
where
    W: Write + ?Sized,
    E: Explain + ?Sized,
{
    write_explanation(out, &Explanation::of(item, show_steps))
}

pub(crate) fn write_explanation<W>(out: &mut W, explanation: &Explanation) -> io::Result<()>
where
    W: Write + ?Sized,
{
    writeln!(out)?;
    write!(out, "{explanation}")
}
