use std::io::{self, Write as _};

use statkit_data::{DatasetStore, store::DatasetRecord};
use statkit_stats::sample::format_values;

use super::GlobalArgs;
use crate::util::SourceArg;

#[derive(Debug, Clone, clap::Subcommand)]
pub(crate) enum DataCommand {
    /// List saved datasets
    List,
    /// Save a sample under a name, replacing any dataset with that name
    Save {
        /// Dataset name (letters, digits, '-', '_' and '.')
        name: String,
        #[command(flatten)]
        source: SourceArg,
    },
    /// Print the values of a saved dataset
    Show {
        /// Dataset name
        name: String,
    },
}

pub(crate) fn run(command: &DataCommand, global: &GlobalArgs) -> anyhow::Result<()> {
    let store = global.open_store()?;
    let mut stdout = io::stdout().lock();
    match command {
        DataCommand::List => write_list(&mut stdout, &store)?,
        DataCommand::Save { name, source } => {
            let (source, sample) = source.load(&store)?;
            let path = store.save(name, &sample, Some(&source.to_string()))?;
            writeln!(
                stdout,
                "Saved {} values as '{name}' ({})",
                sample.len(),
                path.display()
            )?;
        }
        DataCommand::Show { name } => {
            let record = store.load_record(name)?;
            write_record(&mut stdout, &record)?;
        }
    }
    stdout.flush()?;
    Ok(())
}

pub(crate) fn write_list<W>(out: &mut W, store: &DatasetStore) -> anyhow::Result<()>
where
    W: io::Write + ?Sized,
{
    let names = store.list()?;
    if names.is_empty() {
        writeln!(out, "No saved datasets in {}", store.dir().display())?;
        return Ok(());
    }
    writeln!(out, "Saved datasets ({}):", names.len())?;
    for name in &names {
        writeln!(out, "  {name}")?;
    }
    Ok(())
}

pub(crate) fn write_record<W>(out: &mut W, record: &DatasetRecord) -> io::Result<()>
where
    W: io::Write + ?Sized,
{
    writeln!(out, "Dataset: {}", record.name)?;
    writeln!(out, "Saved at: {}", record.saved_at.to_rfc3339())?;
    if let Some(source) = &record.source {
        writeln!(out, "Source: {source}")?;
    }
    writeln!(out, "n = {}", record.values.len())?;
    writeln!(out, "Values: {}", format_values(&record.values))
}

#[cfg(test)]
mod tests {
    use statkit_stats::Sample;

    use super::*;

    #[test]
    fn test_list_empty_and_filled() {
        let dir = tempfile::tempdir().unwrap();
        let store = DatasetStore::open(dir.path()).unwrap();

        let mut out = vec![];
        write_list(&mut out, &store).unwrap();
        assert!(String::from_utf8(out).unwrap().starts_with("No saved datasets"));

        let sample = Sample::new([1.0, 2.0]).unwrap();
        store.save("b", &sample, None).unwrap();
        store.save("a", &sample, None).unwrap();
        let mut out = vec![];
        write_list(&mut out, &store).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Saved datasets (2):\n  a\n  b\n"
        );
    }

    #[test]
    fn test_show_record() {
        let dir = tempfile::tempdir().unwrap();
        let store = DatasetStore::open(dir.path()).unwrap();
        let sample = Sample::new([85.0, 92.5]).unwrap();
        store.save("scores", &sample, Some("manual")).unwrap();

        let mut out = vec![];
        write_record(&mut out, &store.load_record("scores").unwrap()).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Dataset: scores\n"));
        assert!(text.contains("Source: manual\n"));
        assert!(text.contains("n = 2\n"));
    }
}
