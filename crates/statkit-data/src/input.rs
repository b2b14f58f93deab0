use std::{fmt, path::PathBuf};

use statkit_stats::Sample;

use crate::{DataError, DatasetStore, csv};

/// Where a command reads its sample from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SampleSource {
    /// Whitespace and/or comma separated numbers.
    Literal(String),
    /// A dataset saved in the store.
    Dataset(String),
    /// One column of a CSV file; the first numeric column when `None`.
    Csv {
        path: PathBuf,
        column: Option<String>,
    },
}

impl SampleSource {
    /// Reads the sample.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::InvalidInput`] for malformed or empty literal
    /// text and the store or CSV errors for the other sources.
    pub fn load(&self, store: &DatasetStore) -> Result<Sample, DataError> {
        match self {
            Self::Literal(text) => Ok(Sample::parse(text)?),
            Self::Dataset(name) => store.load(name),
            Self::Csv { path, column } => csv::read_column(path, column.as_deref()),
        }
    }
}

/// Short provenance label, stored alongside saved datasets.
impl fmt::Display for SampleSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(_) => write!(f, "manual"),
            Self::Dataset(name) => write!(f, "dataset:{name}"),
            Self::Csv { path, column } => {
                write!(f, "csv:{}", path.display())?;
                if let Some(column) = column {
                    write!(f, "#{column}")?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use statkit_stats::InvalidInput;

    use super::*;

    #[test]
    fn test_load_each_source() {
        let dir = tempfile::tempdir().unwrap();
        let store = DatasetStore::open(dir.path().join("store")).unwrap();
        let csv_path = dir.path().join("data.csv");
        fs::write(&csv_path, "x\n4\n5\n").unwrap();
        store
            .save("saved", &Sample::new([1.0, 2.0]).unwrap(), None)
            .unwrap();

        let literal = SampleSource::Literal("7, 8 9".to_owned());
        assert_eq!(literal.load(&store).unwrap().values(), &[7.0, 8.0, 9.0]);

        let dataset = SampleSource::Dataset("saved".to_owned());
        assert_eq!(dataset.load(&store).unwrap().values(), &[1.0, 2.0]);

        let csv = SampleSource::Csv {
            path: csv_path,
            column: None,
        };
        assert_eq!(csv.load(&store).unwrap().values(), &[4.0, 5.0]);
    }

    #[test]
    fn test_malformed_literal() {
        let dir = tempfile::tempdir().unwrap();
        let store = DatasetStore::open(dir.path()).unwrap();
        let err = SampleSource::Literal("1 two 3".to_owned())
            .load(&store)
            .unwrap_err();
        assert!(matches!(err, DataError::InvalidInput(InvalidInput::Parse { .. })));
    }

    #[test]
    fn test_provenance_label() {
        let source = SampleSource::Csv {
            path: PathBuf::from("scores.csv"),
            column: Some("math".to_owned()),
        };
        assert_eq!(source.to_string(), "csv:scores.csv#math");
        assert_eq!(SampleSource::Literal("1".to_owned()).to_string(), "manual");
    }
}
