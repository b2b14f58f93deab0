//! Sample sources for statkit: saved datasets, CSV columns and literal text.
//!
//! - [`store`]: Named datasets persisted as JSON files in a per-user directory
//! - [`csv`]: Extraction of a numeric column from a CSV file
//! - [`input`]: The [`SampleSource`] a command reads its sample from

use std::{io, path::PathBuf};

use statkit_stats::InvalidInput;

pub use self::{input::SampleSource, store::DatasetStore};

pub mod csv;
pub mod input;
pub mod store;

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum DataError {
    #[display("dataset '{name}' not found")]
    NotFound { name: String },
    #[display("invalid dataset name '{name}' (use letters, digits, '-', '_' or '.')")]
    InvalidName { name: String },
    #[display("failed to access {}", path.display())]
    Io { path: PathBuf, source: io::Error },
    #[display("malformed dataset file {}", path.display())]
    Format {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[display("malformed CSV data")]
    Csv { source: ::csv::Error },
    #[display("column '{column}' not found")]
    ColumnNotFound { column: String },
    #[display("no numeric column found")]
    NoNumericColumn,
    #[display("{_0}")]
    InvalidInput(#[error(not(source))] InvalidInput),
}

impl From<InvalidInput> for DataError {
    fn from(err: InvalidInput) -> Self {
        Self::InvalidInput(err)
    }
}

impl From<::csv::Error> for DataError {
    fn from(source: ::csv::Error) -> Self {
        Self::Csv { source }
    }
}

impl DataError {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(io::Error) -> Self {
        let path = path.into();
        move |source| Self::Io { path, source }
    }
}
