//! Named datasets saved as JSON files.
//!
//! Each dataset lives in `<dir>/<name>.json`. Saving overwrites any existing
//! dataset of the same name (last write wins).

use std::{
    ffi::OsStr,
    fs::{self, File},
    io::{self, BufReader, BufWriter, Write as _},
    path::{Path, PathBuf},
};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use statkit_stats::Sample;

use crate::DataError;

/// Environment variable overriding the dataset directory.
pub const DATA_DIR_ENV: &str = "STATKIT_DATA_DIR";

const DEFAULT_DIR_NAME: &str = ".statstoolkit";
const EXTENSION: &str = "json";

/// A dataset as stored on disk.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatasetRecord {
    pub name: String,
    pub values: Vec<f64>,
    pub saved_at: DateTime<Utc>,
    /// Where the values came from, e.g. `manual` or `csv:scores.csv#math`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// Directory of named datasets.
///
/// # Examples
///
/// ```
/// use statkit_data::DatasetStore;
/// use statkit_stats::Sample;
///
/// let dir = tempfile::tempdir().unwrap();
/// let store = DatasetStore::open(dir.path()).unwrap();
/// let sample = Sample::new([1.0, 2.0, 3.0]).unwrap();
///
/// store.save("scores", &sample, None).unwrap();
/// assert_eq!(store.list().unwrap(), vec!["scores".to_owned()]);
/// assert_eq!(store.load("scores").unwrap(), sample);
/// ```
#[derive(Debug, Clone)]
pub struct DatasetStore {
    dir: PathBuf,
}

impl DatasetStore {
    /// Opens the store at `dir`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::Io`] if the directory cannot be created.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, DataError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(DataError::io(&dir))?;
        log::debug!("dataset store opened at {}", dir.display());
        Ok(Self { dir })
    }

    /// The per-user default directory, `~/.statstoolkit`.
    ///
    /// Returns `None` when no home directory is known.
    #[must_use]
    pub fn default_dir() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(DEFAULT_DIR_NAME))
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing the dataset `name`.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::InvalidName`] unless `name` is made of ASCII
    /// letters, digits, `-`, `_` and `.`, and does not start with `.`.
    pub fn path_for(&self, name: &str) -> Result<PathBuf, DataError> {
        validate_name(name)?;
        Ok(self.dir.join(format!("{name}.{EXTENSION}")))
    }

    /// Saves `sample` under `name`, replacing any previous dataset.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::InvalidName`] for a bad name and
    /// [`DataError::Io`] / [`DataError::Format`] if writing fails.
    pub fn save(
        &self,
        name: &str,
        sample: &Sample,
        source: Option<&str>,
    ) -> Result<PathBuf, DataError> {
        let path = self.path_for(name)?;
        let record = DatasetRecord {
            name: name.to_owned(),
            values: sample.values().to_vec(),
            saved_at: Utc::now(),
            source: source.map(str::to_owned),
        };

        let file = File::create(&path).map_err(DataError::io(&path))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &record).map_err(|source| {
            DataError::Format {
                path: path.clone(),
                source,
            }
        })?;
        writeln!(writer)
            .and_then(|()| writer.flush())
            .map_err(DataError::io(&path))?;

        log::info!(
            "saved dataset '{name}' ({} values) to {}",
            record.values.len(),
            path.display()
        );
        Ok(path)
    }

    /// Loads the stored record for `name`, including its metadata.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::NotFound`] if no such dataset exists,
    /// [`DataError::Io`] if it cannot be read and [`DataError::Format`] if
    /// it is not a valid dataset file.
    pub fn load_record(&self, name: &str) -> Result<DatasetRecord, DataError> {
        let path = self.path_for(name)?;
        let file = match File::open(&path) {
            Ok(file) => file,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Err(DataError::NotFound {
                    name: name.to_owned(),
                });
            }
            Err(err) => return Err(DataError::io(&path)(err)),
        };
        let record: DatasetRecord = serde_json::from_reader(BufReader::new(file))
            .map_err(|source| DataError::Format {
                path: path.clone(),
                source,
            })?;
        log::debug!(
            "loaded dataset '{name}' ({} values) from {}",
            record.values.len(),
            path.display()
        );
        Ok(record)
    }

    /// Loads the dataset `name` as a sample.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`DatasetStore::load_record`], and
    /// [`DataError::InvalidInput`] if the stored values do not form a valid
    /// sample.
    pub fn load(&self, name: &str) -> Result<Sample, DataError> {
        let record = self.load_record(name)?;
        Ok(Sample::new(record.values)?)
    }

    /// Names of all saved datasets, sorted.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::Io`] if the directory cannot be read.
    pub fn list(&self) -> Result<Vec<String>, DataError> {
        let entries = fs::read_dir(&self.dir).map_err(DataError::io(&self.dir))?;
        let mut names = Vec::new();
        for entry in entries {
            let path = entry.map_err(DataError::io(&self.dir))?.path();
            if path.extension() != Some(OsStr::new(EXTENSION)) || !path.is_file() {
                continue;
            }
            match path.file_stem().and_then(OsStr::to_str) {
                Some(stem) if validate_name(stem).is_ok() => names.push(stem.to_owned()),
                _ => log::debug!("skipping {}", path.display()),
            }
        }
        names.sort();
        Ok(names)
    }
}

fn validate_name(name: &str) -> Result<(), DataError> {
    let valid = !name.is_empty()
        && !name.starts_with('.')
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
    if valid {
        Ok(())
    } else {
        Err(DataError::InvalidName {
            name: name.to_owned(),
        })
    }
}
