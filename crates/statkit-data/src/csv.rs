//! Numeric column extraction from CSV files.
//!
//! The first record is the header. Quoted fields may hold commas, doubled
//! quotes and line breaks. Rows may be shorter or longer than the header.

use std::{fs, path::Path};

use csv::StringRecord;
use statkit_stats::{Sample, sample::parse_value};

use crate::DataError;

/// Reads one numeric column of a CSV file as a sample.
///
/// With `column` set, every cell of that column that parses as a finite
/// number is kept and the others are dropped. Without it, the first column
/// whose non-blank cells are all numeric is used.
///
/// # Errors
///
/// Returns [`DataError::Io`] if the file cannot be read, the errors of
/// [`extract_column`], and [`DataError::InvalidInput`] if no value remains.
pub fn read_column(path: &Path, column: Option<&str>) -> Result<Sample, DataError> {
    let text = fs::read_to_string(path).map_err(DataError::io(path))?;
    let values = extract_column(&text, column)?;
    log::debug!(
        "read {} values from {}{}",
        values.len(),
        path.display(),
        column.map(|c| format!(" column '{c}'")).unwrap_or_default()
    );
    Ok(Sample::new(values)?)
}

/// Extracts the numeric values of one column from CSV text.
///
/// # Errors
///
/// Returns [`DataError::Csv`] if the text is not valid CSV,
/// [`DataError::ColumnNotFound`] if the named column is not in the header
/// and [`DataError::NoNumericColumn`] if no column qualifies.
///
/// # Examples
///
/// ```
/// use statkit_data::csv::extract_column;
///
/// let text = "name,score\nann,85\nbob,n/a\ncid,92\n";
/// assert_eq!(extract_column(text, Some("score")).unwrap(), vec![85.0, 92.0]);
/// assert_eq!(extract_column(text, None).unwrap(), vec![85.0, 92.0]);
/// ```
pub fn extract_column(text: &str, column: Option<&str>) -> Result<Vec<f64>, DataError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());
    let header = reader.headers()?.clone();
    let rows = reader.records().collect::<Result<Vec<_>, _>>()?;

    let index = match column {
        Some(name) => header
            .iter()
            .position(|h| h.trim() == name.trim())
            .ok_or_else(|| DataError::ColumnNotFound {
                column: name.to_owned(),
            })?,
        None => (0..header.len())
            .find(|&i| is_numeric_column(&rows, i))
            .ok_or(DataError::NoNumericColumn)?,
    };

    let mut dropped = 0;
    let values = rows
        .iter()
        .filter_map(|row| {
            let value = row.get(index).and_then(|cell| parse_value(cell).ok());
            if value.is_none() {
                dropped += 1;
            }
            value
        })
        .collect::<Vec<_>>();
    if dropped > 0 {
        log::debug!(
            "dropped {dropped} non-numeric cells from column '{}'",
            header.get(index).unwrap_or_default().trim()
        );
    }
    Ok(values)
}

fn is_numeric_column(rows: &[StringRecord], index: usize) -> bool {
    let mut cells = rows
        .iter()
        .filter_map(|row| row.get(index))
        .filter(|cell| !cell.trim().is_empty())
        .peekable();
    cells.peek().is_some() && cells.all(|cell| parse_value(cell).is_ok())
}
