//! CSV import.
//!
//! The first record is the header; every later record becomes a row with a
//! 1-based source ordinal. Records may have any number of fields.

use super::Dataset;
use crate::model::column::columns_from_header;
use crate::model::{LoadError, Row};
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::info;

/// Load a CSV file.
///
/// # Errors
///
/// Fails when the file cannot be read, a record is malformed, or there are
/// no records at all.
pub fn load_csv(path: &Path) -> Result<Dataset, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let dataset = read_csv(file, path)?;
    info!(
        path = %path.display(),
        rows = dataset.rows.len(),
        columns = dataset.columns.len(),
        "Loaded CSV"
    );
    Ok(dataset)
}

/// Parse CSV from any reader. `path` is only used in errors.
pub fn read_csv<R: Read>(reader: R, path: &Path) -> Result<Dataset, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut header: Option<Vec<String>> = None;
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|source| LoadError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
        let cells: Vec<String> = record.iter().map(str::to_string).collect();
        if header.is_none() {
            header = Some(cells);
        } else {
            let ordinal = rows.len() + 1;
            rows.push(Row::new(cells, ordinal));
        }
    }

    let header = header.ok_or_else(|| LoadError::EmptyCsv {
        path: path.to_path_buf(),
    })?;
    let columns = columns_from_header(&header, &rows);

    Ok(Dataset {
        columns,
        rows,
        marks: HashMap::new(),
        comments: HashMap::new(),
    })
}
