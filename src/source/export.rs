//! CSV export of the rows currently on screen.

use super::write_atomic;
use crate::model::{ColumnMeta, RowStore, WriteError};
use std::path::Path;
use tracing::info;

/// Write `visible` rows (or every row when `visible` is empty) to `path`.
///
/// The header is every column name in source order followed by `mark` and
/// `comment`. Cells are padded or cut to the header width. Returns the
/// number of rows written.
///
/// # Errors
///
/// Fails when the CSV writer or the atomic write fails.
pub fn export_csv(store: &RowStore, visible: &[usize], path: &Path) -> Result<usize, WriteError> {
    let csv_error = |source| WriteError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut columns: Vec<&ColumnMeta> = store.columns().iter().collect();
    columns.sort_by_key(|column| column.source_index);

    let mut writer = csv::Writer::from_writer(Vec::new());
    let mut header: Vec<&str> = columns.iter().map(|column| column.name.as_str()).collect();
    header.extend(["mark", "comment"]);
    writer.write_record(&header).map_err(csv_error)?;

    let all: Vec<usize>;
    let indices = if visible.is_empty() {
        all = (0..store.len()).collect();
        &all
    } else {
        visible
    };

    let mut written = 0;
    for row in indices.iter().filter_map(|&index| store.row_at(index)) {
        let mut record: Vec<&str> = columns
            .iter()
            .map(|column| row.cell(column.source_index))
            .collect();
        record.push(store.mark(row.id()).as_str());
        record.push(store.comment(row.id()).unwrap_or(""));
        writer.write_record(&record).map_err(csv_error)?;
        written += 1;
    }

    let bytes = writer.into_inner().map_err(|err| WriteError::Io {
        path: path.to_path_buf(),
        source: err.into_error(),
    })?;
    write_atomic(path, &bytes)?;
    info!(path = %path.display(), rows = written, "Exported CSV");
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::column::columns_from_header;
    use crate::model::{MarkColor, Row};
    use tempfile::TempDir;

    fn store() -> RowStore {
        let header: Vec<String> = ["time", "details"].iter().map(|s| s.to_string()).collect();
        let rows = vec![
            Row::new(vec!["10:00".into(), "boot, ok".into()], 1),
            Row::new(vec!["10:05".into(), "error".into()], 2),
            Row::new(vec!["10:09".into()], 3),
        ];
        let columns = columns_from_header(&header, &rows);
        let mut store = RowStore::new(columns, rows);
        let id = store.rows()[1].id();
        store.set_mark(id, MarkColor::Amber);
        store.set_comment(id, "look");
        store
    }

    #[test]
    fn exports_visible_rows_with_overlays() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.csv");

        let written = export_csv(&store(), &[1], &path).unwrap();

        assert_eq!(written, 1);
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, "time,details,mark,comment\n10:05,error,amber,look\n");
    }

    #[test]
    fn empty_visible_list_exports_everything() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("all.csv");

        let written = export_csv(&store(), &[], &path).unwrap();

        assert_eq!(written, 3);
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("\"boot, ok\""));
        assert!(text.ends_with("10:09,,,\n"));
    }
}
