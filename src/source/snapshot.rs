//! JSON snapshots and meta sidecars.
//!
//! A snapshot holds the whole dataset plus overlays and restores it exactly.
//! A meta sidecar holds only the overlays, so they can be re-applied to a
//! fresh CSV import of the same data. Both carry a version and are rejected
//! on mismatch.

use super::{write_atomic, Dataset};
use crate::model::column::columns_from_header;
use crate::model::{ColumnMeta, ColumnRole, LoadError, MarkColor, Row, RowId, RowStore, WriteError};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use tracing::info;

/// Format version written and accepted.
pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RowDto {
    cols: Vec<String>,
    #[serde(default)]
    height: usize,
    id: u64,
    original_index: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ColumnDto {
    name: String,
    index: usize,
    role: ColumnRole,
    visible: bool,
    min_width: usize,
    weight: f64,
}

#[derive(Debug, Serialize, Deserialize)]
struct SnapshotDto {
    version: u32,
    header: RowDto,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    columns: Option<Vec<ColumnDto>>,
    rows: Vec<RowDto>,
    #[serde(default)]
    marked: BTreeMap<String, String>,
    #[serde(default)]
    comments: BTreeMap<String, String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct MetaDto {
    version: u32,
    #[serde(default)]
    marked: BTreeMap<String, String>,
    #[serde(default)]
    comments: BTreeMap<String, String>,
}

#[derive(Deserialize)]
struct VersionProbe {
    version: u32,
}

// ===== conversions =====

fn row_to_dto(row: &Row) -> RowDto {
    RowDto {
        cols: row.cells().to_vec(),
        height: row.rendered_height(),
        id: row.id().get(),
        original_index: row.source_ordinal(),
    }
}

fn row_from_dto(dto: RowDto) -> Row {
    Row::restore(dto.cols, RowId::from_raw(dto.id), dto.original_index, dto.height)
}

fn column_to_dto(column: &ColumnMeta) -> ColumnDto {
    ColumnDto {
        name: column.name.clone(),
        index: column.source_index,
        role: column.role,
        visible: column.visible,
        min_width: column.min_width,
        weight: column.weight,
    }
}

fn column_from_dto(dto: ColumnDto) -> ColumnMeta {
    ColumnMeta {
        role: dto.role,
        visible: dto.visible,
        min_width: dto.min_width,
        weight: dto.weight,
        ..ColumnMeta::new(dto.name, dto.index)
    }
}

fn header_names(columns: &[ColumnMeta]) -> Vec<String> {
    let mut ordered: Vec<&ColumnMeta> = columns.iter().collect();
    ordered.sort_by_key(|column| column.source_index);
    ordered.iter().map(|column| column.name.clone()).collect()
}

fn marks_to_wire(marks: &HashMap<RowId, MarkColor>) -> BTreeMap<String, String> {
    marks
        .iter()
        .filter(|(_, color)| color.is_marked())
        .map(|(id, color)| (id.to_string(), color.as_str().to_string()))
        .collect()
}

fn comments_to_wire(comments: &HashMap<RowId, String>) -> BTreeMap<String, String> {
    comments
        .iter()
        .map(|(id, text)| (id.to_string(), text.clone()))
        .collect()
}

fn parse_key(key: &str) -> Result<RowId, LoadError> {
    key.parse::<RowId>().map_err(|_| LoadError::InvalidKey {
        key: key.to_string(),
    })
}

/// Decode overlay maps. Unknown mark values are dropped.
fn overlays_from_wire(
    marked: BTreeMap<String, String>,
    comments: BTreeMap<String, String>,
) -> Result<(HashMap<RowId, MarkColor>, HashMap<RowId, String>), LoadError> {
    let mut marks = HashMap::new();
    for (key, value) in marked {
        let id = parse_key(&key)?;
        let color = MarkColor::from_wire(&value);
        if color.is_marked() {
            marks.insert(id, color);
        }
    }
    let mut notes = HashMap::new();
    for (key, text) in comments {
        let id = parse_key(&key)?;
        if !text.is_empty() {
            notes.insert(id, text);
        }
    }
    Ok((marks, notes))
}

fn read_json(path: &Path) -> Result<String, LoadError> {
    std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn check_version(text: &str, path: &Path) -> Result<(), LoadError> {
    let probe: VersionProbe = serde_json::from_str(text).map_err(|source| LoadError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    if probe.version != SNAPSHOT_VERSION {
        return Err(LoadError::VersionMismatch {
            found: probe.version,
            expected: SNAPSHOT_VERSION,
        });
    }
    Ok(())
}

// ===== snapshot =====

/// Write every row, the column metadata, and both overlays.
///
/// # Errors
///
/// Fails when encoding or any step of the atomic write fails.
pub fn save_snapshot(store: &RowStore, path: &Path) -> Result<(), WriteError> {
    let names = header_names(store.columns());
    let header = RowDto {
        id: RowId::from_cells(names.as_slice()).get(),
        cols: names,
        height: 1,
        original_index: 0,
    };
    let dto = SnapshotDto {
        version: SNAPSHOT_VERSION,
        header,
        columns: Some(store.columns().iter().map(column_to_dto).collect()),
        rows: store.rows().iter().map(row_to_dto).collect(),
        marked: marks_to_wire(store.marks()),
        comments: comments_to_wire(store.comments()),
    };
    let text = serde_json::to_string_pretty(&dto)?;
    write_atomic(path, text.as_bytes())?;
    info!(path = %path.display(), rows = dto.rows.len(), "Saved snapshot");
    Ok(())
}

/// Read a snapshot back.
///
/// Stored identities are trusted, not recomputed. Without stored column
/// metadata the columns are rebuilt from the header names.
///
/// # Errors
///
/// Fails on I/O, malformed JSON, a version mismatch, or a non-numeric
/// overlay key.
pub fn load_snapshot(path: &Path) -> Result<Dataset, LoadError> {
    let text = read_json(path)?;
    check_version(&text, path)?;
    let dto: SnapshotDto = serde_json::from_str(&text).map_err(|source| LoadError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    let rows: Vec<Row> = dto.rows.into_iter().map(row_from_dto).collect();
    let columns = match dto.columns {
        Some(columns) => columns.into_iter().map(column_from_dto).collect(),
        None => columns_from_header(&dto.header.cols, &rows),
    };
    let (marks, comments) = overlays_from_wire(dto.marked, dto.comments)?;

    info!(
        path = %path.display(),
        rows = rows.len(),
        marks = marks.len(),
        comments = comments.len(),
        "Loaded snapshot"
    );
    Ok(Dataset {
        columns,
        rows,
        marks,
        comments,
    })
}

// ===== meta sidecar =====

/// Write only the overlays.
///
/// # Errors
///
/// Fails when encoding or any step of the atomic write fails.
pub fn save_meta(store: &RowStore, path: &Path) -> Result<(), WriteError> {
    let dto = MetaDto {
        version: SNAPSHOT_VERSION,
        marked: marks_to_wire(store.marks()),
        comments: comments_to_wire(store.comments()),
    };
    let text = serde_json::to_string_pretty(&dto)?;
    write_atomic(path, text.as_bytes())?;
    info!(path = %path.display(), "Saved meta sidecar");
    Ok(())
}

/// Read a sidecar's overlays. The caller merges them into the current rows.
///
/// # Errors
///
/// Fails on I/O, malformed JSON, a version mismatch, or a non-numeric key.
pub fn load_meta(
    path: &Path,
) -> Result<(HashMap<RowId, MarkColor>, HashMap<RowId, String>), LoadError> {
    let text = read_json(path)?;
    check_version(&text, path)?;
    let dto: MetaDto = serde_json::from_str(&text).map_err(|source| LoadError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    overlays_from_wire(dto.marked, dto.comments)
}
