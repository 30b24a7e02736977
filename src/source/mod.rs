//! Files in and out.
//!
//! - CSV import and snapshot loading, dispatched on file extension
//! - snapshot and meta sidecar writes
//! - CSV export
//! - clipboard copy

use crate::model::{ColumnMeta, LoadError, MarkColor, Row, RowId, RowStore, WriteError};
use std::collections::HashMap;
use std::ffi::OsString;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

pub mod clipboard;
pub mod export;
pub mod import;
pub mod snapshot;

pub use clipboard::{copy_text, ClipboardError};
pub use export::export_csv;
pub use import::load_csv;
pub use snapshot::{load_meta, load_snapshot, save_meta, save_snapshot, SNAPSHOT_VERSION};

/// Everything a load produces.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    /// Column metadata in source order.
    pub columns: Vec<ColumnMeta>,
    /// Rows in source order.
    pub rows: Vec<Row>,
    /// Mark overlay (empty for CSV imports).
    pub marks: HashMap<RowId, MarkColor>,
    /// Comment overlay (empty for CSV imports).
    pub comments: HashMap<RowId, String>,
}

impl Dataset {
    /// Build a store with the loaded overlays in place.
    pub fn into_store(self) -> RowStore {
        let mut store = RowStore::new(self.columns, self.rows);
        store.restore_overlays(self.marks, self.comments);
        store
    }
}

/// Load `.csv` as an import or `.json` as a snapshot.
///
/// # Errors
///
/// Any other extension is rejected before the file is opened.
pub fn load_dataset(path: &Path) -> Result<Dataset, LoadError> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("csv") => load_csv(path),
        Some("json") => load_snapshot(path),
        _ => Err(LoadError::UnsupportedExtension {
            path: path.to_path_buf(),
        }),
    }
}

/// `<path>.tmp`, next to the target.
fn temp_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".tmp");
    PathBuf::from(name)
}

/// Write through a temporary sibling, then rename over the target. The file
/// is readable only by its owner on unix.
pub(crate) fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), WriteError> {
    let io_error = |source| WriteError::Io {
        path: path.to_path_buf(),
        source,
    };
    let tmp = temp_path(path);

    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let result = options
        .open(&tmp)
        .and_then(|mut file| {
            file.write_all(bytes)?;
            file.sync_all()
        })
        .and_then(|()| fs::rename(&tmp, path));

    if result.is_err() {
        let _ = fs::remove_file(&tmp);
    }
    result.map_err(io_error)
}
