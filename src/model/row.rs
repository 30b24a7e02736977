//! Rows and their content-addressed identity.

use serde::{Deserialize, Serialize};
use std::cell::Cell;
use std::fmt;
use std::str::FromStr;

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Content fingerprint of a row.
///
/// FNV-1a 64 over every cell, lowercased and trimmed, each followed by a
/// NUL separator. Rows with identical normalized content share an identity.
/// Saved snapshots key their overlays by this value, so the scheme must not
/// change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RowId(u64);

impl RowId {
    /// Compute the identity of a sequence of cells.
    pub fn from_cells<S: AsRef<str>>(cells: &[S]) -> Self {
        let mut hash = FNV_OFFSET_BASIS;
        for cell in cells {
            let normalized = cell.as_ref().trim().to_lowercase();
            for byte in normalized.bytes().chain(std::iter::once(0u8)) {
                hash ^= u64::from(byte);
                hash = hash.wrapping_mul(FNV_PRIME);
            }
        }
        Self(hash)
    }

    /// Wrap a raw hash value (e.g. read back from a snapshot).
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw 64-bit hash.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RowId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u64>().map(Self)
    }
}

/// One record of the loaded dataset.
///
/// Cells and identity are fixed at load time. `rendered_height` is a cache
/// written by the renderer and carries no invariant.
#[derive(Debug, Clone)]
pub struct Row {
    cells: Vec<String>,
    id: RowId,
    source_ordinal: usize,
    rendered_height: Cell<usize>,
}

impl Row {
    /// Build a row from raw cells, computing its identity.
    pub fn new(cells: Vec<String>, source_ordinal: usize) -> Self {
        let id = RowId::from_cells(&cells);
        Self {
            cells,
            id,
            source_ordinal,
            rendered_height: Cell::new(1),
        }
    }

    /// Rebuild a row whose identity was computed in an earlier session.
    pub fn restore(cells: Vec<String>, id: RowId, source_ordinal: usize, height: usize) -> Self {
        Self {
            cells,
            id,
            source_ordinal,
            rendered_height: Cell::new(height.max(1)),
        }
    }

    /// Cell values in column order.
    pub fn cells(&self) -> &[String] {
        &self.cells
    }

    /// Cell at `index`, or `""` for ragged rows.
    pub fn cell(&self, index: usize) -> &str {
        self.cells.get(index).map(String::as_str).unwrap_or("")
    }

    /// Content identity.
    pub fn id(&self) -> RowId {
        self.id
    }

    /// 1-based position in the original input.
    pub fn source_ordinal(&self) -> usize {
        self.source_ordinal
    }

    /// Lines this row took the last time it was drawn.
    pub fn rendered_height(&self) -> usize {
        self.rendered_height.get()
    }

    /// Record the height the renderer produced.
    pub fn set_rendered_height(&self, height: usize) {
        self.rendered_height.set(height);
    }

    /// Cells joined with tabs; the text that filters, search and the
    /// clipboard operate on.
    pub fn content(&self) -> String {
        self.cells.join("\t")
    }
}
