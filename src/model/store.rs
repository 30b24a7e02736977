//! The loaded dataset and its identity-keyed overlays.

use super::column::ColumnMeta;
use super::mark::MarkColor;
use super::row::{Row, RowId};
use std::collections::HashMap;

/// Immutable rows plus sparse mark and comment overlays.
///
/// Rows are never renumbered and their identities never recomputed. The
/// overlays are keyed by identity, so they survive filtering, and entries
/// whose identity no longer matches any row are inert.
#[derive(Debug, Clone, Default)]
pub struct RowStore {
    columns: Vec<ColumnMeta>,
    rows: Vec<Row>,
    marks: HashMap<RowId, MarkColor>,
    comments: HashMap<RowId, String>,
}

impl RowStore {
    /// Store over `rows` with empty overlays.
    pub fn new(columns: Vec<ColumnMeta>, rows: Vec<Row>) -> Self {
        Self {
            columns,
            rows,
            marks: HashMap::new(),
            comments: HashMap::new(),
        }
    }

    /// Replace every row and clear both overlays.
    pub fn load(&mut self, columns: Vec<ColumnMeta>, rows: Vec<Row>) {
        self.columns = columns;
        self.rows = rows;
        self.marks.clear();
        self.comments.clear();
    }

    /// Column metadata in header order.
    pub fn columns(&self) -> &[ColumnMeta] {
        &self.columns
    }

    /// Mutable column metadata, for layout passes.
    pub fn columns_mut(&mut self) -> &mut [ColumnMeta] {
        &mut self.columns
    }

    /// All rows in source order.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Row at a store position.
    pub fn row_at(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when nothing is loaded.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Mark for an identity; `MarkColor::None` when absent.
    pub fn mark(&self, id: RowId) -> MarkColor {
        self.marks.get(&id).copied().unwrap_or_default()
    }

    /// Set a mark. `MarkColor::None` removes the entry.
    pub fn set_mark(&mut self, id: RowId, color: MarkColor) {
        if color.is_marked() {
            self.marks.insert(id, color);
        } else {
            self.marks.remove(&id);
        }
    }

    /// Remove a mark.
    pub fn clear_mark(&mut self, id: RowId) {
        self.marks.remove(&id);
    }

    /// Comment for an identity, if any.
    pub fn comment(&self, id: RowId) -> Option<&str> {
        self.comments.get(&id).map(String::as_str)
    }

    /// Set a comment. Empty text removes the entry.
    pub fn set_comment(&mut self, id: RowId, text: impl Into<String>) {
        let text = text.into();
        if text.is_empty() {
            self.comments.remove(&id);
        } else {
            self.comments.insert(id, text);
        }
    }

    /// The mark overlay.
    pub fn marks(&self) -> &HashMap<RowId, MarkColor> {
        &self.marks
    }

    /// The comment overlay.
    pub fn comments(&self) -> &HashMap<RowId, String> {
        &self.comments
    }

    /// Replace both overlays wholesale (snapshot restore).
    pub fn restore_overlays(
        &mut self,
        marks: HashMap<RowId, MarkColor>,
        comments: HashMap<RowId, String>,
    ) {
        self.marks = marks
            .into_iter()
            .filter(|(_, color)| color.is_marked())
            .collect();
        self.comments = comments
            .into_iter()
            .filter(|(_, text)| !text.is_empty())
            .collect();
    }

    /// Merge overlay entries for identities present in the current rows.
    ///
    /// Returns how many entries were applied.
    pub fn merge_overlays(
        &mut self,
        marks: HashMap<RowId, MarkColor>,
        comments: HashMap<RowId, String>,
    ) -> usize {
        let present: std::collections::HashSet<RowId> = self.rows.iter().map(Row::id).collect();
        let mut applied = 0;
        for (id, color) in marks {
            if present.contains(&id) && color.is_marked() {
                self.marks.insert(id, color);
                applied += 1;
            }
        }
        for (id, text) in comments {
            if present.contains(&id) && !text.is_empty() {
                self.comments.insert(id, text);
                applied += 1;
            }
        }
        applied
    }
}
