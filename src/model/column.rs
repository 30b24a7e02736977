//! Column metadata and role inference.

use super::row::Row;
use serde::{Deserialize, Serialize};

/// How much room a column asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnRole {
    /// Ordinary column.
    Normal,
    /// The main free-text column (`details`). Never auto-hidden.
    Primary,
    /// Short identifying columns (`id`, `time`).
    Secondary,
}

impl ColumnRole {
    /// Infer a role from a header name.
    pub fn infer(name: &str) -> Self {
        match normalize_header(name).to_lowercase().as_str() {
            "details" => Self::Primary,
            "id" | "time" => Self::Secondary,
            _ => Self::Normal,
        }
    }

    /// Default minimum width in terminal cells.
    pub fn min_width(self) -> usize {
        match self {
            Self::Primary => 30,
            Self::Secondary => 12,
            Self::Normal => 8,
        }
    }

    /// Default share of leftover width.
    pub fn weight(self) -> f64 {
        match self {
            Self::Primary => 5.0,
            Self::Secondary => 2.0,
            Self::Normal => 1.0,
        }
    }
}

/// Layout-relevant description of one column.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnMeta {
    /// Header text.
    pub name: String,
    /// Position of the column in each row's cells.
    pub source_index: usize,
    /// Inferred role.
    pub role: ColumnRole,
    /// Hidden columns take no width.
    pub visible: bool,
    /// Lower bound on the computed width.
    pub min_width: usize,
    /// Share of the leftover width.
    pub weight: f64,
    /// Width assigned by the last layout pass.
    pub width: usize,
}

impl ColumnMeta {
    /// Metadata for a header name with role defaults applied.
    pub fn new(name: impl Into<String>, source_index: usize) -> Self {
        let name = name.into();
        let role = ColumnRole::infer(&name);
        Self {
            name,
            source_index,
            role,
            visible: true,
            min_width: role.min_width(),
            weight: role.weight(),
            width: 0,
        }
    }
}

/// Strip surrounding whitespace and a UTF-8 byte order mark from a header cell.
pub fn normalize_header(name: &str) -> &str {
    name.trim().trim_start_matches('\u{feff}').trim()
}

/// Build column metadata for a header row, hiding columns with no data.
pub fn columns_from_header(header: &[String], rows: &[Row]) -> Vec<ColumnMeta> {
    let mut columns: Vec<ColumnMeta> = header
        .iter()
        .enumerate()
        .map(|(index, name)| ColumnMeta::new(normalize_header(name), index))
        .collect();
    hide_empty_columns(&mut columns, rows);
    columns
}

/// Hide every non-primary column that has no non-blank value in any row.
pub fn hide_empty_columns(columns: &mut [ColumnMeta], rows: &[Row]) {
    for column in columns.iter_mut() {
        if column.role == ColumnRole::Primary {
            continue;
        }
        let has_data = rows
            .iter()
            .any(|row| !row.cell(column.source_index).trim().is_empty());
        if !has_data {
            column.visible = false;
            column.width = 0;
        }
    }
}

/// Index of the time column, if the header has one.
pub fn find_time_column(columns: &[ColumnMeta]) -> Option<usize> {
    columns
        .iter()
        .find(|column| normalize_header(&column.name).eq_ignore_ascii_case("time"))
        .map(|column| column.source_index)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Row {
        Row::new(cells.iter().map(|c| c.to_string()).collect(), 1)
    }

    #[test]
    fn roles_follow_header_names() {
        assert_eq!(ColumnRole::infer("Details"), ColumnRole::Primary);
        assert_eq!(ColumnRole::infer(" id "), ColumnRole::Secondary);
        assert_eq!(ColumnRole::infer("TIME"), ColumnRole::Secondary);
        assert_eq!(ColumnRole::infer("host"), ColumnRole::Normal);
    }

    #[test]
    fn role_defaults_drive_min_width_and_weight() {
        let column = ColumnMeta::new("details", 0);
        assert_eq!(column.min_width, 30);
        assert_eq!(column.weight, 5.0);
        let column = ColumnMeta::new("host", 1);
        assert_eq!(column.min_width, 8);
        assert_eq!(column.weight, 1.0);
    }

    #[test]
    fn empty_columns_are_hidden_except_primary() {
        let header = vec!["time".to_string(), "unused".to_string(), "details".to_string()];
        let rows = vec![row(&["10:00", " ", ""]), row(&["10:01", "", ""])];

        let columns = columns_from_header(&header, &rows);

        assert!(columns[0].visible);
        assert!(!columns[1].visible, "blank column should be hidden");
        assert!(columns[2].visible, "primary column is never hidden");
    }

    #[test]
    fn bom_is_stripped_from_header() {
        let header = vec!["\u{feff}time".to_string()];
        let rows = vec![row(&["x"])];
        let columns = columns_from_header(&header, &rows);
        assert_eq!(columns[0].name, "time");
        assert_eq!(columns[0].role, ColumnRole::Secondary);
        assert_eq!(find_time_column(&columns), Some(0));
    }

    #[test]
    fn find_time_column_is_none_without_time_header() {
        let columns = vec![ColumnMeta::new("host", 0)];
        assert_eq!(find_time_column(&columns), None);
    }
}
