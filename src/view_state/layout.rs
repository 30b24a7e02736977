//! Column width assignment.

use crate::model::ColumnMeta;

/// Width of the mark pill at the start of every row.
pub const MARK_PILL_WIDTH: usize = 1;

/// Marker drawn before the ordinal of rows that carry a comment.
pub const COMMENT_MARKER: &str = "[*]";

/// Columns taken by the row gutter (pill, comment marker, ordinal, gap).
pub fn gutter_width(max_ordinal: usize) -> usize {
    let digits = max_ordinal.max(1).to_string().len();
    MARK_PILL_WIDTH + COMMENT_MARKER.len() + digits + 1
}

/// Assign widths to columns for a table `total_width` cells wide.
///
/// Visible columns get at least their minimum, and the remainder is shared
/// by weight. When the minimums alone do not fit, every visible column is
/// clamped to `min(min_width, total_width)` instead of failing. Hidden
/// columns always get width 0. A zero width leaves the columns unchanged.
pub fn layout_columns(columns: &[ColumnMeta], total_width: usize) -> Vec<ColumnMeta> {
    let mut out = columns.to_vec();
    if total_width == 0 {
        return out;
    }

    let (min_sum, weight_sum) = out
        .iter()
        .filter(|c| c.visible)
        .fold((0usize, 0f64), |(min, weight), c| {
            (min + c.min_width, weight + c.weight.max(0.0))
        });

    if min_sum >= total_width {
        for column in &mut out {
            column.width = if column.visible {
                column.min_width.min(total_width)
            } else {
                0
            };
        }
        return out;
    }

    let remaining = total_width - min_sum;
    for column in &mut out {
        if !column.visible {
            column.width = 0;
            continue;
        }
        let extra = if weight_sum > 0.0 {
            (remaining as f64 * column.weight.max(0.0) / weight_sum).floor() as usize
        } else {
            0
        };
        column.width = column.min_width + extra;
    }

    // Float rounding can overshoot by a cell; take it back from the widest.
    let mut used: usize = out.iter().map(|c| c.width).sum();
    while used > total_width {
        let Some(widest) = out
            .iter_mut()
            .filter(|c| c.visible && c.width > c.min_width)
            .max_by_key(|c| c.width)
        else {
            break;
        };
        widest.width -= 1;
        used -= 1;
    }

    out
}
