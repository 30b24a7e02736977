//! Viewport windowing over variable-height rows.
//!
//! Which rows are drawn depends on how tall each one renders at the current
//! column widths, and that is only known by rendering it. The windower
//! starts from the cursor row and grows outward, asking the renderer for one
//! row at a time, until the height budget is spent.

/// Rows selected for display, top to bottom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewportWindow<T> {
    /// Rendered rows in screen order.
    pub rows: Vec<T>,
    /// Visible-list position of `rows[0]`.
    pub first: usize,
    /// Index into `rows` of the cursor row.
    pub cursor_offset: usize,
    /// Total lines taken by `rows`.
    pub used_height: usize,
}

impl<T> ViewportWindow<T> {
    /// Visible-list position of the last row in the window.
    pub fn last(&self) -> usize {
        self.first + self.rows.len().saturating_sub(1)
    }

    /// Step used by page-up and page-down: the number of rows shown.
    pub fn page_size(&self) -> usize {
        self.rows.len().max(1)
    }
}

/// Select a contiguous run of rows around `cursor` that fits `available_height`.
///
/// `render(position)` renders the row at a visible-list position and returns
/// it with its height in lines. The cursor row is always included; if it is
/// taller than the budget it is returned alone. Otherwise about half the
/// leftover budget goes above the cursor so it sits near the middle. A row
/// that does not fit closes its direction for good, so no partial rows are
/// produced.
///
/// Returns `None` when `cursor` is not a valid position.
pub fn window_around_cursor<T, F>(
    len: usize,
    cursor: usize,
    available_height: usize,
    mut render: F,
) -> Option<ViewportWindow<T>>
where
    F: FnMut(usize) -> (T, usize),
{
    if cursor >= len {
        return None;
    }

    let (cursor_row, cursor_height) = render(cursor);
    if cursor_height >= available_height {
        return Some(ViewportWindow {
            rows: vec![cursor_row],
            first: cursor,
            cursor_offset: 0,
            used_height: cursor_height,
        });
    }

    let mut free = available_height - cursor_height;
    let desired_above = free / 2;

    let mut above: Vec<T> = Vec::new();
    let mut below: Vec<T> = Vec::new();
    let mut above_height = 0;
    let mut next_up = cursor; // candidate is next_up - 1
    let mut next_down = cursor + 1;
    let mut up_open = next_up > 0;
    let mut down_open = next_down < len;

    while free > 0 && (up_open || down_open) {
        let go_up = up_open && (above_height < desired_above || !down_open);
        if go_up {
            let (row, height) = render(next_up - 1);
            if height <= free {
                above.push(row);
                above_height += height;
                free -= height;
                next_up -= 1;
                up_open = next_up > 0;
            } else {
                up_open = false;
            }
        } else {
            let (row, height) = render(next_down);
            if height <= free {
                below.push(row);
                free -= height;
                next_down += 1;
                down_open = next_down < len;
            } else {
                down_open = false;
            }
        }
    }

    let cursor_offset = above.len();
    let mut rows = above;
    rows.reverse();
    rows.push(cursor_row);
    rows.extend(below);

    Some(ViewportWindow {
        rows,
        first: cursor - cursor_offset,
        cursor_offset,
        used_height: available_height - free,
    })
}
