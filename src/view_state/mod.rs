//! View-state layer - column layout and viewport windowing
//!
//! Pure computations that sit between the filtered row list and the
//! renderer. Nothing here touches the terminal.
//!
//! # Module Structure
//!
//! - `layout`: column width assignment and row gutter sizing
//! - `window`: selection of the rows drawn around the cursor

pub mod layout;
pub mod window;

pub use layout::{gutter_width, layout_columns, COMMENT_MARKER};
pub use window::{window_around_cursor, ViewportWindow};
