//! Domain model types (pure).
//!
//! Rows, their identity, column metadata, and the overlays that hang off
//! identities. Nothing here knows about terminals or files.

pub mod column;
pub mod command;
pub mod error;
pub mod key_action;
pub mod mark;
pub mod row;
pub mod store;
pub mod timestamp;

// Re-export for convenience
pub use column::{ColumnMeta, ColumnRole};
pub use command::CommandKind;
pub use error::{AppError, LoadError, WriteError};
pub use key_action::KeyAction;
pub use mark::MarkColor;
pub use row::{Row, RowId};
pub use store::RowStore;
