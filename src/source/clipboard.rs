//! System clipboard access.

use thiserror::Error;

/// Clipboard unavailable or rejected the text.
#[derive(Debug, Error)]
#[error("clipboard error: {0}")]
pub struct ClipboardError(String);

/// Put `text` on the system clipboard.
///
/// # Errors
///
/// Fails when no clipboard is reachable (e.g. a headless session).
pub fn copy_text(text: &str) -> Result<(), ClipboardError> {
    let mut clipboard =
        arboard::Clipboard::new().map_err(|error| ClipboardError(error.to_string()))?;
    clipboard
        .set_text(text.to_string())
        .map_err(|error| ClipboardError(error.to_string()))
}
