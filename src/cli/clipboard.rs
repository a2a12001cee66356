//! System clipboard access for generated passwords.
//!
//! Only available when built with the `clipboard` feature.

use crate::errors::{PassVaultError, Result};

/// Place `text` on the system clipboard.
#[cfg(feature = "clipboard")]
pub fn copy(text: &str) -> Result<()> {
    let mut clipboard =
        arboard::Clipboard::new().map_err(|e| PassVaultError::Clipboard(e.to_string()))?;
    clipboard
        .set_text(text.to_owned())
        .map_err(|e| PassVaultError::Clipboard(e.to_string()))
}

/// Place `text` on the system clipboard.
#[cfg(not(feature = "clipboard"))]
pub fn copy(_text: &str) -> Result<()> {
    Err(PassVaultError::Clipboard(
        "this build has no clipboard support; rebuild with `--features clipboard`".into(),
    ))
}
