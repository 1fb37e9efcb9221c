//! Working-directory resolution for commands that accept an optional path.

use crate::error::{Error, Result};
use std::path::PathBuf;

/// Resolve an optional user-supplied path into a working directory.
///
/// Expands `~`, falls back to the current directory, and requires the
/// result to be an existing directory.
pub fn resolve_dir(path: Option<&str>) -> Result<PathBuf> {
    let dir = match path {
        Some(p) => PathBuf::from(shellexpand::tilde(p).to_string()),
        None => std::env::current_dir()
            .map_err(|e| Error::internal_io(e.to_string(), Some("current_dir".to_string())))?,
    };

    if !dir.is_dir() {
        return Err(Error::validation_invalid_argument(
            "path",
            format!("Not a directory: {}", dir.display()),
            Some(dir.to_string_lossy().to_string()),
            None,
        ));
    }

    Ok(dir)
}
