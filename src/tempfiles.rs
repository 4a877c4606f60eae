//! Best-effort cleanup of generated temp images

use std::io;
use std::path::Path;

/// Delete `path` if it exists. Failures are logged and otherwise ignored.
pub fn delete_temp_file(path: &Path) {
    match std::fs::remove_file(path) {
        Ok(()) => tracing::debug!(path = %path.display(), "Removed temp image"),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => tracing::warn!(path = %path.display(), "Failed to remove temp image: {e}"),
    }
}
