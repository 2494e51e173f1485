//! File system helpers for the managed directories.
//!
//! The installer owns two directories outright: the destination and the
//! scratch directory. These helpers create and remove them, mapping failures
//! to [`RuntimeError::Filesystem`] with the offending path attached.

use std::path::Path;
use tokio::fs;
use tracing::debug;

use crate::core::{Result, RuntimeError};

/// Removes a directory and all its contents if it exists.
///
/// A directory that is already gone is not an error.
pub async fn remove_dir_all(path: &Path) -> Result<()> {
    match fs::remove_dir_all(path).await {
        Ok(()) => {
            debug!("Removed {}", path.display());
            Ok(())
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(RuntimeError::filesystem("remove directory", path, e)),
    }
}

/// Ensures a directory exists, creating parents as needed.
pub async fn ensure_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path).await.map_err(|e| RuntimeError::filesystem("create directory", path, e))
}

/// Deletes a directory if present and creates it again, empty.
pub async fn recreate_dir(path: &Path) -> Result<()> {
    remove_dir_all(path).await?;
    ensure_dir(path).await
}
