//! Reading the installed-version marker.

use serde::Deserialize;
use std::path::Path;
use tracing::debug;

use crate::config::RuntimeConfig;

#[derive(Deserialize)]
struct MarkerFile {
    version: String,
}

/// The `sap-ui-version.json` file shipped inside every runtime archive.
///
/// Its `version` field records what is installed in the destination.
pub struct InstalledMarker;

impl InstalledMarker {
    /// Installed version, or `None` when nothing usable is installed.
    ///
    /// Looks in `<dest>/resources/` first, then `<dest>/`. A missing,
    /// unreadable or malformed marker is treated as "not installed".
    pub async fn read(config: &RuntimeConfig) -> Option<String> {
        for path in config.marker_paths() {
            if let Some(version) = read_marker(&path).await {
                return Some(version);
            }
        }
        None
    }
}

async fn read_marker(path: &Path) -> Option<String> {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
        Err(e) => {
            debug!("Ignoring unreadable marker {}: {}", path.display(), e);
            return None;
        }
    };

    match serde_json::from_str::<MarkerFile>(&content) {
        Ok(marker) => Some(marker.version.trim().to_string()).filter(|v| !v.is_empty()),
        Err(e) => {
            debug!("Ignoring malformed marker {}: {}", path.display(), e);
            None
        }
    }
}
