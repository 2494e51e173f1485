//! Installer settings embedded in the host project's `package.json`.
//!
//! Host projects configure the installer under a `"sapui5-runtime"` key:
//!
//! ```json
//! {
//!   "name": "my-app",
//!   "sapui5-runtime": {
//!     "version": "1.120.4",
//!     "destination": "webapp/runtime"
//!   }
//! }
//! ```
//!
//! Both fields are optional. Older projects used the camel-case key
//! `"sapui5Runtime"`, which is still honoured when the new key is absent.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

use crate::constants::{LEGACY_PACKAGE_JSON_KEY, PACKAGE_JSON_KEY};
use crate::core::{Result, RuntimeError};

/// The `"sapui5-runtime"` section of a `package.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct HostConfig {
    /// Pinned runtime version; `None` installs the newest available release
    #[serde(default)]
    pub version: Option<String>,
    /// Destination directory, relative to the project directory
    #[serde(default)]
    pub destination: Option<PathBuf>,
}

impl HostConfig {
    /// Load the installer section from `<project_dir>/package.json`.
    ///
    /// A missing file or a file without the section yields the default
    /// (empty) configuration. A file that exists but cannot be read or parsed
    /// is a [`RuntimeError::Config`].
    pub async fn load(project_dir: &Path) -> Result<Self> {
        let path = project_dir.join("package.json");

        let content = match fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No package.json at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(RuntimeError::config(format!(
                    "failed to read {}: {e}",
                    path.display()
                )));
            }
        };

        Self::from_package_json(&content)
            .map_err(|e| RuntimeError::config(format!("{}: {e}", path.display())))
    }

    /// Extract the installer section from the text of a `package.json`.
    pub fn from_package_json(content: &str) -> std::result::Result<Self, serde_json::Error> {
        let document: serde_json::Value = serde_json::from_str(content)?;

        let section =
            document.get(PACKAGE_JSON_KEY).or_else(|| document.get(LEGACY_PACKAGE_JSON_KEY));

        match section {
            Some(section) => {
                let config: Self = serde_json::from_value(section.clone())?;
                Ok(config.normalized())
            }
            None => Ok(Self::default()),
        }
    }

    fn normalized(mut self) -> Self {
        self.version = self.version.map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        self
    }
}
