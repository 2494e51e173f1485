//! Configuration for a ui5rt run
//!
//! A run is described by a single immutable [`RuntimeConfig`], assembled once
//! by the CLI from three layers and then passed into the installer:
//!
//! 1. **Command-line flags** - highest precedence
//! 2. **Host project** (`package.json`, see [`HostConfig`])
//! 3. **Defaults** - newest release, `<project>/lib`, SAP public endpoints
//!
//! The proxy comes from the environment via [`proxy_from_env`], read once.
//!
//! # Example
//!
//! ```rust
//! use ui5rt_cli::config::RuntimeConfig;
//!
//! let config = RuntimeConfig::new("/srv/app/lib").with_pinned_version(Some("1.120.4".into()));
//! assert_eq!(config.pinned_version.as_deref(), Some("1.120.4"));
//! assert!(config.scratch_dir.ends_with(".ui5rt-tmp"));
//! ```

mod package_json;
mod proxy;

pub use package_json::HostConfig;
pub use proxy::{PROXY_ENV_VARS, ProxyConfig, proxy_from_env, proxy_from_lookup};

use std::path::{Path, PathBuf};

use crate::constants::{
    DEFAULT_DOWNLOAD_BASE, DEFAULT_MANIFEST_URL, MARKER_FILE_NAME, RESOURCES_DIR, SCRATCH_DIR_NAME,
};
use crate::core::{Result, RuntimeError};

/// Remote locations the installer talks to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    /// URL of the version manifest JSON
    pub manifest_url: String,
    /// Base URL archives are downloaded from; always ends with `/`
    pub download_base: String,
}

impl Endpoints {
    /// Create endpoints, normalizing the download base to end with `/`.
    pub fn new(manifest_url: impl Into<String>, download_base: impl Into<String>) -> Self {
        let mut download_base = download_base.into();
        if !download_base.ends_with('/') {
            download_base.push('/');
        }
        Self {
            manifest_url: manifest_url.into(),
            download_base,
        }
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self::new(DEFAULT_MANIFEST_URL, DEFAULT_DOWNLOAD_BASE)
    }
}

/// Immutable description of one installer run.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Version to install; `None` resolves the newest reachable release
    pub pinned_version: Option<String>,
    /// Directory the runtime is unpacked into (fully managed)
    pub destination_dir: PathBuf,
    /// Ephemeral directory the archive is downloaded into
    pub scratch_dir: PathBuf,
    /// Proxy all requests are tunneled through
    pub proxy: Option<ProxyConfig>,
    /// Remote endpoints
    pub endpoints: Endpoints,
    /// Reinstall even when the installed marker matches
    pub force: bool,
}

impl RuntimeConfig {
    /// Create a configuration for a destination with all other settings defaulted.
    ///
    /// The scratch directory defaults to a `.ui5rt-tmp` sibling of the destination.
    pub fn new(destination_dir: impl Into<PathBuf>) -> Self {
        let destination_dir = destination_dir.into();
        let scratch_dir = default_scratch_dir(&destination_dir);
        Self {
            pinned_version: None,
            destination_dir,
            scratch_dir,
            proxy: None,
            endpoints: Endpoints::default(),
            force: false,
        }
    }

    /// Pin the version to install.
    pub fn with_pinned_version(mut self, version: Option<String>) -> Self {
        self.pinned_version = version;
        self
    }

    /// Override the scratch directory.
    pub fn with_scratch_dir(mut self, scratch_dir: impl Into<PathBuf>) -> Self {
        self.scratch_dir = scratch_dir.into();
        self
    }

    /// Route requests through a proxy.
    pub fn with_proxy(mut self, proxy: Option<ProxyConfig>) -> Self {
        self.proxy = proxy;
        self
    }

    /// Override the remote endpoints.
    pub fn with_endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    /// Always reinstall, ignoring the installed marker.
    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    /// Directory holding the unpacked runtime resources.
    ///
    /// This is the directory a host build tool serves the runtime from.
    pub fn resources_dir(&self) -> PathBuf {
        self.destination_dir.join(RESOURCES_DIR)
    }

    /// Locations the installed-version marker may live at, in lookup order.
    pub fn marker_paths(&self) -> [PathBuf; 2] {
        [self.resources_dir().join(MARKER_FILE_NAME), self.destination_dir.join(MARKER_FILE_NAME)]
    }

    /// Reject layouts where removing the scratch directory would take the
    /// destination with it.
    pub fn validate(&self) -> Result<()> {
        if self.destination_dir.starts_with(&self.scratch_dir) {
            return Err(RuntimeError::config(format!(
                "scratch directory {} must not be the destination {} or contain it",
                self.scratch_dir.display(),
                self.destination_dir.display()
            )));
        }
        Ok(())
    }
}

fn default_scratch_dir(destination_dir: &Path) -> PathBuf {
    match destination_dir.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.join(SCRATCH_DIR_NAME),
        _ => PathBuf::from(SCRATCH_DIR_NAME),
    }
}
