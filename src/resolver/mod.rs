//! Version resolution for the runtime archive.
//!
//! [`VersionResolver`] turns "which runtime should be installed?" into a
//! concrete [`ResolvedTarget`] (version + archive URL).
//!
//! # Strategy
//!
//! - **Pinned version**: the URL is derived from the version string. No
//!   request is made.
//! - **Latest**: the version manifest is fetched and turned into a
//!   newest-first candidate list. Candidates are probed one at a time, in
//!   order, and the first one whose archive answers with a success status
//!   wins. The manifest's declared current version is not trusted blindly:
//!   its archive is regularly published later than the manifest entry.
//!
//! Probing is strictly sequential; probing in parallel could pick an older
//! release over a newer reachable one.
//!
//! # Example
//!
//! ```rust,no_run
//! use ui5rt_cli::config::Endpoints;
//! use ui5rt_cli::resolver::VersionResolver;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let client = ui5rt_cli::http::build_client(None)?;
//! let resolver = VersionResolver::new(client, Endpoints::default());
//!
//! let target = resolver.resolve(None).await?;
//! println!("{} -> {}", target.version, target.url);
//! # Ok(())
//! # }
//! ```

mod manifest;

pub use manifest::VersionManifest;

use reqwest::{Client, StatusCode};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

use crate::config::Endpoints;
use crate::constants::archive_file_name;
use crate::core::{Result, RuntimeError, TriedCandidate};
use crate::utils::progress::{NoProgress, Phase, ProgressReporter};

/// The outcome of resolution: what to install and where to get it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTarget {
    /// Runtime version
    pub version: String,
    /// Archive URL for that version
    pub url: String,
}

impl fmt::Display for ResolvedTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.version, self.url)
    }
}

/// Resolves the runtime version to install.
pub struct VersionResolver {
    client: Client,
    endpoints: Endpoints,
    progress: Arc<dyn ProgressReporter>,
}

impl VersionResolver {
    /// Create a resolver that talks to `endpoints` through `client`.
    pub fn new(client: Client, endpoints: Endpoints) -> Self {
        Self {
            client,
            endpoints,
            progress: Arc::new(NoProgress),
        }
    }

    /// Report probing progress to `progress`.
    pub fn with_progress(mut self, progress: Arc<dyn ProgressReporter>) -> Self {
        self.progress = progress;
        self
    }

    /// Archive URL for a version under the configured download base.
    pub fn archive_url(&self, version: &str) -> String {
        format!("{}{}", self.endpoints.download_base, archive_file_name(version))
    }

    /// Resolve the target: the pinned version, or the newest reachable release.
    pub async fn resolve(&self, pinned: Option<&str>) -> Result<ResolvedTarget> {
        if let Some(version) = pinned {
            let target = ResolvedTarget {
                version: version.to_string(),
                url: self.archive_url(version),
            };
            debug!("Using pinned version {}", target);
            return Ok(target);
        }

        let manifest = self.fetch_manifest().await?;
        let candidates = manifest.candidates();
        debug!(
            "Manifest declares {} as current; probing {} candidates",
            manifest.current_version,
            candidates.len()
        );

        self.progress.start(Phase::Resolve, Some(candidates.len() as u64));
        let result = self.probe_candidates(&candidates).await;
        self.progress.finish(Phase::Resolve, result.is_ok());

        let target = result?;
        info!("Resolved runtime {}", target);
        Ok(target)
    }

    /// Fetch and parse the version manifest.
    pub async fn fetch_manifest(&self) -> Result<VersionManifest> {
        let endpoint = &self.endpoints.manifest_url;
        let unavailable = |reason: String| RuntimeError::ManifestUnavailable {
            endpoint: endpoint.clone(),
            reason,
        };

        debug!("Fetching version manifest from {}", endpoint);
        let response =
            self.client.get(endpoint).send().await.map_err(|e| unavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(unavailable(format!("HTTP {status}")));
        }

        let body = response.text().await.map_err(|e| unavailable(e.to_string()))?;
        VersionManifest::parse(&body).map_err(unavailable)
    }

    async fn probe_candidates(&self, candidates: &[String]) -> Result<ResolvedTarget> {
        let mut tried = Vec::new();

        for (index, version) in candidates.iter().enumerate() {
            let url = self.archive_url(version);
            let outcome = self.probe(&url).await;
            self.progress.advance(Phase::Resolve, index as u64 + 1);

            match outcome {
                Ok(()) => {
                    return Ok(ResolvedTarget {
                        version: version.clone(),
                        url,
                    });
                }
                Err(reason) => {
                    debug!("Candidate {} unreachable at {}: {}", version, url, reason);
                    tried.push(TriedCandidate {
                        version: version.clone(),
                        url,
                        reason,
                    });
                }
            }
        }

        Err(RuntimeError::Resolution {
            manifest_url: self.endpoints.manifest_url.clone(),
            download_base: self.endpoints.download_base.clone(),
            tried,
        })
    }

    /// Check that an archive URL is served, using HEAD where the server allows it.
    async fn probe(&self, url: &str) -> std::result::Result<(), String> {
        let response = self.client.head(url).send().await.map_err(|e| e.to_string())?;

        let status = match response.status() {
            StatusCode::METHOD_NOT_ALLOWED | StatusCode::NOT_IMPLEMENTED => {
                debug!("HEAD not supported for {}, probing with GET", url);
                self.client.get(url).send().await.map_err(|e| e.to_string())?.status()
            }
            status => status,
        };

        if status.is_success() {
            Ok(())
        } else {
            Err(format!("HTTP {status}"))
        }
    }
}
