//! The install state machine.
//!
//! [`InstallOrchestrator`] ties the pipeline together for one run:
//!
//! 1. **Resolve** the target version and archive URL ([`VersionResolver`])
//! 2. **Check** the installed marker; a matching version ends the run without
//!    touching the filesystem
//! 3. **Install**: recreate the destination and scratch directories, download
//!    the archive into scratch ([`ArchiveFetcher`]) and unpack it into the
//!    destination ([`ArchiveExtractor`])
//! 4. **Clean**: remove the scratch directory, whether the install worked or not
//!
//! A failed download or extraction also removes the destination, so a run
//! never leaves a half-populated runtime behind. Nothing is retried.
//!
//! The destination and scratch directories belong to one run at a time; two
//! concurrent runs against the same destination are not supported.
//!
//! # Example
//!
//! ```rust,no_run
//! use ui5rt_cli::config::RuntimeConfig;
//! use ui5rt_cli::installer::{InstallOrchestrator, InstallOutcome};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = RuntimeConfig::new("lib").with_pinned_version(Some("1.120.4".into()));
//! let mut orchestrator = InstallOrchestrator::new(config)?;
//!
//! match orchestrator.run().await? {
//!     InstallOutcome::UpToDate { version } => println!("{version} already installed"),
//!     InstallOutcome::Installed { version, .. } => println!("installed {version}"),
//! }
//! # Ok(())
//! # }
//! ```

mod marker;
mod state;


pub use marker::InstalledMarker;
pub use state::{InstallOutcome, InstallState};

use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::config::RuntimeConfig;
use crate::constants::{MARKER_FILE_NAME, archive_file_name};
use crate::core::Result;
use crate::extract::ArchiveExtractor;
use crate::fetch::ArchiveFetcher;
use crate::http::build_client;
use crate::resolver::{ResolvedTarget, VersionResolver};
use crate::utils::fs::{recreate_dir, remove_dir_all};
use crate::utils::progress::ProgressReporter;

/// Drives one resolve / check / install / clean run.
pub struct InstallOrchestrator {
    config: RuntimeConfig,
    resolver: VersionResolver,
    fetcher: ArchiveFetcher,
    extractor: ArchiveExtractor,
    history: Vec<InstallState>,
}

impl InstallOrchestrator {
    /// Create an orchestrator for `config`, building its HTTP client.
    ///
    /// Fails when the scratch directory would swallow the destination or
    /// when the proxy settings cannot be turned into a client.
    pub fn new(config: RuntimeConfig) -> Result<Self> {
        config.validate()?;
        let client = build_client(config.proxy.as_ref())?;
        let resolver = VersionResolver::new(client.clone(), config.endpoints.clone());
        let fetcher = ArchiveFetcher::new(client);

        Ok(Self {
            config,
            resolver,
            fetcher,
            extractor: ArchiveExtractor::new(),
            history: vec![InstallState::Idle],
        })
    }

    /// Route progress from every stage to `progress`.
    pub fn with_progress(self, progress: Arc<dyn ProgressReporter>) -> Self {
        Self {
            resolver: self.resolver.with_progress(Arc::clone(&progress)),
            fetcher: self.fetcher.with_progress(Arc::clone(&progress)),
            extractor: self.extractor.with_progress(progress),
            ..self
        }
    }

    /// The configuration this run uses.
    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// Current state.
    pub fn state(&self) -> InstallState {
        self.history.last().copied().unwrap_or(InstallState::Idle)
    }

    /// Every state entered so far, starting with [`InstallState::Idle`].
    pub fn history(&self) -> &[InstallState] {
        &self.history
    }

    /// Run the state machine to completion.
    pub async fn run(&mut self) -> Result<InstallOutcome> {
        self.transition(InstallState::Resolving);
        let target = match self.resolver.resolve(self.config.pinned_version.as_deref()).await {
            Ok(target) => target,
            Err(e) => {
                self.transition(InstallState::Failed);
                return Err(e);
            }
        };

        self.transition(InstallState::CheckingInstalled);
        if self.config.force {
            debug!("Forced reinstall of {}", target.version);
        } else {
            let installed = InstalledMarker::read(&self.config).await;
            debug!("Installed version: {:?}, target: {}", installed, target.version);
            if installed.as_deref() == Some(target.version.as_str()) {
                self.transition(InstallState::UpToDate);
                self.transition(InstallState::Done);
                info!("Runtime {} is already installed", target.version);
                return Ok(InstallOutcome::UpToDate {
                    version: target.version,
                });
            }
        }

        self.transition(InstallState::Installing);
        let installed = self.install(&target).await;
        if installed.is_err() {
            if let Err(e) = remove_dir_all(&self.config.destination_dir).await {
                warn!("Could not remove partial install: {}", e);
            }
        }

        self.transition(InstallState::Cleaning);
        let cleaned = remove_dir_all(&self.config.scratch_dir).await;

        match installed.and(cleaned) {
            Ok(()) => {
                self.transition(InstallState::Done);
                info!("Installed runtime {} into {}", target.version, self.config.destination_dir.display());
                Ok(InstallOutcome::Installed {
                    version: target.version,
                    url: target.url,
                })
            }
            Err(e) => {
                self.transition(InstallState::Failed);
                Err(e)
            }
        }
    }

    async fn install(&self, target: &ResolvedTarget) -> Result<()> {
        recreate_dir(&self.config.destination_dir).await?;
        recreate_dir(&self.config.scratch_dir).await?;

        let archive_path = self.config.scratch_dir.join(archive_file_name(&target.version));
        let archive = self.fetcher.download(&target.url, &archive_path).await?;
        self.extractor.extract(&archive, &self.config.destination_dir).await?;

        match InstalledMarker::read(&self.config).await {
            Some(version) if version == target.version => {}
            Some(version) => warn!(
                "Archive for {} reports version {} in its marker; the next run will reinstall",
                target.version, version
            ),
            None => warn!(
                "Archive for {} contains no {} marker; the next run will reinstall",
                target.version, MARKER_FILE_NAME
            ),
        }
        Ok(())
    }

    fn transition(&mut self, next: InstallState) {
        debug!("Installer state: {} -> {}", self.state(), next);
        self.history.push(next);
    }
}
