//! Shared plumbing for the subcommands: turning flags, `package.json` and the
//! environment into a [`RuntimeConfig`].

use anyhow::{Context, Result};
use clap::Args;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

use super::CliConfig;
use crate::config::{Endpoints, HostConfig, RuntimeConfig, proxy_from_env};
use crate::constants::DEFAULT_DESTINATION;
use crate::utils::progress::{ConsoleProgress, ProgressReporter};

/// Where the runtime lives and which version to aim for.
#[derive(Args, Debug, Clone, Default)]
pub struct TargetArgs {
    /// Runtime version to install instead of the newest available release
    #[arg(long = "runtime-version", value_name = "VERSION")]
    pub runtime_version: Option<String>,

    /// Destination directory (default: `destination` from package.json, else `<project>/lib`)
    #[arg(long, value_name = "DIR")]
    pub dest: Option<PathBuf>,

    /// Directory the archive is downloaded into (default: `.ui5rt-tmp` next to the destination)
    #[arg(long = "scratch-dir", value_name = "DIR")]
    pub scratch_dir: Option<PathBuf>,
}

/// Everything a subcommand needs to build its [`RuntimeConfig`].
pub struct CommandContext {
    project_dir: PathBuf,
    host: HostConfig,
    endpoints: Endpoints,
    cli: CliConfig,
}

impl CommandContext {
    /// Read the host project's configuration.
    pub async fn load(cli: CliConfig) -> Result<Self> {
        let project_dir = match &cli.project_dir {
            Some(dir) => dir.clone(),
            None => std::env::current_dir().context("Failed to determine the current directory")?,
        };
        let host = HostConfig::load(&project_dir).await?;
        debug!("Host configuration from {}: {:?}", project_dir.display(), host);

        Ok(Self {
            project_dir,
            host,
            endpoints: cli.endpoints(),
            cli,
        })
    }

    /// The global CLI settings.
    pub fn cli(&self) -> &CliConfig {
        &self.cli
    }

    /// Build the run configuration; flags win over `package.json`, which wins
    /// over the defaults. The environment is not consulted, so offline
    /// commands work whatever the proxy variables hold.
    pub fn runtime_config(&self, target: &TargetArgs) -> Result<RuntimeConfig> {
        let pinned_version = target.runtime_version.clone().or_else(|| self.host.version.clone());

        let mut config = RuntimeConfig::new(self.destination(target.dest.as_deref()))
            .with_pinned_version(pinned_version)
            .with_endpoints(self.endpoints.clone());

        if let Some(scratch_dir) = &target.scratch_dir {
            config = config.with_scratch_dir(scratch_dir);
        }
        Ok(config)
    }

    /// [`Self::runtime_config`] plus the proxy from the environment, for
    /// commands that go over the network.
    pub fn network_config(&self, target: &TargetArgs) -> Result<RuntimeConfig> {
        Ok(self.runtime_config(target)?.with_proxy(proxy_from_env()?))
    }

    fn destination(&self, flag: Option<&Path>) -> PathBuf {
        if let Some(dest) = flag {
            return dest.to_path_buf();
        }
        match &self.host.destination {
            Some(dest) => self.project_dir.join(dest),
            None => self.project_dir.join(DEFAULT_DESTINATION),
        }
    }

    /// Progress reporter honouring `--no-progress`, `--quiet` and `UI5RT_NO_PROGRESS`.
    pub fn progress(&self) -> Arc<dyn ProgressReporter> {
        if self.cli.no_progress || self.cli.quiet {
            Arc::new(ConsoleProgress::with_hidden(true))
        } else {
            Arc::new(ConsoleProgress::new())
        }
    }
}
