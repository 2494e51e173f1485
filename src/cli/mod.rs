//! Command-line interface for ui5rt.
//!
//! This module defines the `ui5rt` command structure and dispatches to the
//! subcommand implementations. Parsing uses clap's derive API.
//!
//! # Commands
//!
//! - `install` - Resolve, download and unpack the runtime (the default)
//! - `status` - Show the installed runtime version
//! - `path` - Print the directory the runtime resources are served from
//! - `resolve` - Show which version and archive an install would use
//!
//! # Global Options
//!
//! - `--project-dir` - Directory holding the host `package.json` (default: cwd)
//! - `--verbose` - Enable debug output
//! - `--quiet` - Suppress all output except errors
//! - `--no-progress` - Hide progress bars
//! - `--manifest-url` / `--download-base` - Alternative download server
//!
//! # Examples
//!
//! ```bash
//! # Install the newest runtime into ./lib
//! ui5rt
//!
//! # Install a specific version somewhere else
//! ui5rt install --runtime-version 1.120.4 --dest webapp/runtime
//!
//! # Where is it?
//! ui5rt path
//! ```

mod common;
mod install;
mod path;
mod resolve;
mod status;

pub use common::{CommandContext, TargetArgs};

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::config::Endpoints;
use crate::constants::{DEFAULT_DOWNLOAD_BASE, DEFAULT_MANIFEST_URL};

/// Settings derived from the global flags, shared by every subcommand.
///
/// Kept separate from [`Cli`] so tests can build one without parsing
/// arguments.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Log filter applied when `RUST_LOG` is not set
    pub log_level: Option<String>,
    /// Hide progress bars
    pub no_progress: bool,
    /// Suppress regular output
    pub quiet: bool,
    /// Host project directory; `None` means the current directory
    pub project_dir: Option<PathBuf>,
    /// Manifest URL override
    pub manifest_url: Option<String>,
    /// Download base override
    pub download_base: Option<String>,
}

impl CliConfig {
    /// Default configuration: info logging, progress shown, SAP endpoints.
    #[must_use]
    pub fn new() -> Self {
        Self {
            log_level: Some("info".to_string()),
            ..Self::default()
        }
    }

    /// Remote endpoints with any overrides applied.
    #[must_use]
    pub fn endpoints(&self) -> Endpoints {
        Endpoints::new(
            self.manifest_url.as_deref().unwrap_or(DEFAULT_MANIFEST_URL),
            self.download_base.as_deref().unwrap_or(DEFAULT_DOWNLOAD_BASE),
        )
    }

    /// Install the global tracing subscriber. `RUST_LOG` takes precedence over
    /// the level chosen by the flags. Logs go to stderr.
    pub fn init_logging(&self) {
        let default_level = self.log_level.as_deref().unwrap_or("info");
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    }
}

/// Installs and locates the SAPUI5 runtime for a project.
#[derive(Parser)]
#[command(
    name = "ui5rt",
    about = "Install the SAPUI5 runtime into a project",
    version,
    long_about = "ui5rt downloads the SAPUI5 runtime distribution (the newest available release, or a pinned version) and unpacks it into the project, skipping the download when that version is already installed."
)]
pub struct Cli {
    /// The subcommand to execute; `install` when omitted
    #[command(subcommand)]
    command: Option<Commands>,

    /// Enable verbose output (debug logging)
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Disable progress bars
    ///
    /// Progress bars are also hidden when `UI5RT_NO_PROGRESS` is set.
    #[arg(long, global = true)]
    no_progress: bool,

    /// Directory containing the host project's package.json
    #[arg(long, global = true, value_name = "DIR")]
    project_dir: Option<PathBuf>,

    /// URL of the version manifest
    #[arg(long, global = true, env = "UI5RT_MANIFEST_URL", value_name = "URL")]
    manifest_url: Option<String>,

    /// Base URL the runtime archives are downloaded from
    #[arg(long, global = true, env = "UI5RT_DOWNLOAD_BASE", value_name = "URL")]
    download_base: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Install the runtime (skipped when the installed version already matches)
    Install(install::InstallCommand),

    /// Show the installed runtime version and location
    Status(status::StatusCommand),

    /// Print the runtime resources directory
    Path(path::PathCommand),

    /// Resolve the version an install would use, without installing
    Resolve(resolve::ResolveCommand),
}

impl Cli {
    /// Execute the parsed command line.
    pub async fn execute(self) -> Result<()> {
        let config = self.build_config();
        self.execute_with_config(config).await
    }

    /// Build a [`CliConfig`] from the parsed arguments.
    ///
    /// - `--verbose` logs at `debug`
    /// - `--quiet` logs errors only and hides progress
    /// - otherwise `info`
    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            "info"
        };

        CliConfig {
            log_level: Some(log_level.to_string()),
            no_progress: self.no_progress,
            quiet: self.quiet,
            project_dir: self.project_dir.clone(),
            manifest_url: self.manifest_url.clone(),
            download_base: self.download_base.clone(),
        }
    }

    /// Execute with an explicit configuration.
    pub async fn execute_with_config(self, config: CliConfig) -> Result<()> {
        config.init_logging();
        let context = CommandContext::load(config).await?;

        match self.command.unwrap_or_else(|| Commands::Install(install::InstallCommand::default())) {
            Commands::Install(cmd) => cmd.execute(&context).await,
            Commands::Status(cmd) => cmd.execute(&context).await,
            Commands::Path(cmd) => cmd.execute(&context),
            Commands::Resolve(cmd) => cmd.execute(&context).await,
        }
    }
}
