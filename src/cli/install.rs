//! The `install` command: resolve, download and unpack the runtime.
//!
//! ```bash
//! ui5rt install                               # newest release into ./lib
//! ui5rt install --runtime-version 1.120.4     # pinned
//! ui5rt install --force                       # reinstall even when up to date
//! ```

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use super::common::{CommandContext, TargetArgs};
use crate::installer::{InstallOrchestrator, InstallOutcome};

/// Install the runtime into the destination directory.
#[derive(Args, Debug, Default)]
pub struct InstallCommand {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Reinstall even when the installed version already matches
    #[arg(long)]
    pub force: bool,
}

impl InstallCommand {
    pub async fn execute(self, context: &CommandContext) -> Result<()> {
        let config = context.network_config(&self.target)?.with_force(self.force);

        let mut orchestrator = InstallOrchestrator::new(config)?.with_progress(context.progress());
        let outcome = orchestrator.run().await?;

        if context.cli().quiet {
            return Ok(());
        }
        match outcome {
            InstallOutcome::UpToDate {
                version,
            } => {
                println!("{} SAPUI5 runtime {} is up to date", "✓".green(), version.bold());
            }
            InstallOutcome::Installed {
                version,
                url,
            } => {
                println!("{} Installed SAPUI5 runtime {}", "✓".green(), version.bold());
                println!("  from {}", url.dimmed());
                println!("  into {}", orchestrator.config().destination_dir.display().to_string().cyan());
            }
        }
        Ok(())
    }
}
