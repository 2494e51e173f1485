//! The `status` command.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;

use super::common::{CommandContext, TargetArgs};
use crate::installer::InstalledMarker;

/// Show the installed runtime version and where it lives.
#[derive(Args, Debug, Default)]
pub struct StatusCommand {
    /// Destination directory to inspect
    #[arg(long, value_name = "DIR")]
    pub dest: Option<PathBuf>,
}

impl StatusCommand {
    pub async fn execute(self, context: &CommandContext) -> Result<()> {
        let config = context.runtime_config(&TargetArgs {
            dest: self.dest,
            ..TargetArgs::default()
        })?;

        match InstalledMarker::read(&config).await {
            Some(version) => println!("Installed: {}", version.green().bold()),
            None => println!("Installed: {}", "not installed".yellow()),
        }
        if let Some(pinned) = &config.pinned_version {
            println!("Pinned:    {pinned}");
        }
        println!("Resources: {}", config.resources_dir().display());
        Ok(())
    }
}
