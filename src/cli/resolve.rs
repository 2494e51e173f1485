//! The `resolve` command: a dry run of version resolution.

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use super::common::{CommandContext, TargetArgs};
use crate::http::build_client;
use crate::resolver::VersionResolver;

/// Print the version and archive URL an install would use.
#[derive(Args, Debug, Default)]
pub struct ResolveCommand {
    /// Resolve this version instead of the newest available release
    #[arg(long = "runtime-version", value_name = "VERSION")]
    pub runtime_version: Option<String>,
}

impl ResolveCommand {
    pub async fn execute(self, context: &CommandContext) -> Result<()> {
        let config = context.network_config(&TargetArgs {
            runtime_version: self.runtime_version,
            ..TargetArgs::default()
        })?;

        let client = build_client(config.proxy.as_ref())?;
        let resolver = VersionResolver::new(client, config.endpoints.clone()).with_progress(context.progress());
        let target = resolver.resolve(config.pinned_version.as_deref()).await?;

        if context.cli().quiet {
            println!("{}", target.version);
        } else {
            println!("Version: {}", target.version.green().bold());
            println!("Archive: {}", target.url);
        }
        Ok(())
    }
}
