//! The `path` command prints the directory a host build tool should serve the
//! runtime from. The output is the bare path so it can be used in scripts:
//!
//! ```bash
//! ui5 serve --resources "$(ui5rt path)"
//! ```

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use super::common::{CommandContext, TargetArgs};

/// Print `<destination>/resources`.
#[derive(Args, Debug, Default)]
pub struct PathCommand {
    /// Destination directory
    #[arg(long, value_name = "DIR")]
    pub dest: Option<PathBuf>,
}

impl PathCommand {
    pub fn execute(self, context: &CommandContext) -> Result<()> {
        let config = context.runtime_config(&TargetArgs {
            dest: self.dest,
            ..TargetArgs::default()
        })?;
        println!("{}", config.resources_dir().display());
        Ok(())
    }
}
