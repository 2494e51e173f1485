//! ui5rt CLI entry point
//!
//! Parses the command line, runs the selected command and renders failures
//! as user-friendly errors with a non-zero exit status.

use anyhow::Result;
use clap::Parser;
use ui5rt_cli::cli;
use ui5rt_cli::core::user_friendly_error;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    match cli.execute().await {
        Ok(()) => Ok(()),
        Err(e) => {
            user_friendly_error(e).display();
            std::process::exit(1);
        }
    }
}
