//! ui5rt - installer for the SAPUI5 runtime distribution
//!
//! ui5rt puts a SAPUI5 runtime into a project directory so local tooling can
//! serve it. It resolves the version to install (a pinned one, or the newest
//! release whose archive is actually downloadable), downloads the archive over
//! HTTPS and unpacks it, skipping all of that when the installed version
//! already matches.
//!
//! # Architecture
//!
//! The pipeline is four components driven by one state machine:
//!
//! - [`resolver`] - version manifest parsing and candidate probing
//! - [`fetch`] - streaming archive download
//! - [`extract`] - zip extraction into the destination
//! - [`installer`] - the resolve / check / install / clean state machine
//!
//! Supporting modules:
//!
//! - [`config`] - run configuration, `package.json` settings, proxy factory
//! - [`http`] - the shared HTTP client (EULA cookie, proxy)
//! - [`core`] - error types and user-facing error rendering
//! - [`utils`] - directory helpers and progress reporting
//! - [`cli`] - the `ui5rt` command line
//!
//! # Example
//!
//! ```rust,no_run
//! use ui5rt_cli::config::RuntimeConfig;
//! use ui5rt_cli::installer::InstallOrchestrator;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let mut orchestrator = InstallOrchestrator::new(RuntimeConfig::new("lib"))?;
//! let outcome = orchestrator.run().await?;
//! println!("runtime {} ready", outcome.version());
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod core;
pub mod http;

pub mod extract;
pub mod fetch;
pub mod installer;
pub mod resolver;

pub mod utils;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
