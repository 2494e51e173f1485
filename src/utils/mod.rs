//! Utilities and helpers
//!
//! # Modules
//!
//! - [`fs`] - Creation and removal of the managed directories
//! - [`progress`] - The progress reporter seam and its terminal rendering
//!
//! # Example
//!
//! ```rust,no_run
//! use ui5rt_cli::utils::{ensure_dir, ProgressBar};
//! use std::path::Path;
//!
//! # async fn example() -> anyhow::Result<()> {
//! ensure_dir(Path::new("lib")).await?;
//!
//! let progress = ProgressBar::new(100);
//! progress.set_prefix("Processing");
//! # Ok(())
//! # }
//! ```

pub mod fs;
pub mod progress;

pub use fs::{ensure_dir, recreate_dir, remove_dir_all};
pub use progress::{ConsoleProgress, NoProgress, Phase, ProgressBar, ProgressReporter};
