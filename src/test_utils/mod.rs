//! Test utilities for ui5rt
//!
//! Helpers shared by unit and integration tests: once-guarded logging setup
//! and in-memory fixtures (zip archives, version manifests, markers).
//!
//! # Example
//!
//! ```rust,no_run
//! use ui5rt_cli::test_utils::{init_test_logging, runtime_zip};
//!
//! init_test_logging(None);
//! let bytes = runtime_zip("1.120.4");
//! assert!(!bytes.is_empty());
//! ```

pub mod fixtures;

pub use fixtures::{manifest_json, marker_json, runtime_zip, zip_archive};

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Only the first call has an effect. Uses `level` when given, otherwise
/// `RUST_LOG`; with neither, tests run without logging.
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .with_ansi(true)
            .try_init();
    });
}
