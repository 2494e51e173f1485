//! Core types for ui5rt
//!
//! The foundation shared by every stage of the installer: the error
//! taxonomy of the pipeline and the user-facing rendering of those errors.
//!
//! # Error Management
//!
//! - **Strongly-typed errors** ([`RuntimeError`]) so stages and tests can
//!   match on the exact failure class
//! - **User-friendly contexts** ([`ErrorContext`]) with actionable suggestions
//!   for CLI users
//! - [`user_friendly_error`] converts any [`anyhow::Error`] for display
//!
//! # Example
//!
//! ```rust
//! use ui5rt_cli::core::{RuntimeError, user_friendly_error};
//!
//! let error = RuntimeError::download("https://example.test/a.zip", "connection reset");
//! let friendly = user_friendly_error(error.into());
//! assert!(friendly.suggestion.is_some());
//! ```

pub mod error;

pub use error::{ErrorContext, Result, RuntimeError, TriedCandidate, user_friendly_error};
