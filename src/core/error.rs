//! Error handling for ui5rt
//!
//! This module provides the error taxonomy of the installer pipeline and the
//! user-facing rendering of those errors. The error system follows two rules:
//! 1. **Strongly-typed errors** so callers and tests can match on the failure
//! 2. **User-friendly messages** with actionable suggestions for CLI users
//!
//! # Architecture
//!
//! - [`RuntimeError`] - one variant per failure class of the pipeline
//! - [`ErrorContext`] - wrapper that adds details and a suggestion for display
//!
//! # Error Categories
//!
//! | Variant | Raised by | Filesystem state afterwards |
//! |---------|-----------|-----------------------------|
//! | [`RuntimeError::ManifestUnavailable`] | resolver | untouched |
//! | [`RuntimeError::Resolution`] | resolver | untouched |
//! | [`RuntimeError::Download`] | fetcher | destination removed |
//! | [`RuntimeError::Extract`] | extractor | destination removed |
//! | [`RuntimeError::Filesystem`] | installer | whatever could not be changed |
//! | [`RuntimeError::Config`] | config loading | untouched |
//!
//! No variant is retried anywhere in the crate; every failure surfaces once.
//!
//! Use [`user_friendly_error`] to turn any [`anyhow::Error`] into an
//! [`ErrorContext`] ready for display.

use colored::Colorize;
use std::fmt;
use std::path::Path;
use thiserror::Error;

/// Result alias for the installer pipeline.
pub type Result<T, E = RuntimeError> = std::result::Result<T, E>;

/// A candidate version that was probed during resolution and found unreachable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriedCandidate {
    /// The candidate version string
    pub version: String,
    /// The archive URL that was probed
    pub url: String,
    /// Why the probe failed (HTTP status or transport error)
    pub reason: String,
}

impl fmt::Display for TriedCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.version, self.url, self.reason)
    }
}

/// Failures of the resolve / fetch / extract / install pipeline.
#[derive(Error, Debug, Clone)]
pub enum RuntimeError {
    /// The version manifest could not be fetched or did not have the expected shape
    ///
    /// Raised for transport errors, non-success HTTP statuses, malformed JSON
    /// and manifests without `libraries[0].patchHistory`.
    #[error("Version manifest unavailable at {endpoint}: {reason}")]
    ManifestUnavailable {
        /// The manifest URL that was requested
        endpoint: String,
        /// What went wrong
        reason: String,
    },

    /// No candidate version had a reachable archive
    #[error("No downloadable runtime archive found ({} candidates tried from {manifest_url})", tried.len())]
    Resolution {
        /// The manifest the candidates came from
        manifest_url: String,
        /// The base URL archives were probed under
        download_base: String,
        /// Every probed candidate, in probe order
        tried: Vec<TriedCandidate>,
    },

    /// Transport failure while downloading the archive
    #[error("Failed to download {url}: {reason}")]
    Download {
        /// The archive URL
        url: String,
        /// What went wrong
        reason: String,
    },

    /// The archive could not be read or unpacked
    #[error("Failed to extract {archive}: {reason}")]
    Extract {
        /// Path of the archive on disk
        archive: String,
        /// What went wrong
        reason: String,
    },

    /// A managed directory could not be created or removed
    #[error("File system error: {operation} {path}: {reason}")]
    Filesystem {
        /// The operation that failed (e.g. "create directory")
        operation: String,
        /// The path the operation targeted
        path: String,
        /// The underlying error
        reason: String,
    },

    /// Invalid host configuration (package.json, proxy settings)
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error
        message: String,
    },
}

impl RuntimeError {
    /// Build a [`RuntimeError::Filesystem`] from an IO error.
    pub fn filesystem(operation: &str, path: &Path, err: impl fmt::Display) -> Self {
        Self::Filesystem {
            operation: operation.to_string(),
            path: path.display().to_string(),
            reason: err.to_string(),
        }
    }

    /// Build a [`RuntimeError::Download`] for a URL.
    pub fn download(url: &str, reason: impl fmt::Display) -> Self {
        Self::Download {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Build a [`RuntimeError::Extract`] for an archive path.
    pub fn extract(archive: &Path, reason: impl fmt::Display) -> Self {
        Self::Extract {
            archive: archive.display().to_string(),
            reason: reason.to_string(),
        }
    }

    /// Build a [`RuntimeError::Config`].
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}

/// Error wrapper carrying user-facing details and a suggestion
///
/// # Examples
///
/// ```rust,no_run
/// use ui5rt_cli::core::{ErrorContext, RuntimeError};
///
/// let context = ErrorContext::new(RuntimeError::config("bad proxy"))
///     .with_suggestion("Check HTTPS_PROXY")
///     .with_details("The proxy URL could not be parsed");
/// context.display();
/// ```
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error message
    pub error: String,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context from a [`RuntimeError`]
    #[must_use]
    pub fn new(error: RuntimeError) -> Self {
        Self {
            error: error.to_string(),
            suggestion: None,
            details: None,
        }
    }

    /// Create an error context from a plain message
    #[must_use]
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error
    ///
    /// Suggestions are displayed in green in the terminal.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add additional details explaining the error
    ///
    /// Details are displayed in yellow in the terminal.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Display the error context to stderr with terminal colors
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error to a user-friendly [`ErrorContext`] with actionable suggestions
///
/// [`RuntimeError`] variants get tailored suggestions. IO errors get
/// filesystem guidance. Anything else is shown with its full cause chain.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    if let Some(runtime_error) = error.downcast_ref::<RuntimeError>() {
        return create_error_context(runtime_error.clone());
    }

    if let Some(io_error) = error.downcast_ref::<std::io::Error>() {
        if io_error.kind() == std::io::ErrorKind::PermissionDenied {
            return ErrorContext::message(error.to_string()).with_suggestion(
                "Check the ownership and permissions of the destination directory",
            );
        }
    }

    let mut message = error.to_string();
    let chain: Vec<String> = error.chain().skip(1).map(std::string::ToString::to_string).collect();

    if !chain.is_empty() {
        message.push_str("\n\nCaused by:");
        for (i, cause) in chain.iter().enumerate() {
            message.push_str(&format!("\n  {}: {}", i + 1, cause));
        }
    }

    ErrorContext::message(message)
}

fn create_error_context(error: RuntimeError) -> ErrorContext {
    match &error {
        RuntimeError::ManifestUnavailable {
            endpoint,
            ..
        } => {
            let suggestion = format!(
                "Check your network connection and proxy settings (HTTPS_PROXY), or pin a version with --runtime-version. Manifest: {endpoint}"
            );
            ErrorContext::new(error).with_suggestion(suggestion).with_details(
                "The version manifest is needed to discover the latest runtime when no version is pinned",
            )
        }

        RuntimeError::Resolution {
            tried,
            download_base,
            ..
        } => {
            let details = tried.iter().map(|t| format!("  {t}")).collect::<Vec<_>>().join("\n");
            let suggestion = format!(
                "Pin a version known to exist under {download_base} with --runtime-version"
            );
            ErrorContext::new(error)
                .with_details(format!("Probed candidates:\n{details}"))
                .with_suggestion(suggestion)
        }

        RuntimeError::Download {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Check your network connection and proxy settings, then run the installer again")
            .with_details("The destination directory was removed to avoid a half-populated install"),

        RuntimeError::Extract {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Run the installer again to download a fresh copy of the archive")
            .with_details("The archive is corrupt or not a zip file; the destination directory was removed"),

        RuntimeError::Filesystem {
            ..
        } => ErrorContext::new(error).with_suggestion(match cfg!(windows) {
            true => "Check that no other process holds files in the directory and that you have write access",
            false => "Check directory permissions with 'ls -la'",
        }),

        RuntimeError::Config {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Check the \"sapui5-runtime\" section of package.json and the HTTP(S)_PROXY variables"),
    }
}
