//! Progress reporting for the installer pipeline
//!
//! The pipeline stages never render anything themselves. They report through
//! the narrow [`ProgressReporter`] trait: one `start`, any number of
//! `advance` calls and one `finish` per [`Phase`]. Failures travel through
//! `Result`, not through the reporter.
//!
//! Two implementations ship with the crate:
//!
//! - [`ConsoleProgress`] renders `indicatif` bars (bytes for the download,
//!   entry counts for the extraction, a spinner while resolving)
//! - [`NoProgress`] discards everything
//!
//! # Environment Variables
//!
//! - `UI5RT_NO_PROGRESS`: Set to any value to hide all progress bars
//!
//! # Example
//!
//! ```rust
//! use ui5rt_cli::utils::progress::{ConsoleProgress, Phase, ProgressReporter};
//!
//! let progress = ConsoleProgress::new();
//! progress.start(Phase::Extract, Some(3));
//! for done in 1..=3 {
//!     progress.advance(Phase::Extract, done);
//! }
//! progress.finish(Phase::Extract, true);
//! ```

use indicatif::{ProgressBar as IndicatifBar, ProgressStyle as IndicatifStyle};
use std::fmt;
use std::sync::Mutex;
use std::time::Duration;

use crate::constants::NO_PROGRESS_ENV;

/// Checks if progress bars should be hidden.
fn is_progress_disabled() -> bool {
    std::env::var(NO_PROGRESS_ENV).is_ok()
}

/// Stage of the pipeline a progress event belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Manifest fetch and candidate probing; no meaningful total
    Resolve,
    /// Archive download; positions are bytes written
    Download,
    /// Archive extraction; positions are entries completed
    Extract,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Resolve => "Resolving",
            Self::Download => "Downloading",
            Self::Extract => "Extracting",
        };
        f.write_str(label)
    }
}

/// Observer of pipeline progress.
///
/// `advance` receives the absolute position (bytes written so far, entries
/// completed so far), never a delta.
pub trait ProgressReporter: Send + Sync {
    /// A phase has started; `total` is known for extraction and, when the
    /// server sends `Content-Length`, for the download.
    fn start(&self, phase: Phase, total: Option<u64>);

    /// The phase has progressed to `position`.
    fn advance(&self, phase: Phase, position: u64);

    /// The phase ended, successfully or not.
    fn finish(&self, phase: Phase, success: bool);
}

/// Reporter that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressReporter for NoProgress {
    fn start(&self, _phase: Phase, _total: Option<u64>) {}

    fn advance(&self, _phase: Phase, _position: u64) {}

    fn finish(&self, _phase: Phase, _success: bool) {}
}

/// Reporter rendering one terminal progress bar per phase.
pub struct ConsoleProgress {
    hidden: bool,
    current: Mutex<Option<ProgressBar>>,
}

impl ConsoleProgress {
    /// Create a console reporter; hidden when `UI5RT_NO_PROGRESS` is set.
    pub fn new() -> Self {
        Self::with_hidden(is_progress_disabled())
    }

    /// Create a console reporter with explicit visibility.
    pub fn with_hidden(hidden: bool) -> Self {
        Self {
            hidden,
            current: Mutex::new(None),
        }
    }

    fn bar_for(&self, phase: Phase, total: Option<u64>) -> ProgressBar {
        if self.hidden {
            return ProgressBar::hidden();
        }
        match (phase, total) {
            (Phase::Download, Some(len)) => ProgressBar::new_bytes(len),
            (Phase::Extract, Some(len)) => ProgressBar::new(len),
            _ => ProgressBar::new_spinner(),
        }
    }
}

impl Default for ConsoleProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter for ConsoleProgress {
    fn start(&self, phase: Phase, total: Option<u64>) {
        let bar = self.bar_for(phase, total);
        bar.set_prefix(phase.to_string());
        if let Ok(mut current) = self.current.lock() {
            if let Some(previous) = current.replace(bar) {
                previous.finish_and_clear();
            }
        }
    }

    fn advance(&self, _phase: Phase, position: u64) {
        if let Ok(current) = self.current.lock() {
            if let Some(bar) = current.as_ref() {
                bar.set_position(position);
            }
        }
    }

    fn finish(&self, phase: Phase, success: bool) {
        if let Ok(mut current) = self.current.lock() {
            if let Some(bar) = current.take() {
                if success {
                    bar.finish_with_message(format!("{phase} done"));
                } else {
                    bar.finish_and_clear();
                }
            }
        }
    }
}

/// A progress bar with consistent styling.
///
/// Wraps `indicatif`'s bar so every phase looks the same and so a hidden bar
/// can stand in whenever output is suppressed.
#[derive(Clone)]
pub struct ProgressBar {
    inner: IndicatifBar,
}

impl ProgressBar {
    /// Creates a count bar (`pos/len`) for a known number of work units.
    pub fn new(len: u64) -> Self {
        let bar = IndicatifBar::new(len);
        bar.set_style(default_style());
        Self {
            inner: bar,
        }
    }

    /// Creates a byte-counting bar for transfers of a known size.
    pub fn new_bytes(len: u64) -> Self {
        let bar = IndicatifBar::new(len);
        bar.set_style(download_style());
        Self {
            inner: bar,
        }
    }

    /// Creates a spinner for work without a known total.
    ///
    /// The spinner uses Unicode Braille patterns and ticks every 100ms.
    pub fn new_spinner() -> Self {
        let bar = IndicatifBar::new_spinner();
        bar.set_style(spinner_style());
        bar.enable_steady_tick(Duration::from_millis(100));
        Self {
            inner: bar,
        }
    }

    /// Creates a bar that draws nothing.
    pub fn hidden() -> Self {
        Self {
            inner: IndicatifBar::hidden(),
        }
    }

    /// Sets the prefix displayed before the bar.
    pub fn set_prefix(&self, prefix: impl Into<String>) {
        self.inner.set_prefix(prefix.into());
    }

    /// Sets the absolute position.
    pub fn set_position(&self, pos: u64) {
        self.inner.set_position(pos);
    }

    /// Current position of the bar.
    pub fn position(&self) -> u64 {
        self.inner.position()
    }

    /// Finishes the bar and leaves `msg` on screen.
    pub fn finish_with_message(&self, msg: impl Into<String>) {
        self.inner.finish_with_message(msg.into());
    }

    /// Finishes the bar and removes it from the terminal.
    pub fn finish_and_clear(&self) {
        self.inner.finish_and_clear();
    }
}

fn default_style() -> IndicatifStyle {
    IndicatifStyle::default_bar()
        .template("{prefix:.bold} [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}")
        .unwrap()
        .progress_chars("━╸━")
}

fn download_style() -> IndicatifStyle {
    IndicatifStyle::default_bar()
        .template("{prefix:.bold.cyan} [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({eta}) {msg}")
        .unwrap()
        .progress_chars("━╸━")
}

fn spinner_style() -> IndicatifStyle {
    IndicatifStyle::default_spinner()
        .template("{prefix:.bold} {spinner:.cyan} {msg}")
        .unwrap()
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
}
