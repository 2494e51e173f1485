use std::fmt;

/// Lifecycle of one installer run.
///
/// ```text
/// Idle -> Resolving -> CheckingInstalled -> UpToDate -> Done
///                                        -> Installing -> Cleaning -> Done | Failed
/// ```
///
/// A resolution failure goes straight from `Resolving` to `Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InstallState {
    /// Nothing has happened yet
    Idle,
    /// Determining the target version and URL
    Resolving,
    /// Comparing the target against the installed marker
    CheckingInstalled,
    /// The installed runtime already matches the target
    UpToDate,
    /// Clearing directories, downloading and extracting
    Installing,
    /// Removing the scratch directory
    Cleaning,
    /// The run succeeded
    Done,
    /// The run failed
    Failed,
}

impl InstallState {
    /// Whether the run has ended.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Failed)
    }
}

impl fmt::Display for InstallState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Resolving => "resolving",
            Self::CheckingInstalled => "checking-installed",
            Self::UpToDate => "up-to-date",
            Self::Installing => "installing",
            Self::Cleaning => "cleaning",
            Self::Done => "done",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// What a successful run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallOutcome {
    /// The destination already held this version; nothing was touched
    UpToDate {
        /// Installed version
        version: String,
    },
    /// The runtime was downloaded and unpacked
    Installed {
        /// Installed version
        version: String,
        /// Archive URL it came from
        url: String,
    },
}

impl InstallOutcome {
    /// The version present in the destination after the run.
    pub fn version(&self) -> &str {
        match self {
            Self::UpToDate {
                version,
            }
            | Self::Installed {
                version,
                ..
            } => version,
        }
    }
}
