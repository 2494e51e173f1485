//! The remote version manifest and the candidate list derived from it.

use serde::Deserialize;

/// Release information published by the SDK server.
///
/// On the wire the manifest looks like:
///
/// ```json
/// {
///   "version": "1.120.4",
///   "libraries": [ { "name": "sap.ui.core", "patchHistory": ["1.120.0", "1.120.1"] } ]
/// }
/// ```
///
/// Only the top-level `version` and the first library's `patchHistory` are used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionManifest {
    /// The version the server declares as current
    pub current_version: String,
    /// Earlier releases, in chronological order (oldest first)
    pub patch_history: Vec<String>,
}

#[derive(Deserialize)]
struct WireManifest {
    version: String,
    #[serde(default)]
    libraries: Vec<WireLibrary>,
}

#[derive(Deserialize)]
struct WireLibrary {
    #[serde(rename = "patchHistory")]
    patch_history: Option<Vec<String>>,
}

impl VersionManifest {
    /// Parse a manifest document.
    ///
    /// Fails with a human-readable reason when the JSON is malformed or when
    /// `libraries[0].patchHistory` is missing.
    pub fn parse(body: &str) -> Result<Self, String> {
        let wire: WireManifest =
            serde_json::from_str(body).map_err(|e| format!("malformed manifest JSON: {e}"))?;

        let patch_history = wire
            .libraries
            .into_iter()
            .next()
            .and_then(|library| library.patch_history)
            .ok_or_else(|| "manifest has no libraries[0].patchHistory".to_string())?;

        Ok(Self {
            current_version: wire.version,
            patch_history,
        })
    }

    /// Versions to probe, newest first.
    ///
    /// The history is chronological, so `patchHistory + [version]` is reversed;
    /// duplicates keep their first (newest) position.
    pub fn candidates(&self) -> Vec<String> {
        let mut candidates: Vec<String> = Vec::with_capacity(self.patch_history.len() + 1);
        let newest_first = std::iter::once(&self.current_version).chain(self.patch_history.iter().rev());

        for version in newest_first {
            let version = version.trim();
            if version.is_empty() || candidates.iter().any(|c| c == version) {
                continue;
            }
            candidates.push(version.to_string());
        }

        candidates
    }
}
