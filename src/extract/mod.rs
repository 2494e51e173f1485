//! Zip extraction into the destination directory.
//!
//! Extraction is two-phase: the archive's entries are enumerated first so the
//! total is known, then every entry is written under the target directory.
//! Entries named `sap-ui-version.json` are written last, so a marker on disk
//! always implies the rest of the runtime is there as well.
//!
//! The work runs on tokio's blocking pool; `zip` is a synchronous reader.

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};
use zip::ZipArchive;

use crate::constants::MARKER_FILE_NAME;
use crate::core::{Result, RuntimeError};
use crate::utils::progress::{NoProgress, Phase, ProgressReporter};

/// Unpacks runtime archives.
pub struct ArchiveExtractor {
    progress: Arc<dyn ProgressReporter>,
}

impl Default for ArchiveExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl ArchiveExtractor {
    /// Create an extractor without progress reporting.
    pub fn new() -> Self {
        Self {
            progress: Arc::new(NoProgress),
        }
    }

    /// Report completed entries to `progress`.
    pub fn with_progress(mut self, progress: Arc<dyn ProgressReporter>) -> Self {
        self.progress = progress;
        self
    }

    /// Extract every entry of `archive` below `target_dir`.
    ///
    /// Existing files are overwritten. Returns once all entries are written
    /// and the archive is closed.
    pub async fn extract(&self, archive: &Path, target_dir: &Path) -> Result<()> {
        let archive_path = archive.to_path_buf();
        let target = target_dir.to_path_buf();
        let progress = Arc::clone(&self.progress);

        let written = tokio::task::spawn_blocking(move || {
            extract_blocking(&archive_path, &target, progress.as_ref())
        })
        .await
        .map_err(|e| RuntimeError::extract(archive, format!("extraction task failed: {e}")))??;

        info!("Extracted {} entries into {}", written, target_dir.display());
        Ok(())
    }
}

fn extract_blocking(archive_path: &Path, target: &Path, progress: &dyn ProgressReporter) -> Result<usize> {
    let file = File::open(archive_path).map_err(|e| RuntimeError::extract(archive_path, e))?;
    let mut archive = ZipArchive::new(file).map_err(|e| RuntimeError::extract(archive_path, e))?;

    let order = entry_order(&mut archive, archive_path)?;
    debug!("Archive {} has {} entries", archive_path.display(), order.len());

    progress.start(Phase::Extract, Some(order.len() as u64));
    let result = write_entries(&mut archive, &order, archive_path, target, progress);
    progress.finish(Phase::Extract, result.is_ok());
    result
}

/// Entry indices in write order: everything else first, marker files last.
fn entry_order(archive: &mut ZipArchive<File>, archive_path: &Path) -> Result<Vec<usize>> {
    let mut regular = Vec::with_capacity(archive.len());
    let mut markers = Vec::new();

    for index in 0..archive.len() {
        let entry = archive.by_index_raw(index).map_err(|e| RuntimeError::extract(archive_path, e))?;
        let is_marker = Path::new(entry.name()).file_name().is_some_and(|name| name == MARKER_FILE_NAME);
        if is_marker {
            markers.push(index);
        } else {
            regular.push(index);
        }
    }

    regular.extend(markers);
    Ok(regular)
}

fn write_entries(
    archive: &mut ZipArchive<File>,
    order: &[usize],
    archive_path: &Path,
    target: &Path,
    progress: &dyn ProgressReporter,
) -> Result<usize> {
    let mut written = 0;

    for (done, &index) in order.iter().enumerate() {
        let mut entry = archive.by_index(index).map_err(|e| RuntimeError::extract(archive_path, e))?;

        let Some(relative) = entry.enclosed_name() else {
            warn!("Skipping archive entry with unsafe path: {}", entry.name());
            progress.advance(Phase::Extract, done as u64 + 1);
            continue;
        };
        let out_path: PathBuf = target.join(relative);

        if entry.is_dir() {
            fs::create_dir_all(&out_path)
                .map_err(|e| RuntimeError::filesystem("create directory", &out_path, e))?;
        } else {
            if let Some(parent) = out_path.parent() {
                fs::create_dir_all(parent)
                    .map_err(|e| RuntimeError::filesystem("create directory", parent, e))?;
            }
            // A read-only file from an earlier extraction cannot be truncated in place
            match fs::remove_file(&out_path) {
                Ok(()) => {}
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => return Err(RuntimeError::filesystem("remove file", &out_path, e)),
            }
            let mut out_file = File::create(&out_path)
                .map_err(|e| RuntimeError::filesystem("create file", &out_path, e))?;
            io::copy(&mut entry, &mut out_file).map_err(|e| RuntimeError::extract(archive_path, e))?;

            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                if let Some(mode) = entry.unix_mode() {
                    fs::set_permissions(&out_path, fs::Permissions::from_mode(mode))
                        .map_err(|e| RuntimeError::filesystem("set permissions", &out_path, e))?;
                }
            }
            written += 1;
        }

        progress.advance(Phase::Extract, done as u64 + 1);
    }

    Ok(written)
}
