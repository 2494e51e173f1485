//! Streaming archive download.
//!
//! [`ArchiveFetcher`] performs one GET against a URL and streams the body to a
//! local file, reporting the bytes written so far. It knows nothing about
//! versions or zip files; the HTTP client it is given already carries the EULA
//! cookie and the proxy settings (see [`crate::http::build_client`]).
//!
//! A failed transfer leaves whatever was written on disk. Removing it is the
//! installer's job.

use reqwest::Client;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

use crate::config::ProxyConfig;
use crate::core::{Result, RuntimeError};
use crate::http::build_client;
use crate::utils::progress::{NoProgress, Phase, ProgressReporter};

/// Downloads a single archive to disk.
pub struct ArchiveFetcher {
    client: Client,
    progress: Arc<dyn ProgressReporter>,
}

impl ArchiveFetcher {
    /// Create a fetcher using `client` for the transfer.
    pub fn new(client: Client) -> Self {
        Self {
            client,
            progress: Arc::new(NoProgress),
        }
    }

    /// Create a fetcher with its own client, tunneling through `proxy` if given.
    pub fn with_proxy(proxy: Option<&ProxyConfig>) -> Result<Self> {
        Ok(Self::new(build_client(proxy)?))
    }

    /// Report bytes written to `progress`.
    pub fn with_progress(mut self, progress: Arc<dyn ProgressReporter>) -> Self {
        self.progress = progress;
        self
    }

    /// Download `url` into `dest_file`, returning the file path once the body
    /// has been fully written and flushed.
    pub async fn download(&self, url: &str, dest_file: &Path) -> Result<PathBuf> {
        debug!("Downloading {} to {}", url, dest_file.display());

        let response = self.client.get(url).send().await.map_err(|e| RuntimeError::download(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RuntimeError::download(url, format!("HTTP {status}")));
        }

        let total = response.content_length();
        self.progress.start(Phase::Download, total);
        let result = self.stream_to_file(url, response, dest_file).await;
        self.progress.finish(Phase::Download, result.is_ok());

        let written = result?;
        info!("Downloaded {} ({} bytes)", url, written);
        Ok(dest_file.to_path_buf())
    }

    async fn stream_to_file(
        &self,
        url: &str,
        mut response: reqwest::Response,
        dest_file: &Path,
    ) -> Result<u64> {
        let mut file = File::create(dest_file)
            .await
            .map_err(|e| RuntimeError::filesystem("create file", dest_file, e))?;

        let mut written: u64 = 0;
        while let Some(chunk) = response.chunk().await.map_err(|e| RuntimeError::download(url, e))? {
            file.write_all(&chunk).await.map_err(|e| RuntimeError::download(url, e))?;
            written += chunk.len() as u64;
            self.progress.advance(Phase::Download, written);
        }

        file.flush().await.map_err(|e| RuntimeError::download(url, e))?;
        Ok(written)
    }
}
