//! Media file downloading.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use futures::StreamExt;
use indicatif::ProgressBar;
use reqwest::{header, Client, Response};
use tokio::fs::File;
use tokio::io::AsyncWriteExt;

use crate::error::{Error, Result};
use crate::fs::partial_path;
use crate::output::create_download_bar;

/// Minimum file size to show progress bar (20 MB).
const PROGRESS_THRESHOLD: u64 = 20 * 1024 * 1024;

/// Writes the bytes behind a URL to a destination path.
#[async_trait]
pub trait Downloader: Send + Sync {
    /// Download `url` to `destination`, creating parent directories.
    ///
    /// Returns the written path, or `None` when the download was skipped.
    async fn download(&self, url: &str, destination: &Path) -> Result<Option<PathBuf>>;
}

/// Streaming HTTP downloader.
pub struct HttpDownloader {
    client: Client,
    skip_existing: bool,
    show_progress: bool,
}

impl HttpDownloader {
    /// Create a downloader with its own cookie-less HTTP client.
    pub fn new(user_agent: &str, skip_existing: bool, show_progress: bool) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static(
                "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
            ),
        );
        headers.insert(
            header::ACCEPT_LANGUAGE,
            header::HeaderValue::from_static("en-US,en;q=0.5"),
        );
        headers.insert(header::DNT, header::HeaderValue::from_static("1"));
        headers.insert(
            header::UPGRADE_INSECURE_REQUESTS,
            header::HeaderValue::from_static("1"),
        );

        let client = Client::builder()
            .user_agent(user_agent)
            .default_headers(headers)
            .build()
            .map_err(|e| Error::Download(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            skip_existing,
            show_progress,
        })
    }
}

#[async_trait]
impl Downloader for HttpDownloader {
    async fn download(&self, url: &str, destination: &Path) -> Result<Option<PathBuf>> {
        if self.skip_existing && tokio::fs::try_exists(destination).await? {
            tracing::debug!("Skipping existing file: {}", destination.display());
            return Ok(None);
        }

        if let Some(parent) = destination.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        tracing::debug!("GET {}", url);
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(Error::Download(format!(
                "Failed to download {}: HTTP {}",
                url,
                response.status()
            )));
        }

        let content_length = response.content_length();
        let progress = match content_length {
            Some(total) if self.show_progress && total > PROGRESS_THRESHOLD => {
                Some(create_download_bar(total))
            }
            _ => None,
        };

        // Stream to a partial file so an interrupted download never looks complete
        let partial = partial_path(destination);
        if let Err(e) = write_body(response, &partial, progress.as_ref()).await {
            if let Err(cleanup) = tokio::fs::remove_file(&partial).await {
                tracing::debug!("Failed to remove {}: {}", partial.display(), cleanup);
            }
            if let Some(pb) = progress {
                pb.abandon();
            }
            return Err(e);
        }
        tokio::fs::rename(&partial, destination).await?;

        if let Some(pb) = progress {
            pb.finish_and_clear();
        }

        Ok(Some(destination.to_path_buf()))
    }
}

/// Stream a response body into `path`.
async fn write_body(
    response: Response,
    path: &Path,
    progress: Option<&ProgressBar>,
) -> Result<()> {
    let mut file = File::create(path).await?;
    let mut stream = response.bytes_stream();
    let mut downloaded: u64 = 0;

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| Error::Download(format!("Stream error: {}", e)))?;
        file.write_all(&chunk).await?;
        downloaded += chunk.len() as u64;

        if let Some(pb) = progress {
            pb.set_position(downloaded);
        }
    }

    file.flush().await?;
    Ok(())
}
