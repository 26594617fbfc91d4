use async_trait::async_trait;
use futures_util::StreamExt;
use std::io::Write;
use std::path::Path;

use super::error::WallpaperError;
use crate::common::http::describe_error;
use crate::common::progress::{create_download_bar, finish_with_success};

/// Downloads a URL to a destination path
#[async_trait]
pub trait Fetcher {
    /// Returns the number of bytes written. On error nothing is left at `dest`.
    async fn fetch(&self, url: &str, dest: &Path) -> Result<u64, WallpaperError>;
}

#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str, dest: &Path) -> Result<u64, WallpaperError> {
        let fetch_error = |reason: String| WallpaperError::Fetch {
            url: url.to_string(),
            reason,
        };

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| fetch_error(describe_error(&e)))?;

        if !response.status().is_success() {
            return Err(fetch_error(format!("server returned {}", response.status())));
        }

        let dir = dest.parent().unwrap_or_else(|| Path::new("."));
        let mut partial = tempfile::Builder::new()
            .prefix(".redwall-")
            .suffix(".part")
            .tempfile_in(dir)?;

        let name = dest
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| url.to_string());
        let pb = create_download_bar(response.content_length(), format!("Downloading {}", name));

        let mut written: u64 = 0;
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = match chunk {
                Ok(chunk) => chunk,
                Err(e) => {
                    pb.finish_and_clear();
                    return Err(fetch_error(describe_error(&e)));
                }
            };
            partial.write_all(&chunk)?;
            written += chunk.len() as u64;
            pb.set_position(written);
        }

        if written == 0 {
            pb.finish_and_clear();
            return Err(fetch_error("empty response body".to_string()));
        }

        partial.as_file_mut().sync_all()?;
        partial
            .persist(dest)
            .map_err(|e| WallpaperError::Io(e.error))?;

        finish_with_success(pb, format!("Saved {} ({} bytes)", name, written));
        Ok(written)
    }
}
