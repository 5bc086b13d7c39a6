use crate::error::{DownloadError, GifterError, Result};
use crate::utils::format_size;
use std::path::Path;
use tempfile::NamedTempFile;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

/// A downloaded video held in a temp file that is removed on drop.
#[derive(Debug)]
pub struct DownloadedAsset {
    file: NamedTempFile,
    size: u64,
}

impl DownloadedAsset {
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    pub fn size(&self) -> u64 {
        self.size
    }
}

/// Streams the body at `url` into a fresh temp file as raw bytes.
///
/// Any timeout configured on `http` applies as-is; a whole-request timeout
/// also bounds the transfer of the body.
pub async fn download(http: &reqwest::Client, url: &str) -> Result<DownloadedAsset> {
    info!("Downloading video from {}", url);

    let mut response = http.get(url).send().await.map_err(|e| {
        if e.is_timeout() {
            GifterError::from_request("video download", e)
        } else {
            DownloadError::Request(e).into()
        }
    })?;

    if !response.status().is_success() {
        return Err(DownloadError::Status(response.status()).into());
    }

    let file = NamedTempFile::with_suffix(".mp4").map_err(DownloadError::Write)?;
    debug!("Writing video to {}", file.path().display());

    let mut writer =
        tokio::fs::File::from_std(file.as_file().try_clone().map_err(DownloadError::Write)?);
    let mut received: u64 = 0;

    loop {
        let chunk = response.chunk().await.map_err(|e| {
            if e.is_timeout() {
                GifterError::from_request("video download", e)
            } else {
                DownloadError::Interrupted(e).into()
            }
        })?;

        let Some(chunk) = chunk else {
            break;
        };

        writer
            .write_all(&chunk)
            .await
            .map_err(DownloadError::Write)?;
        received += chunk.len() as u64;
    }

    writer.flush().await.map_err(DownloadError::Write)?;
    writer.sync_all().await.map_err(DownloadError::Write)?;

    info!("Downloaded {} to {}", format_size(received), file.path().display());

    Ok(DownloadedAsset {
        file,
        size: received,
    })
}
