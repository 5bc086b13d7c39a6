use crate::config::Credentials;
use crate::error::Result;
use crate::media::{self, Converter};
use crate::twitter::{self, TwitterClient};
use crate::utils::format_size;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Turns one post's video into an animated image at `output`.
pub struct Pipeline<C: Converter> {
    client: TwitterClient,
    converter: C,
}

impl<C: Converter> Pipeline<C> {
    pub fn new(client: TwitterClient, converter: C) -> Self {
        Self { client, converter }
    }

    pub async fn run(
        &self,
        credentials: &Credentials,
        status_id: &str,
        output: &Path,
    ) -> Result<PathBuf> {
        let token = self.client.acquire_token(credentials).await?;

        let status = self.client.fetch_status(status_id, &token).await?;
        for message in twitter::api_errors(&status) {
            warn!("API returned an error for status {}: {}", status_id, message);
        }

        let video_url = media::extract_video_url(&status)?;
        info!("Selected video variant {}", video_url);

        // The temp file lives until this function returns, on every path
        let asset = media::download(self.client.media_http(), &video_url).await?;
        info!("Converting {} of video", format_size(asset.size()));
        self.converter.convert(asset.path(), output).await
    }
}
