mod auth;
mod status;
mod types;

pub use status::api_errors;

use crate::config::Settings;
use anyhow::{Context, Result};
use url::Url;

/// Application-only client for the platform's REST API.
pub struct TwitterClient {
    http: reqwest::Client,
    media_http: reqwest::Client,
    api_root: Url,
}

impl TwitterClient {
    pub fn new(settings: &Settings) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(settings.timeout)
            .build()
            .context("Failed to create HTTP client")?;

        // Videos can take longer than the timeout to arrive in full, so only
        // connecting and each read are bounded
        let media_http = reqwest::Client::builder()
            .connect_timeout(settings.timeout)
            .read_timeout(settings.timeout)
            .build()
            .context("Failed to create media HTTP client")?;

        Ok(Self {
            http,
            media_http,
            api_root: settings.api_root.clone(),
        })
    }

    pub fn with_http(http: reqwest::Client, api_root: Url) -> Self {
        Self {
            media_http: http.clone(),
            http,
            api_root,
        }
    }

    /// Client for unauthenticated asset downloads.
    pub fn media_http(&self) -> &reqwest::Client {
        &self.media_http
    }

    fn endpoint(&self, path: &str) -> Result<Url, url::ParseError> {
        self.api_root.join(path)
    }
}
