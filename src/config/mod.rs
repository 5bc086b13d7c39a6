use crate::error::{GifterError, Result};
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

pub const TWITTER_KEY_VAR: &str = "TWITTER_CONSUMER_KEY";
pub const TWITTER_SECRET_VAR: &str = "TWITTER_CONSUMER_SECRET";

pub const DEFAULT_API_ROOT: &str = "https://api.twitter.com/";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_ENCODER: &str = "ffmpeg";

/// Where named configuration values come from.
pub trait CredentialSource {
    fn get(&self, name: &str) -> Option<String>;
}

/// Reads from the process environment.
pub struct EnvSource;

impl CredentialSource for EnvSource {
    fn get(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

impl CredentialSource for HashMap<String, String> {
    fn get(&self, name: &str) -> Option<String> {
        HashMap::get(self, name).cloned()
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub key: String,
    pub secret: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("key", &self.key)
            .field("secret", &"<redacted>")
            .finish()
    }
}

pub fn load_credentials(source: &impl CredentialSource) -> Result<Credentials> {
    Ok(Credentials {
        key: require(source, TWITTER_KEY_VAR)?,
        secret: require(source, TWITTER_SECRET_VAR)?,
    })
}

fn require(source: &impl CredentialSource, name: &str) -> Result<String> {
    match source.get(name) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(GifterError::MissingConfiguration {
            name: name.to_string(),
        }),
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub api_root: Url,
    pub timeout: Duration,
    pub encoder: PathBuf,
}

impl Settings {
    pub fn new(mut api_root: Url, timeout_secs: u64, encoder: impl Into<PathBuf>) -> Self {
        // Endpoints are joined relative to the root, so it must end in a slash
        if !api_root.path().ends_with('/') {
            let path = format!("{}/", api_root.path());
            api_root.set_path(&path);
        }

        Self {
            api_root,
            timeout: Duration::from_secs(timeout_secs),
            encoder: encoder.into(),
        }
    }
}
