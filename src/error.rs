use reqwest::StatusCode;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, GifterError>;

#[derive(Debug, Error)]
pub enum GifterError {
    #[error("missing configuration: {name} is not set")]
    MissingConfiguration { name: String },

    #[error("not a status id or status URL: {0}")]
    InvalidStatusReference(String),

    #[error("authorization failed: {0}")]
    Authorization(String),

    #[error("transport error: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("no video found: {0}")]
    NoVideoFound(NoVideoReason),

    #[error("download failed: {0}")]
    Download(#[from] DownloadError),

    /// `status` is `None` when the encoder never ran or was killed by a signal
    #[error("conversion failed: {stderr}")]
    Conversion { status: Option<i32>, stderr: String },

    #[error("{operation} timed out")]
    Timeout { operation: String },
}

impl GifterError {
    /// Process exit code reported by the binary for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            GifterError::NoVideoFound(_) => 2,
            _ => 1,
        }
    }

    /// Maps a reqwest failure to `Timeout` or `Transport`.
    pub fn from_request(operation: &str, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            GifterError::Timeout {
                operation: operation.to_string(),
            }
        } else {
            GifterError::Transport(err)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoVideoReason {
    /// `extended_entities.media` is absent, null or empty
    NoMedia,
    /// The first media item carries no variants
    NoVariants,
    /// Variants exist but none is an mp4 rendition
    NoPlayableFormat,
}

impl std::fmt::Display for NoVideoReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let msg = match self {
            NoVideoReason::NoMedia => "post has no attached media",
            NoVideoReason::NoVariants => "media has no video variants",
            NoVideoReason::NoPlayableFormat => "no mp4 variant available",
        };
        f.write_str(msg)
    }
}

#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("request failed: {0}")]
    Request(#[source] reqwest::Error),

    #[error("server responded with HTTP {0}")]
    Status(StatusCode),

    /// Covers bodies cut short of their announced `Content-Length`
    #[error("transfer interrupted: {0}")]
    Interrupted(#[source] reqwest::Error),

    #[error("could not write temp file: {0}")]
    Write(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(
            GifterError::NoVideoFound(NoVideoReason::NoMedia).exit_code(),
            2
        );
        assert_eq!(
            GifterError::Authorization("nope".to_string()).exit_code(),
            1
        );
        assert_eq!(
            GifterError::Download(DownloadError::Status(StatusCode::NOT_FOUND)).exit_code(),
            1
        );
    }

    #[test]
    fn test_display_messages() {
        let err = GifterError::MissingConfiguration {
            name: "TWITTER_CONSUMER_KEY".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "missing configuration: TWITTER_CONSUMER_KEY is not set"
        );

        let err = GifterError::NoVideoFound(NoVideoReason::NoPlayableFormat);
        assert_eq!(err.to_string(), "no video found: no mp4 variant available");

        let err = GifterError::Download(DownloadError::Status(StatusCode::GONE));
        assert_eq!(
            err.to_string(),
            "download failed: server responded with HTTP 410 Gone"
        );
    }
}
