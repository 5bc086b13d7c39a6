use serde::Deserialize;

/// One encoded rendition of a video, as listed under `video_info.variants`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Variant {
    pub url: String,
    #[serde(default)]
    pub content_type: Option<String>,
    #[serde(default)]
    pub bitrate: Option<u64>,
}

/// Container formats the platform serves video variants in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoFormat {
    Mp4,
    Hls,
}

impl VideoFormat {
    pub fn from_content_type(content_type: &str) -> Option<Self> {
        match content_type.to_ascii_lowercase().as_str() {
            "video/mp4" => Some(VideoFormat::Mp4),
            "application/x-mpegurl" | "application/vnd.apple.mpegurl" => Some(VideoFormat::Hls),
            _ => None,
        }
    }

    /// Guesses the format from the URL's trailing extension, ignoring any
    /// query string or fragment.
    pub fn from_url(url: &str) -> Option<Self> {
        let path = url.split(['?', '#']).next().unwrap_or(url);
        if path.ends_with("mp4") {
            Some(VideoFormat::Mp4)
        } else if path.ends_with("m3u8") {
            Some(VideoFormat::Hls)
        } else {
            None
        }
    }
}

impl Variant {
    /// The declared content type wins; the URL extension is only consulted
    /// when no content type was sent.
    pub fn format(&self) -> Option<VideoFormat> {
        match &self.content_type {
            Some(content_type) => VideoFormat::from_content_type(content_type),
            None => VideoFormat::from_url(&self.url),
        }
    }
}
