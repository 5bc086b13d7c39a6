use super::types::{Variant, VideoFormat};
use crate::error::{GifterError, NoVideoReason, Result};
use serde_json::Value;
use tracing::debug;

/// Variants of the first media item under `extended_entities.media`.
///
/// Missing or null keys at any level read as "no media". Entries that are not
/// objects with a string `url` are skipped.
pub fn video_variants(status: &Value) -> Result<Vec<Variant>> {
    let media = status["extended_entities"]["media"]
        .as_array()
        .filter(|media| !media.is_empty())
        .ok_or(GifterError::NoVideoFound(NoVideoReason::NoMedia))?;

    let variants: Vec<Variant> = media[0]["video_info"]["variants"]
        .as_array()
        .map(|variants| {
            variants
                .iter()
                .filter_map(|v| serde_json::from_value(v.clone()).ok())
                .collect()
        })
        .unwrap_or_default();

    if variants.is_empty() {
        return Err(GifterError::NoVideoFound(NoVideoReason::NoVariants));
    }

    Ok(variants)
}

/// Picks the first mp4 rendition of the post's video, in list order.
pub fn extract_video_url(status: &Value) -> Result<String> {
    let variants = video_variants(status)?;
    debug!("Found {} video variants", variants.len());

    let variant = variants
        .into_iter()
        .find(|v| v.format() == Some(VideoFormat::Mp4))
        .ok_or(GifterError::NoVideoFound(NoVideoReason::NoPlayableFormat))?;

    debug!("Picked mp4 variant at {:?} bps", variant.bitrate);
    Ok(variant.url)
}
