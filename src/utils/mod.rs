use crate::error::{GifterError, Result};
use url::Url;

const STATUS_HOSTS: &[&str] = &[
    "twitter.com",
    "www.twitter.com",
    "mobile.twitter.com",
    "x.com",
    "www.x.com",
];

/// Accepts a bare numeric status id or a post URL such as
/// `https://twitter.com/<user>/status/<id>` and returns the id.
pub fn parse_status_id(input: &str) -> Result<String> {
    let input = input.trim();
    let invalid = || GifterError::InvalidStatusReference(input.to_string());

    if is_status_id(input) {
        return Ok(input.to_string());
    }

    let url = Url::parse(input).map_err(|_| invalid())?;
    let host = url.host_str().ok_or_else(invalid)?;
    if !STATUS_HOSTS.contains(&host) {
        return Err(invalid());
    }

    let segments: Vec<&str> = url.path_segments().map(|s| s.collect()).unwrap_or_default();
    segments
        .windows(2)
        .find(|pair| matches!(pair[0], "status" | "statuses") && is_status_id(pair[1]))
        .map(|pair| pair[1].to_string())
        .ok_or_else(invalid)
}

fn is_status_id(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1000.0 && unit < UNITS.len() - 1 {
        value /= 1000.0;
        unit += 1;
    }

    if unit == 0 {
        format!("{} {}", bytes, UNITS[0])
    } else {
        format!("{:.2} {}", value, UNITS[unit])
    }
}
