mod convert;
mod download;
mod extract;
mod types;

pub use convert::{Converter, FfmpegConverter};
pub use download::download;
pub use extract::extract_video_url;

#[cfg(all(test, unix))]
pub(crate) use convert::tests::{fake_encoder, COPYING_ENCODER};
