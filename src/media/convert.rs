use crate::error::{GifterError, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, info, warn};

#[async_trait]
pub trait Converter: Send + Sync {
    /// Human-readable name of the converter
    fn name(&self) -> &str;

    /// Transcode `input` into `output`, returning the output path
    async fn convert(&self, input: &Path, output: &Path) -> Result<PathBuf>;

    /// Test if the backing encoder is available on the system
    async fn test_availability(&self) -> bool;
}

/// Runs an ffmpeg-compatible encoder as `<encoder> -y -i <input> <output>`.
pub struct FfmpegConverter {
    program: PathBuf,
    timeout: Duration,
}

impl FfmpegConverter {
    pub fn new(program: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            timeout,
        }
    }
}

#[async_trait]
impl Converter for FfmpegConverter {
    fn name(&self) -> &str {
        self.program.to_str().unwrap_or("encoder")
    }

    async fn convert(&self, input: &Path, output: &Path) -> Result<PathBuf> {
        info!(
            "Converting {} to {} with {}",
            input.display(),
            output.display(),
            self.name()
        );

        let result = tokio::time::timeout(
            self.timeout,
            Command::new(&self.program)
                .arg("-y")
                .arg("-i")
                .arg(input)
                .arg(output)
                .stdin(Stdio::null())
                .kill_on_drop(true)
                .output(),
        )
        .await
        .map_err(|_| GifterError::Timeout {
            operation: format!("{} conversion", self.name()),
        })?;

        let process_output = result.map_err(|e| GifterError::Conversion {
            status: None,
            stderr: format!("failed to run {}: {}", self.program.display(), e),
        })?;

        if !process_output.status.success() {
            let stderr = String::from_utf8_lossy(&process_output.stderr)
                .trim()
                .to_string();
            warn!("{} failed with {}: {}", self.name(), process_output.status, stderr);
            return Err(GifterError::Conversion {
                status: process_output.status.code(),
                stderr,
            });
        }

        debug!(
            "{} stderr: {}",
            self.name(),
            String::from_utf8_lossy(&process_output.stderr)
        );
        info!("Wrote {}", output.display());
        Ok(output.to_path_buf())
    }

    async fn test_availability(&self) -> bool {
        let probe = tokio::time::timeout(
            self.timeout,
            Command::new(&self.program)
                .arg("-version")
                .stdin(Stdio::null())
                .kill_on_drop(true)
                .output(),
        )
        .await;

        match probe {
            Ok(Ok(output)) => {
                if output.status.success() {
                    let version_line = String::from_utf8_lossy(&output.stdout)
                        .lines()
                        .next()
                        .unwrap_or("unknown")
                        .to_string();
                    info!("{} is available: {}", self.name(), version_line);
                    true
                } else {
                    warn!("{} -version failed", self.name());
                    false
                }
            }
            Ok(Err(e)) => {
                warn!("{} not found: {}", self.name(), e);
                false
            }
            Err(_) => {
                warn!(
                    "{} -version did not answer within {:?}",
                    self.name(),
                    self.timeout
                );
                false
            }
        }
    }
}
