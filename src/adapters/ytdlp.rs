use async_trait::async_trait;
use std::error::Error;
use std::path::Path;
use std::time::Duration;
use tokio::process::Command;
use tracing::info;

use crate::adapters::TOOL_TIMEOUT_SECS;
use crate::ports::fetcher::MediaFetcher;

/// Fetches a time window of the source by driving yt-dlp with ffmpeg as the
/// section downloader. Capped at 720p: the renderer re-encodes anyway.
pub struct YtDlpFetcher {
    timeout: Duration,
}

impl YtDlpFetcher {
    pub fn new() -> Self {
        Self {
            timeout: Duration::from_secs(TOOL_TIMEOUT_SECS),
        }
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Default for YtDlpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MediaFetcher for YtDlpFetcher {
    async fn fetch(
        &self,
        source_url: &str,
        start_seconds: u64,
        duration_seconds: u64,
        dest: &Path,
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        info!(
            "Fetching {}s window at {}s into {:?}",
            duration_seconds, start_seconds, dest
        );

        let mut cmd = Command::new("yt-dlp");
        cmd.arg("-f")
            .arg("best[height<=720]")
            .arg("--external-downloader")
            .arg("ffmpeg")
            .arg("--external-downloader-args")
            .arg(format!(
                "ffmpeg:-ss {} -t {}",
                start_seconds, duration_seconds
            ))
            .arg("-o")
            .arg(dest)
            .arg(source_url);

        let output = match tokio::time::timeout(self.timeout, cmd.output()).await {
            Ok(result) => result?,
            Err(_) => {
                return Err(
                    format!("yt-dlp timed out after {}s", self.timeout.as_secs()).into(),
                )
            }
        };

        if !output.status.success() {
            // Diagnostic text is passed through verbatim for the clip result.
            return Err(String::from_utf8_lossy(&output.stderr).into_owned().into());
        }

        if !dest.exists() {
            return Err("yt-dlp succeeded but produced no output file".into());
        }

        Ok(())
    }
}
