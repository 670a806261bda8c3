use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::process::Command;
use tracing::info;

use crate::adapters::TOOL_TIMEOUT_SECS;
use crate::ports::transcriber::{TranscribeError, Transcriber};

/// Largest source file the transcriber will accept.
const MAX_TRANSCRIBE_BYTES: u64 = 100 * 1024 * 1024;

/// Generates an `.srt` caption track by invoking the `whisper` CLI on the
/// fetched clip. Every failure mode is reported through [`TranscribeError`]
/// and downgrades the clip to captionless upstream.
pub struct WhisperTranscriber {
    model: String,
    timeout: Duration,
}

impl WhisperTranscriber {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            timeout: Duration::from_secs(TOOL_TIMEOUT_SECS),
        }
    }

    pub fn with_timeout(model: impl Into<String>, timeout: Duration) -> Self {
        Self {
            model: model.into(),
            timeout,
        }
    }
}

#[async_trait]
impl Transcriber for WhisperTranscriber {
    async fn transcribe(&self, media: &Path) -> Result<PathBuf, TranscribeError> {
        if which::which("whisper").is_err() {
            return Err(TranscribeError::Unavailable);
        }

        let metadata = tokio::fs::metadata(media)
            .await
            .map_err(|e| TranscribeError::Failed(format!("cannot stat {:?}: {}", media, e)))?;
        if metadata.len() > MAX_TRANSCRIBE_BYTES {
            return Err(TranscribeError::TooLarge {
                size_bytes: metadata.len(),
            });
        }

        let output_dir = media.parent().unwrap_or_else(|| Path::new("."));
        info!("Transcribing {:?} with model {}", media, self.model);

        let mut cmd = Command::new("whisper");
        cmd.arg(media)
            .arg("--model")
            .arg(&self.model)
            .arg("--output_format")
            .arg("srt")
            .arg("--output_dir")
            .arg(output_dir);

        let output = match tokio::time::timeout(self.timeout, cmd.output()).await {
            Ok(result) => result
                .map_err(|e| TranscribeError::Failed(format!("failed to run whisper: {}", e)))?,
            Err(_) => {
                return Err(TranscribeError::Failed(format!(
                    "whisper timed out after {}s",
                    self.timeout.as_secs()
                )))
            }
        };

        if !output.status.success() {
            return Err(TranscribeError::Failed(
                String::from_utf8_lossy(&output.stderr).into_owned(),
            ));
        }

        // whisper writes <stem>.srt next to the input when --output_dir is
        // the input's parent.
        let caption_file = media.with_extension("srt");
        if !caption_file.exists() {
            return Err(TranscribeError::Failed(format!(
                "whisper produced no caption file at {:?}",
                caption_file
            )));
        }

        Ok(caption_file)
    }
}
