use async_trait::async_trait;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Why a transcription attempt produced no caption track.
///
/// All variants are non-fatal for the clip: the pipeline downgrades to
/// captionless and keeps going.
#[derive(Debug, Error)]
pub enum TranscribeError {
    #[error("transcriber is not available")]
    Unavailable,

    #[error("source file too large to transcribe ({size_bytes} bytes)")]
    TooLarge { size_bytes: u64 },

    #[error("transcription failed: {0}")]
    Failed(String),
}

/// Turns a local media file into a caption track on disk.
#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait Transcriber: Send + Sync {
    /// Returns the path of the generated caption file.
    async fn transcribe(&self, media: &Path) -> Result<PathBuf, TranscribeError>;
}
