//! Adapters - Concrete implementations of ports.

pub mod ffmpeg;
pub mod http;
pub mod whisper;
pub mod ytdlp;

/// Ceiling for a single external tool invocation, in seconds.
///
/// Shared by the downloader, transcriber and transcoder so one wedged
/// subprocess cannot hang a job forever.
pub const TOOL_TIMEOUT_SECS: u64 = 1800;
