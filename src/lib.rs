//! Clipmark - Timestamp Clip Extraction Service
//!
//! Turns a source video reference plus a block of raw event markers into a
//! downloadable archive of rendered clips.
//!
//! Hexagonal Architecture:
//! - domain/: Pure business logic (markers, windows, profiles, job records)
//! - ports/: Trait definitions for the external tools
//! - adapters/: Concrete implementations (yt-dlp, whisper, ffmpeg, HTTP)
//! - application/: Pipeline, packaging and job tracking services
//! - config: Environment configuration

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

// Re-exports for convenience
pub use config::Config;
pub use domain::markers::{parse_markers, parse_timestamp, Marker};
pub use domain::profiles::RenderProfile;
