//! Environment configuration.

use std::env;

#[derive(Clone, Debug)]
pub struct Config {
    /// HTTP server bind address
    pub addr: String,
    /// HTTP server port
    pub port: String,
    /// Directory for intermediate clips, renditions and archives
    pub work_dir: String,
    /// Whisper model name used for caption generation
    pub whisper_model: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();

        Self {
            addr: env::var("ADDR").unwrap_or_else(|_| String::from("0.0.0.0")),
            port: env::var("PORT").unwrap_or_else(|_| String::from("8000")),
            work_dir: env::var("WORK_DIR").unwrap_or_else(|_| String::from("temp_clips")),
            whisper_model: env::var("WHISPER_MODEL").unwrap_or_else(|_| String::from("base")),
        }
    }
}
