use async_trait::async_trait;
use std::error::Error;
use std::path::Path;

/// Pulls a bounded time window of the source video to a local file.
///
/// Errors carry the external tool's diagnostic text verbatim; the core never
/// parses it.
#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait MediaFetcher: Send + Sync {
    async fn fetch(
        &self,
        source_url: &str,
        start_seconds: u64,
        duration_seconds: u64,
        dest: &Path,
    ) -> Result<(), Box<dyn Error + Send + Sync>>;
}
