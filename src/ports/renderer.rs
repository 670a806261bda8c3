use async_trait::async_trait;
use std::error::Error;
use std::path::{Path, PathBuf};

use crate::domain::profiles::RenderProfile;

/// Scales/pads/captions a local source file into one profile-specific output.
#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait Renderer: Send + Sync {
    /// `captions` is burned in when present; `None` renders captionless.
    async fn render(
        &self,
        input: &Path,
        profile: RenderProfile,
        captions: Option<PathBuf>,
        output: &Path,
    ) -> Result<(), Box<dyn Error + Send + Sync>>;
}
