use async_trait::async_trait;
use std::error::Error;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::process::Command;
use tracing::info;

use crate::adapters::TOOL_TIMEOUT_SECS;
use crate::domain::profiles::{RenderProfile, AUDIO_BITRATE, AUDIO_CODEC, PRESET, VIDEO_CODEC};
use crate::ports::renderer::Renderer;

/// Renders one profile of one clip with an ffmpeg subprocess:
/// scale-to-fit, centered pad, optional subtitle burn-in.
pub struct FfmpegRenderer {
    timeout: Duration,
}

impl FfmpegRenderer {
    pub fn new() -> Self {
        Self {
            timeout: Duration::from_secs(TOOL_TIMEOUT_SECS),
        }
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Default for FfmpegRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// `:`, `\` and `'` are metacharacters inside an ffmpeg filter argument.
fn escape_filter_path(path: &Path) -> String {
    path.to_string_lossy()
        .replace('\\', "\\\\")
        .replace(':', "\\:")
        .replace('\'', "\\'")
}

fn build_video_filter(profile: RenderProfile, captions: Option<&Path>) -> String {
    let (width, height) = profile.dimensions();
    let mut filter = format!(
        "scale={w}:{h}:force_original_aspect_ratio=decrease,\
         pad={w}:{h}:(ow-iw)/2:(oh-ih)/2:black",
        w = width,
        h = height
    );

    if let Some(captions) = captions {
        filter.push_str(&format!(
            ",subtitles={}:force_style='FontSize={},MarginV={}'",
            escape_filter_path(captions),
            profile.caption_font_size(),
            profile.caption_margin_v()
        ));
    }

    filter
}

#[async_trait]
impl Renderer for FfmpegRenderer {
    async fn render(
        &self,
        input: &Path,
        profile: RenderProfile,
        captions: Option<PathBuf>,
        output: &Path,
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        let filter = build_video_filter(profile, captions.as_deref());
        info!("Rendering {:?} as {} -> {:?}", input, profile, output);

        let mut cmd = Command::new("ffmpeg");
        cmd.arg("-y")
            .arg("-i")
            .arg(input)
            .arg("-vf")
            .arg(filter)
            .arg("-c:v")
            .arg(VIDEO_CODEC)
            .arg("-preset")
            .arg(PRESET)
            .arg("-crf")
            .arg(profile.crf().to_string())
            .arg("-c:a")
            .arg(AUDIO_CODEC)
            .arg("-b:a")
            .arg(AUDIO_BITRATE)
            .arg(output);

        let result = match tokio::time::timeout(self.timeout, cmd.output()).await {
            Ok(result) => result?,
            Err(_) => {
                return Err(
                    format!("ffmpeg timed out after {}s", self.timeout.as_secs()).into(),
                )
            }
        };

        if !result.status.success() {
            return Err(String::from_utf8_lossy(&result.stderr).into_owned().into());
        }

        if !output.exists() {
            return Err("ffmpeg succeeded but produced no output file".into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_without_captions() {
        let filter = build_video_filter(RenderProfile::Vertical, None);
        assert!(filter.contains("scale=1080:1920"));
        assert!(filter.contains("pad=1080:1920"));
        assert!(!filter.contains("subtitles"));
    }

    #[test]
    fn test_filter_with_captions_carries_profile_styling() {
        let captions = PathBuf::from("/tmp/clip.srt");
        let filter = build_video_filter(RenderProfile::Square, Some(&captions));
        assert!(filter.contains("subtitles=/tmp/clip.srt"));
        assert!(filter.contains("FontSize=18"));
        assert!(filter.contains("MarginV=40"));
    }

    #[test]
    fn test_filter_path_escaping() {
        let escaped = escape_filter_path(Path::new("C:\\clips\\it's.srt"));
        assert_eq!(escaped, "C\\:\\\\clips\\\\it\\'s.srt");
    }
}
