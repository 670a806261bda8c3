use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// Video codec used for every rendition.
pub const VIDEO_CODEC: &str = "libx264";
/// Audio codec used for every rendition.
pub const AUDIO_CODEC: &str = "aac";
/// Encoding preset.
pub const PRESET: &str = "fast";
/// Audio bitrate.
pub const AUDIO_BITRATE: &str = "128k";

/// A named target rendering configuration.
///
/// Static configuration: each variant carries its dimensions, quality and
/// caption styling; instances are never built per request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderProfile {
    /// 9:16 portrait for shorts/reels
    Vertical,
    /// 1:1 square
    Square,
    /// 16:9 standard definition
    Horizontal,
    /// 16:9 full HD
    HorizontalHd,
}

impl RenderProfile {
    pub const ALL: &'static [RenderProfile] = &[
        RenderProfile::Vertical,
        RenderProfile::Square,
        RenderProfile::Horizontal,
        RenderProfile::HorizontalHd,
    ];

    /// Target width/height in pixels.
    pub fn dimensions(&self) -> (u32, u32) {
        match self {
            RenderProfile::Vertical => (1080, 1920),
            RenderProfile::Square => (1080, 1080),
            RenderProfile::Horizontal => (1280, 720),
            RenderProfile::HorizontalHd => (1920, 1080),
        }
    }

    /// Constant Rate Factor (lower is better quality).
    pub fn crf(&self) -> u8 {
        match self {
            RenderProfile::HorizontalHd => 18,
            _ => 23,
        }
    }

    /// Burned-in caption font size for this frame size.
    pub fn caption_font_size(&self) -> u32 {
        match self {
            RenderProfile::Vertical => 20,
            RenderProfile::Square => 18,
            RenderProfile::Horizontal => 16,
            RenderProfile::HorizontalHd => 22,
        }
    }

    /// Bottom margin for burned-in captions.
    pub fn caption_margin_v(&self) -> u32 {
        match self {
            RenderProfile::Vertical => 50,
            RenderProfile::Square => 40,
            RenderProfile::Horizontal => 30,
            RenderProfile::HorizontalHd => 40,
        }
    }

    /// Profile name as used in rendition file names and archive entries.
    pub fn as_filename_part(&self) -> &'static str {
        match self {
            RenderProfile::Vertical => "vertical",
            RenderProfile::Square => "square",
            RenderProfile::Horizontal => "horizontal",
            RenderProfile::HorizontalHd => "horizontal_hd",
        }
    }

    /// Expand a list of profile names, handling the "all" keyword.
    /// Unknown names are silently filtered out; duplicates are dropped.
    pub fn parse_list(names: &[String]) -> Vec<RenderProfile> {
        let mut result = Vec::new();
        let mut seen = HashSet::new();

        for name in names {
            let lower = name.to_lowercase();
            if lower == "all" {
                for profile in Self::ALL {
                    if seen.insert(*profile) {
                        result.push(*profile);
                    }
                }
            } else if let Ok(profile) = lower.parse::<RenderProfile>() {
                if seen.insert(profile) {
                    result.push(profile);
                }
            }
        }

        result
    }
}

impl FromStr for RenderProfile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "vertical" => Ok(RenderProfile::Vertical),
            "square" => Ok(RenderProfile::Square),
            "horizontal" => Ok(RenderProfile::Horizontal),
            "horizontal_hd" => Ok(RenderProfile::HorizontalHd),
            other => Err(format!("unknown render profile: {}", other)),
        }
    }
}

impl fmt::Display for RenderProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_filename_part())
    }
}
