/// The invocation request built from the six positional arguments.
use serde::{Deserialize, Serialize};

use super::errors::WrapError;

/// Borrowed view of the positionals, in command-line order.
#[derive(Debug, Clone, Copy)]
pub struct RawRequest<'a> {
    pub input_path: &'a str,
    pub output_path: &'a str,
    pub mask_style: &'a str,
    pub keep_audio: &'a str,
    pub fps: &'a str,
    pub resolution: &'a str,
}

/// A parsed, immutable request to anonymize one video.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvocationRequest {
    /// Source video. Existence is left to the tool to check.
    pub input_path: String,
    /// Destination video.
    pub output_path: String,
    /// Replacement style, forwarded verbatim to `--replacewith`.
    pub mask_style: String,
    /// Whether to pass `-k` (keep audio track).
    pub keep_audio: bool,
    /// Output frame rate.
    pub fps: u32,
    /// Accepted but not forwarded to the tool.
    pub resolution: String,
}

/// Encoder settings passed through `--ffmpeg-config`.
///
/// Carries the frame rate only; resolution is intentionally not part of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FfmpegConfig {
    pub fps: u32,
}

impl InvocationRequest {
    /// Parse the raw positionals.
    ///
    /// # Errors
    ///
    /// Returns `WrapError::InvalidFps` if the frame rate is not a non-negative integer.
    pub fn parse(raw: RawRequest<'_>) -> Result<Self, WrapError> {
        let request = Self {
            input_path: raw.input_path.to_owned(),
            output_path: raw.output_path.to_owned(),
            mask_style: raw.mask_style.to_owned(),
            keep_audio: parse_keep_audio(raw.keep_audio),
            fps: parse_fps(raw.fps)?,
            resolution: raw.resolution.to_owned(),
        };
        tracing::debug!(
            resolution = %request.resolution,
            "resolution accepted but not forwarded to the tool"
        );
        Ok(request)
    }

    /// The sub-configuration handed to the tool's encoder.
    #[must_use]
    pub fn ffmpeg_config(&self) -> FfmpegConfig {
        FfmpegConfig { fps: self.fps }
    }
}

impl FfmpegConfig {
    /// Compact JSON, e.g. `{"fps":25}`.
    ///
    /// # Errors
    ///
    /// Returns `WrapError::Serialize` if serialization fails.
    pub fn to_json(&self) -> Result<String, WrapError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// `"true"` in any letter case means keep audio; every other value means drop it.
#[must_use]
pub fn parse_keep_audio(value: &str) -> bool {
    value.eq_ignore_ascii_case("true")
}

/// Parse a frame rate, ignoring surrounding whitespace.
///
/// # Errors
///
/// Returns `WrapError::InvalidFps` for non-numeric, negative, or overflowing input.
pub fn parse_fps(value: &str) -> Result<u32, WrapError> {
    value.trim().parse().map_err(|_| WrapError::InvalidFps {
        value: value.to_owned(),
    })
}
