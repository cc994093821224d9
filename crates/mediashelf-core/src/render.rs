//! Media presentation dispatch
//!
//! Stored files carry a short type token ("jpeg", "mp4") rather than a full
//! MIME type, and older records may carry a MIME type or nothing at all.
//! Matching is therefore prefix-or-membership against small literal sets,
//! evaluated image, then video, then audio. Anything else, including an
//! absent token, falls back to a download link.

use serde::Serialize;

use crate::config::ClientConfig;
use crate::models::StoredFile;

const IMAGE_TOKENS: &[&str] = &["jpg", "jpeg", "png", "gif"];
const VIDEO_TOKENS: &[&str] = &["mp4", "webm"];
const AUDIO_TOKENS: &[&str] = &["mp3", "m4a", "wav"];

/// How a stored file is presented
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderStrategy {
    Image,
    Video,
    Audio,
    /// No inline preview; offer a download link
    Unsupported,
}

impl RenderStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            RenderStrategy::Image => "image",
            RenderStrategy::Video => "video",
            RenderStrategy::Audio => "audio",
            RenderStrategy::Unsupported => "download",
        }
    }

    pub fn is_playable(&self) -> bool {
        matches!(self, RenderStrategy::Video | RenderStrategy::Audio)
    }
}

/// Pick a presentation strategy from a type token. Never fails.
pub fn select_strategy(file_type: Option<&str>) -> RenderStrategy {
    let Some(token) = file_type else {
        return RenderStrategy::Unsupported;
    };
    let token = token.trim().to_lowercase();

    if matches_family(&token, "image/", IMAGE_TOKENS) {
        RenderStrategy::Image
    } else if matches_family(&token, "video/", VIDEO_TOKENS) {
        RenderStrategy::Video
    } else if matches_family(&token, "audio/", AUDIO_TOKENS) {
        RenderStrategy::Audio
    } else {
        RenderStrategy::Unsupported
    }
}

fn matches_family(token: &str, prefix: &str, members: &[&str]) -> bool {
    token.starts_with(prefix) || members.contains(&token)
}

/// Everything a presentation layer needs to draw one gallery entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MediaView {
    pub strategy: RenderStrategy,
    pub url: String,
    pub file_name: String,
    pub autoplay: bool,
    /// `video/{token}` or `audio/{token}` for playable media
    pub source_type: Option<String>,
}

impl MediaView {
    pub fn for_file(file: &StoredFile, config: &ClientConfig) -> Self {
        let strategy = file.render_strategy();
        let token = file
            .file_type
            .as_deref()
            .map(|t| t.trim().to_lowercase())
            .unwrap_or_default();

        let source_type = match strategy {
            RenderStrategy::Video if !token.contains('/') => Some(format!("video/{}", token)),
            RenderStrategy::Audio if !token.contains('/') => Some(format!("audio/{}", token)),
            RenderStrategy::Video | RenderStrategy::Audio => Some(token),
            RenderStrategy::Image | RenderStrategy::Unsupported => None,
        };

        Self {
            strategy,
            url: config.resolve_media_url(&file.url),
            file_name: file.file_name.clone(),
            autoplay: config.autoplay && strategy.is_playable(),
            source_type,
        }
    }
}
