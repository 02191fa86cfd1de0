//! Core type definitions for yca

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

static VIDEO_LINK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:https?://)?(?:www\.)?(?:youtube\.com/watch\?v=|youtu\.be/)([a-zA-Z0-9_-]{11})")
        .expect("video link pattern is valid")
});

static BARE_VIDEO_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9_-]{11}$").expect("video id pattern is valid"));

/// Identifier of a video on the platform (always 11 characters)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VideoId(String);

impl VideoId {
    /// Extract the id from a watch link (`youtube.com/watch?v=` or `youtu.be/`)
    pub fn from_link(link: &str) -> Option<Self> {
        VIDEO_LINK_RE
            .captures(link.trim())
            .and_then(|caps| caps.get(1))
            .map(|m| VideoId(m.as_str().to_string()))
    }

    /// Accept either a watch link or a bare 11-character id
    pub fn parse(input: &str) -> crate::Result<Self> {
        let trimmed = input.trim();
        if let Some(id) = Self::from_link(trimmed) {
            return Ok(id);
        }
        if BARE_VIDEO_ID_RE.is_match(trimmed) {
            return Ok(VideoId(trimmed.to_string()));
        }
        Err(crate::YcaError::InvalidVideoId(input.to_string()))
    }

    /// The raw id string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One comment (top-level or reply) as fetched from the platform
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    /// Display name of the author
    pub author: String,
    /// Plain-text body
    pub text: String,
}

impl Comment {
    /// Create a new comment
    pub fn new(author: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            author: author.into(),
            text: text.into(),
        }
    }
}

/// Identifier of an analysis report
/// Format: YYYYMMDDHHMMSS-<short_uuid>
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReportId(pub String);

impl ReportId {
    /// Generate a new ReportId
    pub fn generate() -> Self {
        let now = chrono::Utc::now();
        let uuid = Uuid::new_v4();
        let short_uuid = &uuid.to_string()[..8];
        ReportId(format!("{}-{}", now.format("%Y%m%d%H%M%S"), short_uuid))
    }
}

impl fmt::Display for ReportId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Channel details shown alongside an analysis
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelInfo {
    pub title: Option<String>,
    pub description: Option<String>,
    pub logo_url: Option<String>,
    /// RFC 3339 timestamp as returned by the platform
    pub created_at: Option<String>,
    pub subscriber_count: Option<String>,
    pub video_count: Option<String>,
}

impl ChannelInfo {
    /// Creation date without the time part
    pub fn created_date(&self) -> Option<&str> {
        self.created_at
            .as_deref()
            .map(|s| s.get(..10).unwrap_or(s))
    }
}

/// Public counters of a video
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoStats {
    pub view_count: Option<String>,
    pub like_count: Option<String>,
    pub comment_count: Option<String>,
}
