//! Wire models for the YouTube Data API v3 responses yca consumes
//!
//! Every field is optional or defaulted; the platform omits fields freely.

use serde::Deserialize;
use yca_core::types::{ChannelInfo, Comment, VideoStats};

const UNKNOWN_AUTHOR: &str = "Unknown";

/// One page of `commentThreads.list`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CommentThreadPage {
    pub items: Vec<CommentThread>,
    pub next_page_token: Option<String>,
}

/// Top-level comment plus the replies returned inline with it
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CommentThread {
    pub snippet: ThreadSnippet,
    pub replies: Option<ThreadReplies>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ThreadSnippet {
    pub top_level_comment: CommentResource,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ThreadReplies {
    pub comments: Vec<CommentResource>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CommentResource {
    pub snippet: CommentSnippet,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CommentSnippet {
    pub author_display_name: Option<String>,
    pub text_display: Option<String>,
}

impl From<&CommentSnippet> for Comment {
    fn from(snippet: &CommentSnippet) -> Self {
        Comment::new(
            snippet
                .author_display_name
                .as_deref()
                .unwrap_or(UNKNOWN_AUTHOR),
            snippet.text_display.as_deref().unwrap_or_default(),
        )
    }
}

impl CommentThread {
    /// The top-level comment followed by its replies
    pub fn comments(&self) -> impl Iterator<Item = Comment> + '_ {
        let top = std::iter::once(&self.snippet.top_level_comment);
        let replies = self.replies.iter().flat_map(|r| r.comments.iter());
        top.chain(replies).map(|c| Comment::from(&c.snippet))
    }
}

/// Flatten threads into a linear list, each top-level comment before its replies
pub fn flatten_threads(threads: &[CommentThread]) -> Vec<Comment> {
    threads.iter().flat_map(CommentThread::comments).collect()
}

/// `videos.list` response
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct VideoListResponse {
    pub items: Vec<VideoResource>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct VideoResource {
    pub snippet: Option<VideoSnippet>,
    pub statistics: Option<VideoStatistics>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VideoSnippet {
    pub channel_id: Option<String>,
    pub title: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VideoStatistics {
    pub view_count: Option<String>,
    pub like_count: Option<String>,
    pub comment_count: Option<String>,
}

impl From<VideoStatistics> for VideoStats {
    fn from(stats: VideoStatistics) -> Self {
        Self {
            view_count: stats.view_count,
            like_count: stats.like_count,
            comment_count: stats.comment_count,
        }
    }
}

/// `channels.list` response
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ChannelListResponse {
    pub items: Vec<ChannelResource>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ChannelResource {
    pub snippet: ChannelSnippet,
    pub statistics: ChannelStatistics,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChannelSnippet {
    pub title: Option<String>,
    pub description: Option<String>,
    pub published_at: Option<String>,
    pub thumbnails: Thumbnails,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Thumbnails {
    pub high: Option<Thumbnail>,
    pub medium: Option<Thumbnail>,
    pub default: Option<Thumbnail>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Thumbnail {
    pub url: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChannelStatistics {
    pub subscriber_count: Option<String>,
    pub video_count: Option<String>,
}

impl From<ChannelResource> for ChannelInfo {
    fn from(channel: ChannelResource) -> Self {
        let thumbnails = channel.snippet.thumbnails;
        let logo = thumbnails.high.or(thumbnails.medium).or(thumbnails.default);
        Self {
            title: channel.snippet.title,
            description: channel.snippet.description,
            logo_url: logo.map(|t| t.url),
            created_at: channel.snippet.published_at,
            subscriber_count: channel.statistics.subscriber_count,
            video_count: channel.statistics.video_count,
        }
    }
}

/// Error envelope returned with non-2xx statuses
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ApiErrorResponse {
    pub error: ApiError,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ApiError {
    pub code: u16,
    pub message: String,
    pub errors: Vec<ApiErrorDetail>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ApiErrorDetail {
    pub reason: String,
}

impl ApiError {
    /// Whether any detail carries the given reason code
    pub fn has_reason(&self, reason: &str) -> bool {
        self.errors.iter().any(|e| e.reason == reason)
    }
}
