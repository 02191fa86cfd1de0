//! Analysis report: a summary plus the context it was computed in

use crate::classify::SentimentSummary;
use crate::types::{ChannelInfo, ReportId, VideoId, VideoStats};
use chrono::{DateTime, Utc};

/// Result of one analysis run, ready for export or display
#[derive(Debug, Clone)]
pub struct AnalysisReport {
    pub id: ReportId,
    pub created_at: DateTime<Utc>,
    /// Video the comments came from, when known
    pub video_id: Option<VideoId>,
    pub channel: Option<ChannelInfo>,
    pub stats: Option<VideoStats>,
    pub summary: SentimentSummary,
    /// Fingerprint of the lexicon used for scoring
    pub lexicon: String,
}

impl AnalysisReport {
    /// Create a report for a summary
    pub fn new(summary: SentimentSummary, lexicon: impl Into<String>) -> Self {
        Self {
            id: ReportId::generate(),
            created_at: Utc::now(),
            video_id: None,
            channel: None,
            stats: None,
            summary,
            lexicon: lexicon.into(),
        }
    }

    pub fn with_video(mut self, video_id: VideoId) -> Self {
        self.video_id = Some(video_id);
        self
    }

    pub fn with_channel(mut self, channel: Option<ChannelInfo>) -> Self {
        self.channel = channel;
        self
    }

    pub fn with_stats(mut self, stats: Option<VideoStats>) -> Self {
        self.stats = stats;
        self
    }

    /// Comment count reported by the platform, if fetched
    pub fn platform_comment_count(&self) -> Option<&str> {
        self.stats.as_ref().and_then(|s| s.comment_count.as_deref())
    }

    /// Channel title, if fetched
    pub fn channel_title(&self) -> Option<&str> {
        self.channel.as_ref().and_then(|c| c.title.as_deref())
    }
}
