//! Platform adapter module
//!
//! Provides the trait a comment source implements and the YouTube implementation.

pub mod youtube;

use tracing::warn;
use yca_core::error::Result;
use yca_core::types::{ChannelInfo, Comment, VideoId, VideoStats};

/// Metadata shown next to an analysis; each part is best effort
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VideoDetails {
    pub channel: Option<ChannelInfo>,
    pub stats: Option<VideoStats>,
}

/// Trait for video platform adapters
pub trait PlatformAdapter: Send + Sync {
    /// Platform name
    fn platform(&self) -> &str;

    /// All top-level comments and replies of a video, flattened
    fn fetch_comments(&self, video_id: &VideoId) -> Result<Vec<Comment>>;

    /// Channel that published the video
    fn channel_id(&self, video_id: &VideoId) -> Result<String>;

    /// Channel details, `None` when the channel does not exist
    fn channel_info(&self, channel_id: &str) -> Result<Option<ChannelInfo>>;

    /// Video counters, `None` when the video does not exist
    fn video_stats(&self, video_id: &VideoId) -> Result<Option<VideoStats>>;

    /// Channel details and stats; failures are logged and left empty
    fn video_details(&self, video_id: &VideoId) -> VideoDetails {
        let channel = match self.channel_id(video_id) {
            Ok(channel_id) => self.channel_info(&channel_id).unwrap_or_else(|e| {
                warn!("Failed to fetch channel {}: {}", channel_id, e);
                None
            }),
            Err(e) => {
                warn!("Failed to resolve channel of {}: {}", video_id, e);
                None
            }
        };
        let stats = self.video_stats(video_id).unwrap_or_else(|e| {
            warn!("Failed to fetch stats of {}: {}", video_id, e);
            None
        });
        VideoDetails { channel, stats }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use yca_core::error::YcaError;

    struct StubAdapter {
        channel_fails: bool,
    }

    impl PlatformAdapter for StubAdapter {
        fn platform(&self) -> &str {
            "stub"
        }

        fn fetch_comments(&self, _video_id: &VideoId) -> Result<Vec<Comment>> {
            Ok(vec![Comment::new("a", "hello there friend")])
        }

        fn channel_id(&self, video_id: &VideoId) -> Result<String> {
            if self.channel_fails {
                Err(YcaError::VideoNotFound(video_id.to_string()))
            } else {
                Ok("UC123".to_string())
            }
        }

        fn channel_info(&self, _channel_id: &str) -> Result<Option<ChannelInfo>> {
            Ok(Some(ChannelInfo {
                title: Some("Deep Dives".to_string()),
                ..Default::default()
            }))
        }

        fn video_stats(&self, _video_id: &VideoId) -> Result<Option<VideoStats>> {
            Err(YcaError::Http("timed out".to_string()))
        }
    }

    fn video() -> VideoId {
        VideoId::parse("dQw4w9WgXcQ").unwrap()
    }

    #[test]
    fn test_video_details_best_effort() {
        let details = StubAdapter { channel_fails: false }.video_details(&video());
        assert_eq!(details.channel.unwrap().title.as_deref(), Some("Deep Dives"));
        assert!(details.stats.is_none());
    }

    #[test]
    fn test_video_details_without_channel() {
        let adapter = StubAdapter { channel_fails: true };
        assert_eq!(adapter.video_details(&video()), VideoDetails::default());
        assert_eq!(adapter.fetch_comments(&video()).unwrap().len(), 1);
    }
}
