//! YouTube Data API v3 adapter

use super::PlatformAdapter;
use crate::models::{
    flatten_threads, ApiErrorResponse, ChannelListResponse, CommentThreadPage, VideoListResponse,
};
use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use std::time::Duration;
use tracing::{debug, info, warn};
use yca_core::config::YouTubeConfig;
use yca_core::error::{Result, YcaError};
use yca_core::types::{ChannelInfo, Comment, VideoId, VideoStats};

/// YouTube adapter over the blocking HTTP client
pub struct YouTubeAdapter {
    client: Client,
    base_url: String,
    api_key: String,
    page_size: u32,
}

impl YouTubeAdapter {
    /// Create an adapter, reading the API key from the configured environment variable
    pub fn new(config: &YouTubeConfig) -> Result<Self> {
        let api_key = std::env::var(&config.api_key_env)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| YcaError::MissingApiKey(config.api_key_env.clone()))?;
        Self::with_api_key(config, api_key)
    }

    /// Create an adapter with an explicit API key
    pub fn with_api_key(config: &YouTubeConfig, api_key: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("yca/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| YcaError::Http(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            page_size: config.page_size.clamp(1, 100),
        })
    }

    fn get<T: DeserializeOwned>(&self, endpoint: &str, query: &[(&str, &str)]) -> Result<T> {
        let url = format!("{}/{}", self.base_url, endpoint);
        debug!("GET {} {:?}", url, query);

        let response = self
            .client
            .get(&url)
            .query(query)
            .query(&[("key", self.api_key.as_str())])
            .send()
            // the URL carries the API key
            .map_err(|e| YcaError::Http(e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(platform_error(status.as_u16(), &body));
        }

        response
            .json::<T>()
            .map_err(|e| YcaError::Http(format!("Invalid response body: {}", e.without_url())))
    }
}

impl PlatformAdapter for YouTubeAdapter {
    fn platform(&self) -> &str {
        "youtube"
    }

    fn fetch_comments(&self, video_id: &VideoId) -> Result<Vec<Comment>> {
        let page_size = self.page_size.to_string();
        let comments = collect_pages(|token| {
            let mut query = vec![
                ("part", "snippet,replies"),
                ("videoId", video_id.as_str()),
                ("maxResults", page_size.as_str()),
                ("textFormat", "plainText"),
            ];
            if let Some(token) = token {
                query.push(("pageToken", token));
            }
            self.get::<CommentThreadPage>("commentThreads", &query)
        })
        .map_err(|e| match e {
            YcaError::Platform { status: 404, .. } => YcaError::VideoNotFound(video_id.to_string()),
            other => other,
        })?;

        info!("Fetched {} comments for {}", comments.len(), video_id);
        Ok(comments)
    }

    fn channel_id(&self, video_id: &VideoId) -> Result<String> {
        let response: VideoListResponse =
            self.get("videos", &[("part", "snippet"), ("id", video_id.as_str())])?;
        let video = response
            .items
            .into_iter()
            .next()
            .ok_or_else(|| YcaError::VideoNotFound(video_id.to_string()))?;
        video
            .snippet
            .and_then(|s| s.channel_id)
            .ok_or_else(|| YcaError::Platform {
                status: 200,
                message: format!("video {} has no channel id", video_id),
            })
    }

    fn channel_info(&self, channel_id: &str) -> Result<Option<ChannelInfo>> {
        let response: ChannelListResponse = self.get(
            "channels",
            &[("part", "snippet,statistics"), ("id", channel_id)],
        )?;
        Ok(response.items.into_iter().next().map(ChannelInfo::from))
    }

    fn video_stats(&self, video_id: &VideoId) -> Result<Option<VideoStats>> {
        let response: VideoListResponse =
            self.get("videos", &[("part", "statistics"), ("id", video_id.as_str())])?;
        Ok(response
            .items
            .into_iter()
            .next()
            .and_then(|v| v.statistics)
            .map(VideoStats::from))
    }
}

/// Follow `nextPageToken` until exhausted
///
/// A failing first page is an error. A failing later page ends pagination and
/// keeps the comments already read. A token seen before also ends it.
pub(crate) fn collect_pages<F>(mut fetch_page: F) -> Result<Vec<Comment>>
where
    F: FnMut(Option<&str>) -> Result<CommentThreadPage>,
{
    let mut page = fetch_page(None)?;
    let mut comments = Vec::new();
    let mut seen = HashSet::new();
    let mut pages = 1usize;

    loop {
        comments.extend(flatten_threads(&page.items));
        let Some(token) = page.next_page_token.take() else {
            break;
        };
        if !seen.insert(token.clone()) {
            warn!("Page token {} repeated after {} pages; stopping", token, pages);
            break;
        }
        match fetch_page(Some(token.as_str())) {
            Ok(next) => {
                page = next;
                pages += 1;
            }
            Err(e) => {
                warn!("Stopping pagination after {} pages: {}", pages, e);
                break;
            }
        }
    }

    debug!("Read {} comments from {} pages", comments.len(), pages);
    Ok(comments)
}

/// Map an error response to `YcaError::Platform`
pub(crate) fn platform_error(status: u16, body: &str) -> YcaError {
    let message = serde_json::from_str::<ApiErrorResponse>(body)
        .ok()
        .map(|r| r.error.message)
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| {
            let body = body.trim();
            if body.is_empty() {
                format!("HTTP {}", status)
            } else {
                body.chars().take(200).collect()
            }
        });
    YcaError::Platform { status, message }
}
