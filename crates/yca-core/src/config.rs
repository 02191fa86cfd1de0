//! Configuration management for yca

use crate::error::{Result, YcaError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default location of the project configuration file
pub const DEFAULT_CONFIG_PATH: &str = ".yca/config.toml";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Relevance filter and sentiment thresholds
    pub classifier: ClassifierConfig,
    /// Sentiment lexicon location
    pub lexicon: LexiconConfig,
    /// Comment file storage
    pub storage: StorageConfig,
    /// Video platform API access
    pub youtube: YouTubeConfig,
}

impl Config {
    /// Load configuration from a TOML file, falling back to defaults when absent
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No config at {:?}, using defaults", path);
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content).map_err(|e| YcaError::Toml(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Render as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| YcaError::Toml(e.to_string()))
    }

    /// Check value ranges that serde cannot express
    pub fn validate(&self) -> Result<()> {
        let c = &self.classifier;
        if c.positive_threshold < c.negative_threshold {
            return Err(YcaError::Config(format!(
                "positive_threshold ({}) must not be below negative_threshold ({})",
                c.positive_threshold, c.negative_threshold
            )));
        }
        if !(-1.0..=1.0).contains(&c.positive_threshold) || !(-1.0..=1.0).contains(&c.negative_threshold) {
            return Err(YcaError::Config(
                "sentiment thresholds must lie within [-1, 1]".to_string(),
            ));
        }
        if self.youtube.page_size == 0 || self.youtube.page_size > 100 {
            return Err(YcaError::Config(format!(
                "youtube.page_size must be between 1 and 100, got {}",
                self.youtube.page_size
            )));
        }
        Ok(())
    }
}

/// Classifier policy constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Comments with this many whitespace tokens or fewer are off-topic
    pub max_off_topic_tokens: usize,
    /// Low-information fillers matched against the whole lowercased comment
    pub stoplist: Vec<String>,
    /// Compound score at or above which a comment is positive
    pub positive_threshold: f64,
    /// Compound score at or below which a comment is negative
    pub negative_threshold: f64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            max_off_topic_tokens: 2,
            stoplist: ["ok", "nice", "bro", "first", "hmm", "lol"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            positive_threshold: 0.05,
            negative_threshold: -0.05,
        }
    }
}

/// Sentiment lexicon settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LexiconConfig {
    /// Explicit lexicon file; never auto-installed
    pub path: Option<PathBuf>,
    /// Directory the bundled lexicon is installed into (platform data dir if unset)
    pub data_dir: Option<PathBuf>,
    /// Install the bundled lexicon when it is missing
    pub auto_install: bool,
}

impl Default for LexiconConfig {
    fn default() -> Self {
        Self {
            path: None,
            data_dir: None,
            auto_install: true,
        }
    }
}

/// Comment file storage settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding `<video_id>.csv` files
    pub comments_dir: PathBuf,
    /// Remove comment files of other videos after a fetch
    pub keep_only_current: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            comments_dir: PathBuf::from(".yca/comments"),
            keep_only_current: true,
        }
    }
}

/// Video platform API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct YouTubeConfig {
    /// Environment variable holding the API key
    pub api_key_env: String,
    /// API base URL
    pub base_url: String,
    /// Comment threads per page (platform maximum is 100)
    pub page_size: u32,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for YouTubeConfig {
    fn default() -> Self {
        Self {
            api_key_env: "YOUTUBE_API_KEY".to_string(),
            base_url: "https://www.googleapis.com/youtube/v3".to_string(),
            page_size: 100,
            timeout_secs: 30,
        }
    }
}
