//! Relevance filter: separates noise from sentiment-bearing comments

use crate::config::ClassifierConfig;
use once_cell::sync::Lazy;
use regex::Regex;

/// Text made only of punctuation, symbols or emoji
static SYMBOLS_ONLY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\w\s]+$").expect("symbols pattern is valid"));

/// Why a comment was judged off-topic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OffTopicReason {
    /// Too few tokens to carry sentiment
    TooShort,
    /// Punctuation or emoji only
    SymbolsOnly,
    /// Matches the filler stoplist
    Stoplisted,
}

impl OffTopicReason {
    pub fn describe(&self) -> &'static str {
        match self {
            OffTopicReason::TooShort => "too short",
            OffTopicReason::SymbolsOnly => "symbols only",
            OffTopicReason::Stoplisted => "filler",
        }
    }
}

/// Decides whether a comment carries no analyzable sentiment signal
#[derive(Debug, Clone)]
pub struct RelevanceFilter {
    max_tokens: usize,
    stoplist: Vec<String>,
}

impl RelevanceFilter {
    /// Create a filter from classifier configuration
    pub fn new(config: &ClassifierConfig) -> Self {
        Self {
            max_tokens: config.max_off_topic_tokens,
            stoplist: config.stoplist.iter().map(|s| s.trim().to_lowercase()).collect(),
        }
    }

    /// Why the comment is off-topic, or `None` if it is sentiment-bearing
    pub fn off_topic_reason(&self, text: &str) -> Option<OffTopicReason> {
        let normalized = text.trim().to_lowercase();

        if normalized.split_whitespace().count() <= self.max_tokens {
            return Some(OffTopicReason::TooShort);
        }
        if SYMBOLS_ONLY_RE.is_match(&normalized) {
            return Some(OffTopicReason::SymbolsOnly);
        }
        if self.stoplist.iter().any(|w| *w == normalized) {
            return Some(OffTopicReason::Stoplisted);
        }
        None
    }

    /// Whether the comment is noise
    pub fn is_off_topic(&self, text: &str) -> bool {
        self.off_topic_reason(text).is_some()
    }
}

impl Default for RelevanceFilter {
    fn default() -> Self {
        Self::new(&ClassifierConfig::default())
    }
}
