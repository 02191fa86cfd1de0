//! Comment classification
//!
//! Decides, for each comment, whether it is noise or carries sentiment, and
//! if it does, whether that sentiment is positive or negative.
//!
//! # Example
//!
//! ```ignore
//! use yca_core::classify::{Classifier, LazyScorer, SentimentAnalyzer};
//!
//! let analyzer = SentimentAnalyzer::new(Classifier::default(), LazyScorer::bundled());
//! let summary = analyzer.analyze(&comments)?;
//! println!("{} positive of {}", summary.num_positive(), summary.total_analyzed());
//! ```

pub mod lexicon;
mod pipeline;
mod relevance;
mod scorer;

pub use lexicon::{bundled_lexicon, Lexicon, LEXICON_FILE_NAME};
pub use pipeline::{Classification, Classifier, Sentiment, SentimentAnalyzer, SentimentSummary, Verdict};
pub use relevance::{OffTopicReason, RelevanceFilter};
pub use scorer::{LazyScorer, LexiconLoader, SentimentScorer, VaderScorer};
