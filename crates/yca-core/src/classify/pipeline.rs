//! Classification pipeline: relevance filter first, then sentiment score

use super::relevance::{OffTopicReason, RelevanceFilter};
use super::scorer::{LazyScorer, SentimentScorer};
use crate::config::ClassifierConfig;
use crate::error::Result;
use crate::types::Comment;
use serde::Serialize;
use std::fmt;
use tracing::debug;

/// Bucket a comment ends up in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    /// Off-topic noise or neutral sentiment
    Irrelevant,
}

impl Sentiment {
    /// All buckets in display order
    pub const ALL: [Sentiment; 3] = [Sentiment::Positive, Sentiment::Negative, Sentiment::Irrelevant];

    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            Sentiment::Positive => "Positive",
            Sentiment::Negative => "Negative",
            Sentiment::Irrelevant => "Irrelevant",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How a single comment was bucketed
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Verdict {
    /// Filtered before scoring
    OffTopic(OffTopicReason),
    /// Scored with the given compound value
    Scored(f64),
}

/// Result of classifying one comment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    pub sentiment: Sentiment,
    pub verdict: Verdict,
}

/// Aggregate bucket counts for one analysis run
///
/// `total_analyzed` always equals the sum of the three buckets; counts are
/// only ever added through [`SentimentSummary::record`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SentimentSummary {
    num_positive: usize,
    num_negative: usize,
    num_irrelevant: usize,
    total_analyzed: usize,
}

impl SentimentSummary {
    /// Build a summary from bucket counts
    pub fn from_counts(num_positive: usize, num_negative: usize, num_irrelevant: usize) -> Self {
        Self {
            num_positive,
            num_negative,
            num_irrelevant,
            total_analyzed: num_positive + num_negative + num_irrelevant,
        }
    }

    /// Count one classified comment
    pub fn record(&mut self, sentiment: Sentiment) {
        match sentiment {
            Sentiment::Positive => self.num_positive += 1,
            Sentiment::Negative => self.num_negative += 1,
            Sentiment::Irrelevant => self.num_irrelevant += 1,
        }
        self.total_analyzed += 1;
    }

    pub fn num_positive(&self) -> usize {
        self.num_positive
    }

    pub fn num_negative(&self) -> usize {
        self.num_negative
    }

    pub fn num_irrelevant(&self) -> usize {
        self.num_irrelevant
    }

    pub fn total_analyzed(&self) -> usize {
        self.total_analyzed
    }

    /// Count for one bucket
    pub fn count(&self, sentiment: Sentiment) -> usize {
        match sentiment {
            Sentiment::Positive => self.num_positive,
            Sentiment::Negative => self.num_negative,
            Sentiment::Irrelevant => self.num_irrelevant,
        }
    }

    /// Share of one bucket in percent (0 when nothing was analyzed)
    pub fn percentage(&self, sentiment: Sentiment) -> f64 {
        if self.total_analyzed == 0 {
            return 0.0;
        }
        self.count(sentiment) as f64 * 100.0 / self.total_analyzed as f64
    }

    pub fn is_empty(&self) -> bool {
        self.total_analyzed == 0
    }
}

impl AsRef<str> for Comment {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

/// Applies the relevance filter and sentiment thresholds
#[derive(Debug, Clone)]
pub struct Classifier {
    filter: RelevanceFilter,
    positive_threshold: f64,
    negative_threshold: f64,
}

impl Classifier {
    /// Create a classifier from configuration
    pub fn new(config: &ClassifierConfig) -> Self {
        Self {
            filter: RelevanceFilter::new(config),
            positive_threshold: config.positive_threshold,
            negative_threshold: config.negative_threshold,
        }
    }

    /// The relevance filter in use
    pub fn filter(&self) -> &RelevanceFilter {
        &self.filter
    }

    /// Bucket for a compound score; the neutral band folds into irrelevant
    pub fn bucket(&self, compound: f64) -> Sentiment {
        if compound >= self.positive_threshold {
            Sentiment::Positive
        } else if compound <= self.negative_threshold {
            Sentiment::Negative
        } else {
            Sentiment::Irrelevant
        }
    }

    /// Classify one comment; `None` for blank text
    pub fn classify<S>(&self, scorer: &S, text: &str) -> Option<Classification>
    where
        S: SentimentScorer + ?Sized,
    {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        if let Some(reason) = self.filter.off_topic_reason(text) {
            return Some(Classification {
                sentiment: Sentiment::Irrelevant,
                verdict: Verdict::OffTopic(reason),
            });
        }

        let compound = scorer.score(text);
        Some(Classification {
            sentiment: self.bucket(compound),
            verdict: Verdict::Scored(compound),
        })
    }

    /// Aggregate a sequence of comments; blank ones are skipped
    pub fn summarize<S, I>(&self, scorer: &S, comments: I) -> SentimentSummary
    where
        S: SentimentScorer + ?Sized,
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut summary = SentimentSummary::default();
        let mut skipped = 0usize;
        for comment in comments {
            match self.classify(scorer, comment.as_ref()) {
                Some(c) => summary.record(c.sentiment),
                None => skipped += 1,
            }
        }
        debug!(
            "Classified {} comments ({} positive, {} negative, {} irrelevant, {} blank skipped)",
            summary.total_analyzed(),
            summary.num_positive(),
            summary.num_negative(),
            summary.num_irrelevant(),
            skipped
        );
        summary
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(&ClassifierConfig::default())
    }
}

/// Classifier paired with a lazily-loaded lexicon scorer
///
/// The lexicon is initialised before any comment is looked at, so a missing
/// lexicon fails the whole run even for an empty comment list.
#[derive(Debug)]
pub struct SentimentAnalyzer {
    classifier: Classifier,
    scorer: LazyScorer,
}

impl SentimentAnalyzer {
    /// Create an analyzer
    pub fn new(classifier: Classifier, scorer: LazyScorer) -> Self {
        Self { classifier, scorer }
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    /// Fingerprint of the loaded lexicon (loads it if needed)
    pub fn lexicon_fingerprint(&self) -> Result<String> {
        Ok(self.scorer.get()?.lexicon().fingerprint().to_string())
    }

    /// Classify one comment
    pub fn classify(&self, text: &str) -> Result<Option<Classification>> {
        let scorer = self.scorer.get()?;
        Ok(self.classifier.classify(scorer, text))
    }

    /// Summarize a batch of comments
    pub fn analyze(&self, comments: &[Comment]) -> Result<SentimentSummary> {
        let scorer = self.scorer.get()?;
        Ok(self.classifier.summarize(scorer, comments))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::YcaError;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    /// Scorer that returns a fixed value for every text
    fn fixed(value: f64) -> impl Fn(&str) -> f64 + Send + Sync {
        move |_: &str| value
    }

    #[test]
    fn test_threshold_exactness() {
        let classifier = Classifier::default();
        let text = "this comment has enough words";

        let cases = [
            (0.05, Sentiment::Positive),
            (-0.05, Sentiment::Negative),
            (0.049, Sentiment::Irrelevant),
            (-0.049, Sentiment::Irrelevant),
            (0.0, Sentiment::Irrelevant),
            (1.0, Sentiment::Positive),
            (-1.0, Sentiment::Negative),
        ];
        for (score, expected) in cases {
            let c = classifier.classify(&fixed(score), text).unwrap();
            assert_eq!(c.sentiment, expected, "score {}", score);
            assert_eq!(c.verdict, Verdict::Scored(score));
        }
    }

    #[test]
    fn test_off_topic_is_not_scored() {
        let classifier = Classifier::default();
        let panicking = |_: &str| -> f64 { panic!("off-topic comments must not be scored") };
        let c = classifier.classify(&panicking, "first").unwrap();
        assert_eq!(c.sentiment, Sentiment::Irrelevant);
        assert_eq!(c.verdict, Verdict::OffTopic(OffTopicReason::TooShort));
    }

    #[test]
    fn test_blank_comments_are_skipped() {
        let classifier = Classifier::default();
        assert!(classifier.classify(&fixed(0.9), "   ").is_none());

        let summary = classifier.summarize(&fixed(0.9), ["", "  ", "\t\n"]);
        assert_eq!(summary, SentimentSummary::default());
    }

    #[test]
    fn test_empty_input() {
        let summary = Classifier::default().summarize(&fixed(0.9), Vec::<String>::new());
        assert_eq!(summary, SentimentSummary::from_counts(0, 0, 0));
        assert!(summary.is_empty());
        assert_eq!(summary.percentage(Sentiment::Positive), 0.0);
    }

    #[test]
    fn test_summary_invariant() {
        let texts = [
            "this one is really quite good",
            "this one is really quite bad",
            "meh",
            "",
            "an utterly neutral statement here",
        ];
        let scores = |t: &str| {
            if t.contains("good") {
                0.6
            } else if t.contains("bad") {
                -0.6
            } else {
                0.0
            }
        };
        let summary = Classifier::default().summarize(&scores, texts);
        assert_eq!(summary.num_positive(), 1);
        assert_eq!(summary.num_negative(), 1);
        assert_eq!(summary.num_irrelevant(), 2);
        assert_eq!(
            summary.total_analyzed(),
            summary.num_positive() + summary.num_negative() + summary.num_irrelevant()
        );
    }

    #[test]
    fn test_end_to_end_with_lexicon() {
        let analyzer = SentimentAnalyzer::new(Classifier::default(), LazyScorer::bundled());
        let comments: Vec<Comment> = [
            "great video!!",
            "terrible, waste of time",
            "ok",
            "first",
            "??",
            "I really enjoyed this deep dive",
        ]
        .iter()
        .map(|t| Comment::new("viewer", *t))
        .collect();

        let summary = analyzer.analyze(&comments).unwrap();
        // "great video!!" has only two tokens and is filtered as too short
        assert_eq!(summary, SentimentSummary::from_counts(1, 1, 4));
        assert_eq!(summary.total_analyzed(), 6);
    }

    #[test]
    fn test_everyday_comments_are_scored() {
        let analyzer = SentimentAnalyzer::new(Classifier::default(), LazyScorer::bundled());
        let sentiment = |text: &str| analyzer.classify(text).unwrap().unwrap().sentiment;

        assert_eq!(sentiment("haha this cat video"), Sentiment::Positive);
        assert_eq!(sentiment("i disagree with this take"), Sentiment::Negative);
    }

    #[test]
    fn test_determinism() {
        let analyzer = SentimentAnalyzer::new(Classifier::default(), LazyScorer::bundled());
        let first = analyzer.classify("honestly a wonderful walkthrough").unwrap();
        let second = analyzer.classify("honestly a wonderful walkthrough").unwrap();
        assert_eq!(first, second);
        assert_eq!(first.unwrap().sentiment, Sentiment::Positive);
    }

    #[test]
    fn test_missing_lexicon_aborts_even_empty_run() {
        let analyzer = SentimentAnalyzer::new(
            Classifier::default(),
            LazyScorer::new(|| {
                Err(YcaError::LexiconUnavailable {
                    path: PathBuf::from("vader_lexicon.txt"),
                    reason: "not installed".to_string(),
                })
            }),
        );
        let err = analyzer.analyze(&[]).unwrap_err();
        assert!(err.is_setup_failure());
    }

    #[test]
    fn test_percentages() {
        let summary = SentimentSummary::from_counts(1, 1, 2);
        assert_eq!(summary.percentage(Sentiment::Positive), 25.0);
        assert_eq!(summary.percentage(Sentiment::Irrelevant), 50.0);
        let total: f64 = Sentiment::ALL.iter().map(|s| summary.percentage(*s)).sum();
        assert_eq!(total, 100.0);
    }

    #[test]
    fn test_custom_thresholds() {
        let config = ClassifierConfig {
            positive_threshold: 0.5,
            negative_threshold: -0.5,
            ..Default::default()
        };
        let classifier = Classifier::new(&config);
        assert_eq!(classifier.bucket(0.3), Sentiment::Irrelevant);
        assert_eq!(classifier.bucket(0.5), Sentiment::Positive);
        assert_eq!(classifier.bucket(-0.5), Sentiment::Negative);
    }
}
