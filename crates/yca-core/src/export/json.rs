//! JSON exporter for analysis reports

use super::exporter::Exporter;
use crate::classify::{Sentiment, SentimentSummary};
use crate::error::Result;
use crate::report::AnalysisReport;
use crate::types::{ChannelInfo, VideoStats};
use serde::{Deserialize, Serialize};

/// Pretty-printed JSON exporter
#[derive(Debug, Default)]
pub struct JsonExporter;

impl JsonExporter {
    pub fn new() -> Self {
        Self
    }
}

impl Exporter for JsonExporter {
    fn export(&self, report: &AnalysisReport) -> Result<String> {
        let data = ExportData::from_report(report);
        Ok(serde_json::to_string_pretty(&data)?)
    }

    fn format_name(&self) -> &str {
        "json"
    }

    fn file_extension(&self) -> &str {
        "json"
    }
}

/// Exported data structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportData {
    /// Report ID
    pub id: String,
    /// Unix timestamp
    pub ts: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_id: Option<String>,
    /// Lexicon fingerprint
    pub lexicon: String,
    /// Bucket counts
    pub summary: ExportStats,
    /// Bucket shares in percent
    pub shares: ExportShares,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel: Option<ChannelInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<VideoStats>,
}

impl ExportData {
    /// Create from a report
    pub fn from_report(report: &AnalysisReport) -> Self {
        Self {
            id: report.id.to_string(),
            ts: report.created_at.timestamp(),
            video_id: report.video_id.as_ref().map(|v| v.to_string()),
            lexicon: report.lexicon.clone(),
            summary: ExportStats::from_summary(&report.summary),
            shares: ExportShares::from_summary(&report.summary),
            channel: report.channel.clone(),
            stats: report.stats.clone(),
        }
    }
}

/// Bucket counts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportStats {
    pub num_positive: usize,
    pub num_negative: usize,
    pub num_irrelevant: usize,
    pub total_analyzed: usize,
}

impl ExportStats {
    /// Create from a summary
    pub fn from_summary(summary: &SentimentSummary) -> Self {
        Self {
            num_positive: summary.num_positive(),
            num_negative: summary.num_negative(),
            num_irrelevant: summary.num_irrelevant(),
            total_analyzed: summary.total_analyzed(),
        }
    }
}

/// Bucket shares, rounded to one decimal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportShares {
    pub positive: f64,
    pub negative: f64,
    pub irrelevant: f64,
}

impl ExportShares {
    /// Create from a summary
    pub fn from_summary(summary: &SentimentSummary) -> Self {
        let pct = |s| (summary.percentage(s) * 10.0).round() / 10.0;
        Self {
            positive: pct(Sentiment::Positive),
            negative: pct(Sentiment::Negative),
            irrelevant: pct(Sentiment::Irrelevant),
        }
    }
}
