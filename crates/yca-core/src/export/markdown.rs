//! Markdown exporter for analysis reports

use super::exporter::Exporter;
use crate::classify::Sentiment;
use crate::error::Result;
use crate::report::AnalysisReport;

/// Width of the longest bar in the chart section
const BAR_WIDTH: usize = 30;

/// Markdown exporter
pub struct MarkdownExporter {
    /// Include bar chart section
    include_chart: bool,
    /// Include channel section
    include_channel: bool,
}

impl MarkdownExporter {
    /// Create a new Markdown exporter with default settings
    pub fn new() -> Self {
        Self {
            include_chart: true,
            include_channel: true,
        }
    }

    /// Set whether to include the bar chart
    pub fn with_chart(mut self, include: bool) -> Self {
        self.include_chart = include;
        self
    }

    /// Set whether to include channel details
    pub fn with_channel(mut self, include: bool) -> Self {
        self.include_channel = include;
        self
    }

    /// Render the report header
    fn render_header(&self, report: &AnalysisReport) -> String {
        let mut header = String::new();
        header.push_str("# Comment Sentiment Report\n\n");

        header.push_str(&format!("**Report:** `{}`\n", report.id));
        header.push_str(&format!(
            "**Date:** {}\n",
            report.created_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));
        if let Some(ref video) = report.video_id {
            header.push_str(&format!(
                "**Video:** [{}](https://www.youtube.com/watch?v={})\n",
                video, video
            ));
        }
        if let Some(title) = report.channel_title() {
            header.push_str(&format!("**Channel:** {}\n", title));
        }
        header.push_str(&format!("**Lexicon:** `{}`\n", report.lexicon));

        header.push('\n');
        header
    }

    /// Render the four headline metrics
    fn render_metrics(&self, report: &AnalysisReport) -> String {
        let s = &report.summary;
        let mut out = String::new();
        out.push_str("## Summary\n\n");
        out.push_str("| Total | Positive | Negative | Irrelevant |\n");
        out.push_str("|------:|---------:|---------:|-----------:|\n");
        out.push_str(&format!(
            "| {} | {} | {} | {} |\n\n",
            s.total_analyzed(),
            s.num_positive(),
            s.num_negative(),
            s.num_irrelevant()
        ));

        if let Some(count) = report.platform_comment_count() {
            out.push_str(&format!(
                "The platform reports {} comments; {} were fetched and analyzed.\n\n",
                count,
                s.total_analyzed()
            ));
        }
        out
    }

    /// Render a text bar chart with percentage labels
    fn render_chart(&self, report: &AnalysisReport) -> String {
        if !self.include_chart {
            return String::new();
        }

        let s = &report.summary;
        let mut out = String::new();
        out.push_str("## Sentiment Distribution\n\n");

        if s.is_empty() {
            out.push_str("_No comments to analyze._\n\n");
            return out;
        }

        let max = Sentiment::ALL.iter().map(|b| s.count(*b)).max().unwrap_or(0).max(1);
        out.push_str("```text\n");
        for bucket in Sentiment::ALL {
            let count = s.count(bucket);
            let width = count * BAR_WIDTH / max;
            out.push_str(&format!(
                "{:<10} {:<width$} {:>5} ({:.1}%)\n",
                bucket.label(),
                "█".repeat(width),
                count,
                s.percentage(bucket),
                width = BAR_WIDTH
            ));
        }
        out.push_str("```\n\n");
        out
    }

    fn render_channel(&self, report: &AnalysisReport) -> String {
        if !self.include_channel {
            return String::new();
        }
        let Some(ref channel) = report.channel else {
            return String::new();
        };

        let na = "N/A";
        let mut out = String::new();
        out.push_str("## Channel\n\n");
        out.push_str(&format!("- **Title:** {}\n", channel.title.as_deref().unwrap_or(na)));
        out.push_str(&format!(
            "- **Subscribers:** {}\n",
            channel.subscriber_count.as_deref().unwrap_or(na)
        ));
        out.push_str(&format!(
            "- **Total Videos:** {}\n",
            channel.video_count.as_deref().unwrap_or(na)
        ));
        out.push_str(&format!(
            "- **Created On:** {}\n",
            channel.created_date().unwrap_or(na)
        ));
        if let Some(ref description) = channel.description {
            if !description.trim().is_empty() {
                out.push_str(&format!("\n> {}\n", description.trim().replace('\n', "\n> ")));
            }
        }
        out.push('\n');
        out
    }

    fn render_footer(&self) -> String {
        "---\n*Neutral comments are counted as irrelevant.*\n".to_string()
    }
}

impl Default for MarkdownExporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Exporter for MarkdownExporter {
    fn export(&self, report: &AnalysisReport) -> Result<String> {
        let mut output = String::new();
        output.push_str(&self.render_header(report));
        output.push_str(&self.render_metrics(report));
        output.push_str(&self.render_chart(report));
        output.push_str(&self.render_channel(report));
        output.push_str(&self.render_footer());
        Ok(output)
    }

    fn format_name(&self) -> &str {
        "markdown"
    }

    fn file_extension(&self) -> &str {
        "md"
    }
}
