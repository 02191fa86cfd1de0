//! Analyze command
//!
//! Classify comments and report the sentiment summary.

use anyhow::{anyhow, Context, Result};
use clap::{Args, ValueEnum};
use std::io::Write;
use std::path::PathBuf;

use yca_core::classify::{Sentiment, SentimentAnalyzer, SentimentSummary, Verdict};
use yca_core::config::Config;
use yca_core::export::{ExportManager, Exporter};
use yca_core::report::AnalysisReport;
use yca_core::types::{Comment, VideoId};
use yca_integration::{PlatformAdapter, VideoDetails, YouTubeAdapter};
use yca_storage::{read_comments, CommentFileStore};

use super::build_analyzer;
use super::fetch::fetch_and_store;

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable summary
    Text,
    /// JSON document
    Json,
    /// Markdown report
    Markdown,
}

impl OutputFormat {
    /// Name of the exporter producing this format
    pub fn name(self) -> &'static str {
        match self {
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
            OutputFormat::Markdown => "markdown",
        }
    }
}

/// Arguments for the analyze command
#[derive(Debug, Args)]
pub struct AnalyzeArgs {
    /// Comment file with a `Username,Comment` header
    #[arg(required_unless_present = "video", conflicts_with = "video")]
    pub file: Option<PathBuf>,

    /// Video link or id; uses stored comments, fetching them if missing
    #[arg(long)]
    pub video: Option<String>,

    /// Output format
    #[arg(long, short, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Output file path (stdout if not specified)
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Open the interactive dashboard
    #[arg(long)]
    pub tui: bool,

    /// Print the verdict of every comment
    #[arg(long)]
    pub list: bool,
}

/// Execute the analyze command
pub fn execute(args: AnalyzeArgs, config: &Config) -> Result<()> {
    let (comments, video, details) = match (&args.file, &args.video) {
        (Some(file), _) => {
            let comments = read_comments(file)
                .with_context(|| format!("Failed to read comments from {}", file.display()))?;
            (comments, None, VideoDetails::default())
        }
        (None, Some(video)) => {
            let id = VideoId::parse(video)?;
            let (comments, details) = load_video(&id, config)?;
            (comments, Some(id), details)
        }
        (None, None) => return Err(anyhow!("Specify a comment file or --video")),
    };
    tracing::info!("Loaded {} comments", comments.len());

    let analyzer = build_analyzer(config);
    let report = build_report(&analyzer, &comments, video, details)?;

    if args.list {
        list_verdicts(&analyzer, &comments)?;
    }

    let empty = report.summary.is_empty();
    if empty {
        use colored::Colorize;
        eprintln!("{} No comments to analyze.", "⚠".yellow());
    }

    if args.tui {
        let mut dashboard = yca_ui::Dashboard::new(report)?;
        if empty {
            dashboard.state.set_message("No comments to analyze");
        }
        return dashboard.run();
    }

    emit(&report, args.format, args.output)
}

/// Stored comments of a video, fetched first when the store has none
fn load_video(id: &VideoId, config: &Config) -> Result<(Vec<Comment>, VideoDetails)> {
    let store = CommentFileStore::new(&config.storage.comments_dir)?;

    if !store.exists(id) {
        let adapter = YouTubeAdapter::new(&config.youtube)
            .context("No stored comments for this video and fetching them needs an API key")?;
        let comments = fetch_and_store(&adapter, &store, id, config)?;
        let details = adapter.video_details(id);
        return Ok((comments, details));
    }

    let comments = store.load(id)?;
    let details = match YouTubeAdapter::new(&config.youtube) {
        Ok(adapter) => adapter.video_details(id),
        Err(e) => {
            tracing::info!("Skipping channel details: {}", e);
            VideoDetails::default()
        }
    };
    Ok((comments, details))
}

/// Classify the comments and wrap the summary in a report
pub fn build_report(
    analyzer: &SentimentAnalyzer,
    comments: &[Comment],
    video: Option<VideoId>,
    details: VideoDetails,
) -> Result<AnalysisReport> {
    let summary = analyzer.analyze(comments).map_err(|e| {
        if e.is_setup_failure() {
            anyhow!(e).context(
                "No sentiment lexicon available (run `yca lexicon install` or check [lexicon] in the config)",
            )
        } else {
            anyhow!(e)
        }
    })?;
    let fingerprint = analyzer.lexicon_fingerprint()?;

    let mut report = AnalysisReport::new(summary, fingerprint)
        .with_channel(details.channel)
        .with_stats(details.stats);
    if let Some(video) = video {
        report = report.with_video(video);
    }
    Ok(report)
}

fn list_verdicts(analyzer: &SentimentAnalyzer, comments: &[Comment]) -> Result<()> {
    use colored::Colorize;

    for comment in comments {
        let Some(classification) = analyzer.classify(&comment.text)? else {
            continue;
        };
        let tag = format!("{:<10}", classification.sentiment.label());
        let tag = match classification.sentiment {
            Sentiment::Positive => tag.green(),
            Sentiment::Negative => tag.red(),
            Sentiment::Irrelevant => tag.dimmed(),
        };
        let detail = match classification.verdict {
            Verdict::OffTopic(reason) => format!("off-topic ({})", reason.describe()),
            Verdict::Scored(score) => format!("{:+.4}", score),
        };
        println!(
            "{} {:<22} {}: {}",
            tag,
            detail,
            comment.author.cyan(),
            comment.text.replace('\n', " ")
        );
    }
    println!();
    Ok(())
}

fn emit(report: &AnalysisReport, format: OutputFormat, output: Option<PathBuf>) -> Result<()> {
    use colored::Colorize;

    let mut manager = ExportManager::new();
    manager.register(Box::new(TextExporter));

    let Some(output_path) = output else {
        let content = manager.export(report, format.name())?;
        let mut stdout = std::io::stdout().lock();
        stdout
            .write_all(content.as_bytes())
            .context("Failed to write to stdout")?;
        if !content.ends_with('\n') {
            stdout.write_all(b"\n").context("Failed to write to stdout")?;
        }
        return Ok(());
    };

    if format == OutputFormat::Text {
        colored::control::set_override(false);
    }
    let written = manager
        .export_to_file(report, format.name(), &output_path)
        .with_context(|| format!("Failed to write to {}", output_path.display()))?;
    eprintln!("{} Report written to {}", "✓".green(), written.display());
    Ok(())
}

/// Exports the plain-text summary through the [`ExportManager`]
struct TextExporter;

impl Exporter for TextExporter {
    fn export(&self, report: &AnalysisReport) -> yca_core::error::Result<String> {
        Ok(render_text(report))
    }

    fn format_name(&self) -> &str {
        "text"
    }

    fn file_extension(&self) -> &str {
        "txt"
    }
}

/// Plain-text summary: four metrics and a bar per bucket
pub fn render_text(report: &AnalysisReport) -> String {
    use colored::Colorize;

    const BAR_WIDTH: usize = 40;
    let s: &SentimentSummary = &report.summary;
    let mut out = String::new();

    out.push_str(&format!("{}\n", "Comment Sentiment Summary".bold().underline()));
    if let Some(ref video) = report.video_id {
        out.push_str(&format!("  Video:    {}\n", video.to_string().cyan()));
    }
    if let Some(title) = report.channel_title() {
        out.push_str(&format!("  Channel:  {}\n", title));
    }
    if let Some(count) = report.platform_comment_count() {
        out.push_str(&format!("  Reported: {} comments\n", count));
    }
    out.push('\n');

    out.push_str(&format!(
        "  {:<16}{:>6}\n",
        "Total Comments",
        s.total_analyzed().to_string().bold()
    ));

    let max = Sentiment::ALL.iter().map(|b| s.count(*b)).max().unwrap_or(0).max(1);
    for bucket in Sentiment::ALL {
        let count = s.count(bucket);
        let bar = "█".repeat(count * BAR_WIDTH / max);
        let bar = match bucket {
            Sentiment::Positive => bar.green(),
            Sentiment::Negative => bar.red(),
            Sentiment::Irrelevant => bar.dimmed(),
        };
        out.push_str(&format!(
            "  {:<16}{:>6}  {:>5.1}%  {}\n",
            bucket.label(),
            count,
            s.percentage(bucket),
            bar
        ));
    }

    out
}
