//! Fetch command
//!
//! Download all comments of a video into the comment store.

use anyhow::{Context, Result};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use yca_core::config::Config;
use yca_core::types::{Comment, VideoId};
use yca_integration::{PlatformAdapter, VideoDetails, YouTubeAdapter};
use yca_storage::CommentFileStore;

use super::analyze::{build_report, render_text};
use super::build_analyzer;

/// Arguments for the fetch command
#[derive(Debug, Args)]
pub struct FetchArgs {
    /// Video link or id
    pub video: String,

    /// Analyze the comments after fetching
    #[arg(long)]
    pub analyze: bool,

    /// Keep comment files of other videos
    #[arg(long)]
    pub keep_others: bool,
}

/// Execute the fetch command
pub fn execute(args: FetchArgs, config: &Config) -> Result<()> {
    let id = VideoId::parse(&args.video)?;
    let adapter = YouTubeAdapter::new(&config.youtube)?;
    let store = CommentFileStore::new(&config.storage.comments_dir)?;

    let mut config = config.clone();
    if args.keep_others {
        config.storage.keep_only_current = false;
    }

    let comments = fetch_and_store(&adapter, &store, &id, &config)?;
    let details = adapter.video_details(&id);
    print_details(&details);

    if args.analyze {
        let analyzer = build_analyzer(&config);
        let report = build_report(&analyzer, &comments, Some(id), details)?;
        println!();
        print!("{}", render_text(&report));
    }

    Ok(())
}

/// Fetch comments with a spinner, save them, and prune stale files if configured
pub fn fetch_and_store(
    adapter: &dyn PlatformAdapter,
    store: &CommentFileStore,
    id: &VideoId,
    config: &Config,
) -> Result<Vec<Comment>> {
    use colored::Colorize;

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.set_message(format!("Fetching comments for {}...", id));
    pb.enable_steady_tick(Duration::from_millis(100));

    let comments = match adapter.fetch_comments(id) {
        Ok(comments) => {
            pb.finish_with_message(format!("Fetched {} comments", comments.len()));
            comments
        }
        Err(e) => {
            pb.abandon_with_message("Fetch failed");
            return Err(e).context(format!("Failed to fetch comments for {}", id));
        }
    };

    let path = store.save(id, &comments)?;
    eprintln!("{} Saved to {}", "✓".green(), path.display());

    if config.storage.keep_only_current {
        let removed = store.remove_others(id)?;
        if removed > 0 {
            eprintln!("Removed {} stale comment file(s)", removed);
        }
    }

    Ok(comments)
}

fn print_details(details: &VideoDetails) {
    use colored::Colorize;

    let na = "N/A";
    if let Some(ref channel) = details.channel {
        eprintln!();
        eprintln!("{}", "Channel".bold().underline());
        eprintln!("  Title:        {}", channel.title.as_deref().unwrap_or(na));
        eprintln!("  Subscribers:  {}", channel.subscriber_count.as_deref().unwrap_or(na));
        eprintln!("  Total Videos: {}", channel.video_count.as_deref().unwrap_or(na));
        eprintln!("  Created On:   {}", channel.created_date().unwrap_or(na));
        if let Some(ref logo) = channel.logo_url {
            eprintln!("  Logo:         {}", logo.dimmed());
        }
    }
    if let Some(ref stats) = details.stats {
        eprintln!();
        eprintln!("{}", "Video".bold().underline());
        eprintln!("  Views:        {}", stats.view_count.as_deref().unwrap_or(na));
        eprintln!("  Likes:        {}", stats.like_count.as_deref().unwrap_or(na));
        eprintln!("  Comments:     {}", stats.comment_count.as_deref().unwrap_or(na));
    }
}
