//! CLI commands module
//!
//! This module contains all CLI command implementations.

pub mod analyze;
pub mod config;
pub mod fetch;
pub mod lexicon;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use yca_core::classify::{Classifier, LazyScorer, SentimentAnalyzer};
use yca_core::config::{Config, DEFAULT_CONFIG_PATH};
use yca_storage::LexiconStore;

/// yca - YouTube Comment Analyzer
#[derive(Debug, Parser)]
#[command(name = "yca")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true, env = "YCA_CONFIG")]
    pub config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Classify comments from a file or a video
    Analyze(analyze::AnalyzeArgs),

    /// Fetch all comments of a video into the comment store
    Fetch(fetch::FetchArgs),

    /// Manage the sentiment lexicon
    #[command(subcommand)]
    Lexicon(lexicon::LexiconCommand),

    /// Manage configuration
    #[command(subcommand)]
    Config(config::ConfigCommand),
}

/// Run the CLI application
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose);

    if cli.no_color {
        colored::control::set_override(false);
    }

    let config_path = cli
        .config
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));

    match cli.command {
        Commands::Analyze(args) => analyze::execute(args, &load_config(&config_path)?),
        Commands::Fetch(args) => fetch::execute(args, &load_config(&config_path)?),
        Commands::Lexicon(cmd) => lexicon::execute(cmd, &load_config(&config_path)?),
        Commands::Config(cmd) => config::execute(cmd, &config_path),
    }
}

/// Load configuration, using defaults when the file does not exist
pub fn load_config(path: &Path) -> Result<Config> {
    Config::load(path).with_context(|| format!("Failed to load configuration from {}", path.display()))
}

/// Analyzer whose lexicon is resolved from configuration on first use
pub fn build_analyzer(config: &Config) -> SentimentAnalyzer {
    let store = LexiconStore::new(&config.lexicon);
    SentimentAnalyzer::new(
        Classifier::new(&config.classifier),
        LazyScorer::new(store.loader()),
    )
}

fn setup_logging(verbosity: u8) {
    use tracing_subscriber::EnvFilter;

    let filter = match verbosity {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
