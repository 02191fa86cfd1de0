//! Lexicon command
//!
//! Install and inspect the sentiment lexicon.

use anyhow::Result;
use clap::Subcommand;

use yca_core::config::Config;
use yca_storage::LexiconStore;

/// Lexicon subcommands
#[derive(Debug, Subcommand)]
pub enum LexiconCommand {
    /// Install the bundled lexicon into the data directory
    Install {
        /// Overwrite an existing installation
        #[arg(long)]
        force: bool,
    },

    /// Show where the lexicon lives and whether it loads
    Status {
        /// Show as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the lexicon path
    Path,
}

/// Execute the lexicon command
pub fn execute(cmd: LexiconCommand, config: &Config) -> Result<()> {
    let store = LexiconStore::new(&config.lexicon);
    match cmd {
        LexiconCommand::Install { force } => install(&store, force),
        LexiconCommand::Status { json } => status(&store, json),
        LexiconCommand::Path => {
            println!("{}", store.path().display());
            Ok(())
        }
    }
}

fn install(store: &LexiconStore, force: bool) -> Result<()> {
    use colored::Colorize;

    if store.is_installed() && !force {
        println!(
            "{} Lexicon already installed at {} (use --force to reinstall)",
            "✓".green(),
            store.path().display()
        );
        return Ok(());
    }

    let path = store.install()?;
    println!("{} Lexicon installed to {}", "✓".green(), path.display());
    Ok(())
}

fn status(store: &LexiconStore, as_json: bool) -> Result<()> {
    use colored::Colorize;

    let status = store.status();
    if as_json {
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    println!("{}", "Sentiment lexicon:".bold().underline());
    println!("  Path:         {}", status.path.display());
    println!(
        "  Source:       {}",
        if status.managed { "bundled" } else { "user-supplied" }
    );
    match (status.installed, status.entries) {
        (true, Some(entries)) => println!("  State:        {} ({} entries)", "ok".green(), entries),
        (true, None) => println!("  State:        {}", "unreadable".red()),
        (false, _) if status.managed && status.auto_install => {
            println!("  State:        {}", "not installed (installs on first use)".yellow())
        }
        (false, _) => println!("  State:        {}", "missing".red()),
    }
    if let Some(ref fingerprint) = status.fingerprint {
        println!("  Fingerprint:  {}", fingerprint);
    }

    Ok(())
}
