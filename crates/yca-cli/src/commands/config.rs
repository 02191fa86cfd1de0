//! Config command
//!
//! Manage yca configuration.

use anyhow::{bail, Context, Result};
use clap::Subcommand;
use std::fs;
use std::path::Path;

use yca_core::config::Config;

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show {
        /// Show as JSON
        #[arg(long)]
        json: bool,
    },

    /// Reset to default configuration
    Reset {
        /// Force reset without confirmation
        #[arg(long)]
        force: bool,
    },

    /// Validate configuration
    Validate,
}

/// Execute the config command
pub fn execute(cmd: ConfigCommand, config_path: &Path) -> Result<()> {
    match cmd {
        ConfigCommand::Show { json } => show_config(config_path, json),
        ConfigCommand::Reset { force } => reset_config(config_path, force),
        ConfigCommand::Validate => validate_config(config_path),
    }
}

fn show_config(config_path: &Path, as_json: bool) -> Result<()> {
    use colored::Colorize;

    let config = super::load_config(config_path)?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    println!("{}", "Configuration:".bold().underline());
    if config_path.exists() {
        println!("{}", config_path.display().to_string().dimmed());
    } else {
        println!(
            "{}",
            format!("defaults (no file at {})", config_path.display()).dimmed()
        );
    }
    println!();
    println!("{}", config.to_toml()?);

    Ok(())
}

fn reset_config(config_path: &Path, force: bool) -> Result<()> {
    use colored::Colorize;

    if !force {
        use dialoguer::Confirm;

        let confirmed = Confirm::new()
            .with_prompt("Reset configuration to defaults?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("Reset cancelled.");
            return Ok(());
        }
    }

    if config_path.exists() {
        let backup_path = format!(
            "{}.backup-{}",
            config_path.display(),
            chrono::Local::now().format("%Y%m%d-%H%M%S")
        );
        fs::copy(config_path, &backup_path)?;
        println!("{} Backed up to {}", "✓".green(), backup_path);
    }

    let content = format!("# yca configuration\n\n{}", Config::default().to_toml()?);
    if let Some(parent) = config_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(config_path, content)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;

    println!("{} Configuration reset to defaults.", "✓".green());

    Ok(())
}

fn validate_config(config_path: &Path) -> Result<()> {
    use colored::Colorize;

    if !config_path.exists() {
        println!(
            "{} No configuration at {}; defaults apply",
            "⚠".yellow(),
            config_path.display()
        );
        return Ok(());
    }

    let content = fs::read_to_string(config_path)?;

    match toml::from_str::<toml::Value>(&content) {
        Ok(raw) => {
            let known = ["classifier", "lexicon", "storage", "youtube"];
            if let Some(table) = raw.as_table() {
                for key in table.keys().filter(|k| !known.contains(&k.as_str())) {
                    println!("{} Unknown section [{}] is ignored", "⚠".yellow(), key);
                }
            }
        }
        Err(e) => bail!("Invalid TOML in {}: {}", config_path.display(), e),
    }

    match Config::from_toml(&content) {
        Ok(_) => {
            println!("{} Configuration is valid", "✓".green());
            Ok(())
        }
        Err(e) => bail!("Invalid configuration in {}: {}", config_path.display(), e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_reset_writes_loadable_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(".yca/config.toml");
        reset_config(&path, true).unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.classifier.max_off_topic_tokens, 2);
        assert!(fs::read_to_string(&path).unwrap().starts_with("# yca configuration"));
    }

    #[test]
    fn test_validate_rejects_bad_thresholds() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(
            &path,
            "[classifier]\npositive_threshold = -0.5\nnegative_threshold = 0.5\n",
        )
        .unwrap();
        assert!(validate_config(&path).is_err());
    }

    #[test]
    fn test_validate_missing_file_is_ok() {
        let temp = TempDir::new().unwrap();
        assert!(validate_config(&temp.path().join("absent.toml")).is_ok());
    }
}
