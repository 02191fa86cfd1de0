//! Installed sentiment lexicon

use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use yca_core::classify::{bundled_lexicon, Lexicon, LEXICON_FILE_NAME};
use yca_core::config::LexiconConfig;
use yca_core::error::{Result, YcaError};

/// Default data directory for yca
pub fn default_data_dir() -> PathBuf {
    directories::ProjectDirs::from("com", "yca", "yca")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".yca")
        })
}

/// Where the lexicon lives and whether yca manages it
#[derive(Debug, Clone, Serialize)]
pub struct LexiconStatus {
    pub path: PathBuf,
    /// File is installed by yca (as opposed to a user-supplied path)
    pub managed: bool,
    pub installed: bool,
    pub auto_install: bool,
    /// Entry count, when the file parses
    pub entries: Option<usize>,
    /// Content fingerprint, when the file parses
    pub fingerprint: Option<String>,
}

/// Resolves, installs and loads the sentiment lexicon
#[derive(Debug, Clone)]
pub struct LexiconStore {
    path: PathBuf,
    managed: bool,
    auto_install: bool,
}

impl LexiconStore {
    /// Resolve the lexicon location from configuration
    pub fn new(config: &LexiconConfig) -> Self {
        match config.path {
            Some(ref path) => Self {
                path: path.clone(),
                managed: false,
                auto_install: false,
            },
            None => {
                let dir = config
                    .data_dir
                    .clone()
                    .unwrap_or_else(|| default_data_dir().join("lexicon"));
                Self {
                    path: dir.join(LEXICON_FILE_NAME),
                    managed: true,
                    auto_install: config.auto_install,
                }
            }
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_managed(&self) -> bool {
        self.managed
    }

    pub fn is_installed(&self) -> bool {
        self.path.is_file()
    }

    /// Write the bundled lexicon to the managed location
    pub fn install(&self) -> Result<PathBuf> {
        if !self.managed {
            return Err(YcaError::Config(format!(
                "lexicon path {} is user-supplied; yca will not overwrite it",
                self.path.display()
            )));
        }

        let unavailable = |e: std::io::Error| YcaError::LexiconUnavailable {
            path: self.path.clone(),
            reason: format!("install failed: {}", e),
        };

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(unavailable)?;
        }
        let temp_path = self.path.with_extension("txt.tmp");
        fs::write(&temp_path, bundled_lexicon()).map_err(unavailable)?;
        fs::rename(&temp_path, &self.path).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            unavailable(e)
        })?;

        info!("Installed sentiment lexicon to {:?}", self.path);
        Ok(self.path.clone())
    }

    /// Install the lexicon if it is missing and installation is allowed
    pub fn ensure_installed(&self) -> Result<()> {
        if self.is_installed() {
            return Ok(());
        }
        if !self.managed {
            return Err(YcaError::LexiconUnavailable {
                path: self.path.clone(),
                reason: "file does not exist".to_string(),
            });
        }
        if !self.auto_install {
            return Err(YcaError::LexiconUnavailable {
                path: self.path.clone(),
                reason: "not installed and auto_install is disabled (run `yca lexicon install`)"
                    .to_string(),
            });
        }
        debug!("Lexicon missing at {:?}; installing", self.path);
        self.install().map(|_| ())
    }

    /// Load the lexicon, installing it first when allowed
    pub fn load(&self) -> Result<Lexicon> {
        self.ensure_installed()?;
        let content = fs::read_to_string(&self.path).map_err(|e| YcaError::LexiconUnavailable {
            path: self.path.clone(),
            reason: e.to_string(),
        })?;
        Lexicon::parse(&content)
            .map_err(|e| e.with_context(format!("Failed to load {}", self.path.display())))
    }

    /// Loader closure for a lazily initialised scorer
    pub fn loader(self) -> impl Fn() -> Result<Lexicon> + Send + Sync + 'static {
        move || self.load()
    }

    /// Inspect the lexicon without installing it
    pub fn status(&self) -> LexiconStatus {
        let parsed = fs::read_to_string(&self.path)
            .ok()
            .and_then(|content| Lexicon::parse(&content).ok());
        LexiconStatus {
            path: self.path.clone(),
            managed: self.managed,
            installed: self.is_installed(),
            auto_install: self.auto_install,
            entries: parsed.as_ref().map(Lexicon::len),
            fingerprint: parsed.map(|l| l.fingerprint().to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;
    use yca_core::classify::LazyScorer;

    fn managed(temp: &TempDir, auto_install: bool) -> LexiconStore {
        LexiconStore::new(&LexiconConfig {
            path: None,
            data_dir: Some(temp.path().join("data")),
            auto_install,
        })
    }

    #[test]
    fn test_auto_install_on_first_load() {
        let temp = TempDir::new().unwrap();
        let store = managed(&temp, true);
        assert!(!store.is_installed());

        let lexicon = store.load().unwrap();
        assert!(store.is_installed());
        assert_eq!(lexicon.fingerprint(), Lexicon::bundled().unwrap().fingerprint());
        assert_eq!(fs::read_to_string(store.path()).unwrap(), bundled_lexicon());
    }

    #[test]
    fn test_missing_without_auto_install() {
        let temp = TempDir::new().unwrap();
        let store = managed(&temp, false);
        let err = store.load().unwrap_err();
        assert!(err.is_setup_failure());
        assert!(!store.is_installed());

        store.install().unwrap();
        assert!(store.load().is_ok());
    }

    #[test]
    fn test_explicit_path_is_never_installed() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("custom.txt");
        let store = LexiconStore::new(&LexiconConfig {
            path: Some(path.clone()),
            data_dir: None,
            auto_install: true,
        });

        assert!(!store.is_managed());
        assert!(store.load().unwrap_err().is_setup_failure());
        assert!(matches!(store.install(), Err(YcaError::Config(_))));
        assert!(!path.exists());
    }

    #[test]
    fn test_explicit_path_is_loaded() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("custom.txt");
        fs::write(&path, "splendid\t2.8\nawful\t-2.0\n").unwrap();
        let store = LexiconStore::new(&LexiconConfig {
            path: Some(path),
            ..Default::default()
        });

        let lexicon = store.load().unwrap();
        assert_eq!(lexicon.len(), 2);
        assert_eq!(lexicon.valence("splendid"), Some(2.8));
    }

    #[test]
    fn test_corrupt_lexicon_is_setup_failure() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("broken.txt");
        fs::write(&path, "good\tnot-a-number\n").unwrap();
        let store = LexiconStore::new(&LexiconConfig {
            path: Some(path),
            ..Default::default()
        });
        assert!(store.load().unwrap_err().is_setup_failure());
    }

    #[test]
    fn test_status() {
        let temp = TempDir::new().unwrap();
        let store = managed(&temp, true);

        let before = store.status();
        assert!(before.managed);
        assert!(!before.installed);
        assert!(before.entries.is_none());

        store.install().unwrap();
        let after = store.status();
        assert!(after.installed);
        assert_eq!(after.entries, Some(Lexicon::bundled().unwrap().len()));
    }

    #[test]
    fn test_loader_feeds_lazy_scorer() {
        let temp = TempDir::new().unwrap();
        let store = managed(&temp, true);
        let path = store.path().to_path_buf();
        let scorer = LazyScorer::new(store.loader());

        assert!(!path.exists());
        assert!(scorer.get().is_ok());
        assert!(path.exists());
    }
}
