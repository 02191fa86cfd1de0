//! Valence lexicon used by the sentiment scorer
//!
//! The on-disk format is one entry per line: `token<TAB>mean_valence`, with
//! any further tab-separated columns (standard deviation, raw ratings)
//! ignored. Valences are on the usual -4..+4 scale.

use crate::error::{Result, YcaError};
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// The full VADER lexicon in the on-disk format, sorted by token
static BUNDLED: Lazy<String> = Lazy::new(|| {
    let mut entries: Vec<(&str, f64)> = vader_sentiment::LEXICON
        .iter()
        .map(|(token, valence)| (**token, *valence))
        .collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));
    entries
        .iter()
        .map(|(token, valence)| format!("{}\t{}\n", token, valence))
        .collect()
});

/// Lexicon text shipped inside the binary and installed on first use
pub fn bundled_lexicon() -> &'static str {
    &BUNDLED
}

/// File name of the installed lexicon
pub const LEXICON_FILE_NAME: &str = "vader_lexicon.txt";

/// Token → valence table, read-only once loaded
#[derive(Debug, Clone)]
pub struct Lexicon {
    entries: HashMap<String, f64>,
    fingerprint: String,
}

impl Lexicon {
    /// Parse lexicon text
    pub fn parse(content: &str) -> Result<Self> {
        let mut entries = HashMap::new();

        for (idx, raw) in content.lines().enumerate() {
            let line = raw.trim_end_matches('\r');
            if line.trim().is_empty() {
                continue;
            }

            let mut fields = line.split('\t');
            let token = fields.next().unwrap_or_default().trim();
            let valence = fields.next().ok_or_else(|| YcaError::LexiconParse {
                line: idx + 1,
                message: "missing valence column".to_string(),
            })?;

            if token.is_empty() {
                return Err(YcaError::LexiconParse {
                    line: idx + 1,
                    message: "empty token".to_string(),
                });
            }

            let valence: f64 = valence.trim().parse().map_err(|_| YcaError::LexiconParse {
                line: idx + 1,
                message: format!("invalid valence '{}'", valence.trim()),
            })?;

            entries.insert(token.to_lowercase(), valence);
        }

        if entries.is_empty() {
            return Err(YcaError::LexiconParse {
                line: 0,
                message: "lexicon has no entries".to_string(),
            });
        }

        let fingerprint = blake3::hash(content.as_bytes()).to_hex()[..16].to_string();
        Ok(Self { entries, fingerprint })
    }

    /// The lexicon compiled into the binary
    pub fn bundled() -> Result<Self> {
        Self::parse(bundled_lexicon())
    }

    /// Valence of a token (case-insensitive)
    pub fn valence(&self, token: &str) -> Option<f64> {
        self.entries
            .get(token)
            .or_else(|| self.entries.get(&token.to_lowercase()))
            .copied()
    }

    /// Whether a token is rated (case-insensitive)
    pub fn contains(&self, token: &str) -> bool {
        self.valence(token).is_some()
    }

    /// Number of rated tokens
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Short content hash identifying this lexicon in reports
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_extra_columns() {
        let lexicon = Lexicon::parse("great\t3.1\t0.7\t[3, 3, 4]\nbad\t-2.5\n").unwrap();
        assert_eq!(lexicon.len(), 2);
        assert_eq!(lexicon.valence("great"), Some(3.1));
        assert_eq!(lexicon.valence("BAD"), Some(-2.5));
        assert!(!lexicon.contains("video"));
    }

    #[test]
    fn test_parse_skips_blank_lines() {
        let lexicon = Lexicon::parse("\r\ngood\t1.9\r\n\n").unwrap();
        assert_eq!(lexicon.len(), 1);
    }

    #[test]
    fn test_parse_rejects_bad_valence() {
        let err = Lexicon::parse("good\t1.9\nbad\tterrible\n").unwrap_err();
        assert!(matches!(err, YcaError::LexiconParse { line: 2, .. }));
    }

    #[test]
    fn test_parse_rejects_missing_column() {
        let err = Lexicon::parse("good\n").unwrap_err();
        assert!(matches!(err, YcaError::LexiconParse { line: 1, .. }));
    }

    #[test]
    fn test_parse_rejects_empty() {
        assert!(Lexicon::parse("\n\n").is_err());
    }

    #[test]
    fn test_bundled_lexicon() {
        let lexicon = Lexicon::bundled().unwrap();
        assert!(lexicon.len() > 7000);
        assert_eq!(lexicon.valence("great"), Some(3.1));
        assert_eq!(lexicon.valence("good"), Some(1.9));
        assert_eq!(lexicon.valence("sux"), Some(-1.5));
        assert!(lexicon.valence("haha").unwrap() > 0.0);
        assert!(lexicon.valence("disagree").unwrap() < 0.0);
        assert!(lexicon.contains(":)"));
        assert_eq!(lexicon.fingerprint().len(), 16);
    }

    #[test]
    fn test_bundled_text_is_stable() {
        assert!(bundled_lexicon().lines().all(|l| l.split('\t').count() == 2));
        assert_eq!(
            Lexicon::bundled().unwrap().fingerprint(),
            Lexicon::parse(bundled_lexicon()).unwrap().fingerprint()
        );
    }

    #[test]
    fn test_fingerprint_tracks_content() {
        let a = Lexicon::parse("good\t1.9\n").unwrap();
        let b = Lexicon::parse("good\t2.0\n").unwrap();
        assert_ne!(a.fingerprint(), b.fingerprint());
    }
}
