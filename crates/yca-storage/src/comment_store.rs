//! Per-video comment files (`<video_id>.csv`, header `Username,Comment`)

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use yca_core::error::{Result, YcaError};
use yca_core::types::{Comment, VideoId};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";
const AUTHOR_COLUMN: &str = "Username";
const TEXT_COLUMN: &str = "Comment";
const UNKNOWN_AUTHOR: &str = "Unknown";

fn csv_error(e: csv::Error) -> YcaError {
    YcaError::Csv(e.to_string())
}

/// File system store for fetched comments, one file per video
pub struct CommentFileStore {
    /// Directory holding the comment files
    dir: PathBuf,
}

impl CommentFileStore {
    /// Create a store rooted at `dir`, creating it if needed
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        if !dir.exists() {
            fs::create_dir_all(&dir).map_err(|e| {
                YcaError::Io(std::io::Error::new(
                    e.kind(),
                    format!("Failed to create comments directory: {}", e),
                ))
            })?;
            debug!("Created comments directory: {:?}", dir);
        }
        Ok(Self { dir })
    }

    /// Directory holding the comment files
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the comment file for a video
    pub fn path_for(&self, video_id: &VideoId) -> PathBuf {
        self.dir.join(format!("{}.csv", video_id))
    }

    fn temp_path(&self, video_id: &VideoId) -> PathBuf {
        self.dir.join(format!(".{}.csv.tmp", video_id))
    }

    /// Whether comments for a video are stored
    pub fn exists(&self, video_id: &VideoId) -> bool {
        self.path_for(video_id).exists()
    }

    /// Write all comments for a video (write to temp, then rename)
    pub fn save(&self, video_id: &VideoId, comments: &[Comment]) -> Result<PathBuf> {
        let temp_path = self.temp_path(video_id);
        let final_path = self.path_for(video_id);

        {
            let mut writer = csv::Writer::from_path(&temp_path).map_err(csv_error)?;
            writer
                .write_record([AUTHOR_COLUMN, TEXT_COLUMN])
                .map_err(csv_error)?;
            for comment in comments {
                writer
                    .write_record([comment.author.as_str(), comment.text.as_str()])
                    .map_err(csv_error)?;
            }
            writer.flush()?;
        }

        fs::rename(&temp_path, &final_path).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            YcaError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to rename temp file: {}", e),
            ))
        })?;

        debug!("Saved {} comments for {} to {:?}", comments.len(), video_id, final_path);
        Ok(final_path)
    }

    /// Read the stored comments of a video
    pub fn load(&self, video_id: &VideoId) -> Result<Vec<Comment>> {
        read_comments(&self.path_for(video_id))
    }

    /// Delete every comment file except the one for `keep`; returns the number removed
    pub fn remove_others(&self, keep: &VideoId) -> Result<usize> {
        let keep_path = self.path_for(keep);
        let mut removed = 0;
        for path in self.csv_files()? {
            if path == keep_path {
                continue;
            }
            match fs::remove_file(&path) {
                Ok(()) => {
                    debug!("Removed stale comment file {:?}", path);
                    removed += 1;
                }
                Err(e) => warn!("Failed to remove {:?}: {}", path, e),
            }
        }
        Ok(removed)
    }

    fn csv_files(&self) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    warn!("Failed to read directory entry: {}", e);
                    continue;
                }
            };
            let path = entry.path();
            let is_csv = path.extension().map(|e| e == "csv").unwrap_or(false);
            let hidden = path
                .file_name()
                .and_then(|n| n.to_str())
                .map(|n| n.starts_with('.'))
                .unwrap_or(false);
            if is_csv && !hidden && path.is_file() {
                files.push(path);
            }
        }
        Ok(files)
    }
}

/// Read a `Username,Comment` file
///
/// A leading byte-order mark is ignored, fields are trimmed, and rows whose
/// comment is blank are dropped. Columns are located by header name.
pub fn read_comments(path: &Path) -> Result<Vec<Comment>> {
    let bytes = fs::read(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            YcaError::FileNotFound(path.to_path_buf())
        } else {
            YcaError::Io(e)
        }
    })?;
    parse_comments(&bytes).map_err(|e| e.with_context(format!("Failed to read {}", path.display())))
}

/// Parse `Username,Comment` data from memory
pub fn parse_comments(data: &[u8]) -> Result<Vec<Comment>> {
    let data = data.strip_prefix(UTF8_BOM).unwrap_or(data);
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(data);

    let headers = reader.headers().map_err(csv_error)?.clone();
    if headers.iter().all(str::is_empty) {
        debug!("Comment data has no header row");
        return Ok(Vec::new());
    }
    let text_idx = headers
        .iter()
        .position(|h| h == TEXT_COLUMN)
        .ok_or_else(|| YcaError::Csv(format!("missing '{}' column", TEXT_COLUMN)))?;
    let author_idx = headers.iter().position(|h| h == AUTHOR_COLUMN);

    let mut comments = Vec::new();
    let mut blank = 0usize;
    for record in reader.records() {
        let record = record.map_err(csv_error)?;
        let text = record.get(text_idx).unwrap_or_default().trim();
        if text.is_empty() {
            blank += 1;
            continue;
        }
        let author = author_idx
            .and_then(|i| record.get(i))
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .unwrap_or(UNKNOWN_AUTHOR);
        comments.push(Comment::new(author, text));
    }

    if blank > 0 {
        debug!("Skipped {} rows with blank comments", blank);
    }
    Ok(comments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn create_test_store() -> (CommentFileStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = CommentFileStore::new(temp_dir.path().join("comments")).unwrap();
        (store, temp_dir)
    }

    fn video(id: &str) -> VideoId {
        VideoId::parse(id).unwrap()
    }

    #[test]
    fn test_store_creation() {
        let (store, _temp) = create_test_store();
        assert!(store.dir().exists());
    }

    #[test]
    fn test_save_and_load() {
        let (store, _temp) = create_test_store();
        let id = video("dQw4w9WgXcQ");
        let comments = vec![
            Comment::new("alice", "I really enjoyed this deep dive"),
            Comment::new("bob", "terrible, waste of time"),
            Comment::new("carol", "line one\nline two with \"quotes\""),
        ];

        let path = store.save(&id, &comments).unwrap();
        assert!(path.ends_with("dQw4w9WgXcQ.csv"));
        assert!(!store.temp_path(&id).exists());

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("Username,Comment\n"));

        assert_eq!(store.load(&id).unwrap(), comments);
    }

    #[test]
    fn test_load_missing_file() {
        let (store, _temp) = create_test_store();
        let err = store.load(&video("dQw4w9WgXcQ")).unwrap_err();
        assert!(matches!(err, YcaError::FileNotFound(_)));
    }

    #[test]
    fn test_bom_and_padding_are_ignored() {
        let clean = parse_comments(b"Username,Comment\nalice,great stuff here\n").unwrap();
        let noisy =
            parse_comments(b"\xEF\xBB\xBFUsername,Comment\n  alice  ,   great stuff here   \n").unwrap();
        assert_eq!(clean, noisy);
        assert_eq!(clean[0], Comment::new("alice", "great stuff here"));
    }

    #[test]
    fn test_blank_comments_are_dropped() {
        let comments = parse_comments(b"Username,Comment\na,\nb,   \nc,kept\nd\n").unwrap();
        assert_eq!(comments, vec![Comment::new("c", "kept")]);
    }

    #[test]
    fn test_columns_located_by_header() {
        let comments = parse_comments(b"Comment,Username\nhello there friend,zed\n").unwrap();
        assert_eq!(comments, vec![Comment::new("zed", "hello there friend")]);

        let anonymous = parse_comments(b"Comment\nno author column\n").unwrap();
        assert_eq!(anonymous[0].author, "Unknown");
    }

    #[test]
    fn test_missing_comment_column() {
        let err = parse_comments(b"Username,Text\na,b\n").unwrap_err();
        assert!(matches!(err, YcaError::Csv(_)));
    }

    #[test]
    fn test_empty_file_has_no_comments() {
        assert!(parse_comments(b"Username,Comment\n").unwrap().is_empty());
        assert!(parse_comments(b"").unwrap().is_empty());
        assert!(parse_comments(b"\xEF\xBB\xBF").unwrap().is_empty());
    }

    #[test]
    fn test_read_zero_byte_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("empty.csv");
        fs::write(&path, b"").unwrap();
        assert!(read_comments(&path).unwrap().is_empty());
    }

    #[test]
    fn test_remove_others() {
        let (store, _temp) = create_test_store();
        let current = video("dQw4w9WgXcQ");
        let stale = video("aaaaaaaaaaa");
        store.save(&current, &[]).unwrap();
        store.save(&stale, &[]).unwrap();
        fs::write(store.dir().join("notes.txt"), "keep me").unwrap();

        let removed = store.remove_others(&current).unwrap();
        assert_eq!(removed, 1);
        assert!(store.exists(&current));
        assert!(!store.exists(&stale));
        assert!(store.dir().join("notes.txt").exists());
    }
}
