//! yca-storage - Storage library for yca
//!
//! This crate stores fetched comments and the installed sentiment lexicon.

mod comment_store;
mod lexicon_store;

pub use comment_store::{parse_comments, read_comments, CommentFileStore};
pub use lexicon_store::{default_data_dir, LexiconStatus, LexiconStore};
