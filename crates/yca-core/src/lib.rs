//! yca-core - Core library for yca
//!
//! This crate provides the core logic of the YouTube Comment Analyzer:
//! relevance filtering, lexicon-based sentiment scoring, aggregation of
//! per-video results, and report export.

pub mod classify;
pub mod config;
pub mod error;
pub mod export;
pub mod report;
pub mod types;

pub use error::{Result, YcaError};
pub use types::*;
