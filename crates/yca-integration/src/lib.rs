//! yca-integration - Video platform integration library for yca
//!
//! This crate fetches comments and video metadata from YouTube.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use yca_integration::{PlatformAdapter, YouTubeAdapter};
//!
//! let adapter = YouTubeAdapter::new(&config.youtube)?;
//! let comments = adapter.fetch_comments(&video_id)?;
//! ```

pub mod adapter;
pub mod models;

pub use adapter::youtube::YouTubeAdapter;
pub use adapter::{PlatformAdapter, VideoDetails};
pub use models::flatten_threads;
