//! Export functionality for analysis reports
//!
//! Supported formats:
//! - JSON (pretty-printed)
//! - Markdown (metrics table, bar chart and proportion breakdown)
//!
//! # Example
//!
//! ```ignore
//! use yca_core::export::ExportManager;
//!
//! let manager = ExportManager::new();
//! let json = manager.export(&report, "json")?;
//! let md = manager.export(&report, "markdown")?;
//! ```

mod exporter;
mod json;
mod markdown;

pub use exporter::{ExportManager, Exporter};
pub use json::{ExportData, ExportShares, ExportStats, JsonExporter};
pub use markdown::MarkdownExporter;
