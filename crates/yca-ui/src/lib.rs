//! yca-ui - TUI library for yca
//!
//! This crate provides the terminal dashboard for an analysis report.
//!
//! # Overview
//!
//! The dashboard shows:
//! - Four metric cards (total, positive, negative, irrelevant)
//! - A bar chart over the three buckets
//! - Per-bucket gauges with percentage labels
//! - Channel details and video stats when the comments were fetched
//!
//! # Example
//!
//! ```ignore
//! use yca_ui::Dashboard;
//!
//! let mut dashboard = Dashboard::new(report)?;
//! dashboard.run()?;
//! ```

pub mod app;
pub mod events;
pub mod theme;

pub use app::{render_dashboard, AppMode, AppState, Dashboard};
pub use theme::Theme;
