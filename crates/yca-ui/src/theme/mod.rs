//! Theme system

use ratatui::prelude::*;
use yca_core::classify::Sentiment;

/// Dashboard theme
#[derive(Debug, Clone)]
pub struct Theme {
    /// Border color of panels
    pub border: Color,
    /// Title bar background
    pub title_bg: Color,
    /// Status bar background
    pub status_bg: Color,
    /// Section headings inside panels
    pub heading: Color,
    /// Secondary text
    pub muted: Color,
    pub positive: Color,
    pub negative: Color,
    pub irrelevant: Color,
}

impl Theme {
    /// Color used for a sentiment bucket
    pub fn sentiment(&self, sentiment: Sentiment) -> Color {
        match sentiment {
            Sentiment::Positive => self.positive,
            Sentiment::Negative => self.negative,
            Sentiment::Irrelevant => self.irrelevant,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            border: Color::Cyan,
            title_bg: Color::Blue,
            status_bg: Color::DarkGray,
            heading: Color::Yellow,
            muted: Color::DarkGray,
            positive: Color::Green,
            negative: Color::Red,
            irrelevant: Color::Gray,
        }
    }
}
