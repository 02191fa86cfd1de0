//! Dashboard state

use crate::events::Action;

/// Dashboard mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppMode {
    /// Metrics and charts
    #[default]
    Dashboard,
    /// Key binding overlay
    Help,
}

/// Dashboard state
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub mode: AppMode,
    /// Status message replacing the default status line
    pub message: Option<String>,
    pub should_quit: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show a message in the status bar until the next key press
    pub fn set_message(&mut self, msg: impl Into<String>) {
        self.message = Some(msg.into());
    }

    pub fn clear_message(&mut self) {
        self.message = None;
    }

    /// Apply an action produced by a key press
    pub fn apply(&mut self, action: Action) {
        if action != Action::None {
            self.clear_message();
        }
        match action {
            Action::Quit => self.should_quit = true,
            Action::ToggleHelp => {
                self.mode = match self.mode {
                    AppMode::Dashboard => AppMode::Help,
                    AppMode::Help => AppMode::Dashboard,
                }
            }
            Action::CloseHelp => self.mode = AppMode::Dashboard,
            Action::None => {}
        }
    }
}
