//! Dashboard application

mod render;
pub mod state;

pub use render::render_dashboard;
pub use state::{AppMode, AppState};

use anyhow::Result;
use crossterm::{
    event, execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use std::io::{self, Stdout};
use std::time::Duration;
use tracing::debug;
use yca_core::report::AnalysisReport;

use crate::events::action_for;
use crate::theme::Theme;

/// Interactive dashboard over one analysis report
pub struct Dashboard {
    pub state: AppState,
    report: AnalysisReport,
    theme: Theme,
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl Dashboard {
    /// Take over the terminal and prepare the dashboard
    pub fn new(report: AnalysisReport) -> Result<Self> {
        // Restore the terminal on panic
        let original_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
            original_hook(panic_info);
        }));

        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;

        Ok(Self {
            state: AppState::new(),
            report,
            theme: Theme::default(),
            terminal,
        })
    }

    /// Run until the user quits
    pub fn run(&mut self) -> Result<()> {
        loop {
            self.draw()?;

            if event::poll(Duration::from_millis(100))? {
                if let event::Event::Key(key) = event::read()? {
                    let action = action_for(key, self.state.mode);
                    debug!("Key {:?} -> {:?}", key.code, action);
                    self.state.apply(action);
                }
            }

            if self.state.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn draw(&mut self) -> Result<()> {
        let state = &self.state;
        let report = &self.report;
        let theme = &self.theme;
        self.terminal
            .draw(|frame| render_dashboard(frame, report, state, theme))?;
        Ok(())
    }
}

impl Drop for Dashboard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}
