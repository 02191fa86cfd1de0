//! Key handling

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::AppMode;

/// What a key press asks the dashboard to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    ToggleHelp,
    CloseHelp,
    None,
}

/// Map a key press to an action for the current mode
pub fn action_for(key: KeyEvent, mode: AppMode) -> Action {
    if key.kind != KeyEventKind::Press {
        return Action::None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Action::Quit;
    }

    match mode {
        AppMode::Dashboard => match key.code {
            KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
            KeyCode::Char('?') => Action::ToggleHelp,
            _ => Action::None,
        },
        AppMode::Help => match key.code {
            KeyCode::Char('q') => Action::Quit,
            KeyCode::Char('?') => Action::ToggleHelp,
            _ => Action::CloseHelp,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_dashboard_keys() {
        assert_eq!(action_for(key(KeyCode::Char('q')), AppMode::Dashboard), Action::Quit);
        assert_eq!(action_for(key(KeyCode::Esc), AppMode::Dashboard), Action::Quit);
        assert_eq!(action_for(key(KeyCode::Char('?')), AppMode::Dashboard), Action::ToggleHelp);
        assert_eq!(action_for(key(KeyCode::Char('x')), AppMode::Dashboard), Action::None);
    }

    #[test]
    fn test_help_keys() {
        assert_eq!(action_for(key(KeyCode::Esc), AppMode::Help), Action::CloseHelp);
        assert_eq!(action_for(key(KeyCode::Char('?')), AppMode::Help), Action::ToggleHelp);
        assert_eq!(action_for(key(KeyCode::Char('q')), AppMode::Help), Action::Quit);
    }

    #[test]
    fn test_ctrl_c_quits() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(action_for(ctrl_c, AppMode::Help), Action::Quit);
    }
}
