//! Key handling
//!
//! Maps crossterm key events to app actions. The same key can mean different
//! things depending on which widget has focus: `1` picks a rating in the
//! selector but is just a character in the review box.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::Focus;
use crate::feedback::Rating;

/// Something the user asked the app to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    /// Cancel an edit, or quit when there is none
    Escape,
    FocusNext,
    FocusPrevious,
    SelectRating(Rating),
    RatingUp,
    RatingDown,
    InsertChar(char),
    DeleteChar,
    ClearText,
    Submit,
    SelectPrevious,
    SelectNext,
    EditSelected,
    DeleteSelected,
}

/// Translate a key press for the focused widget.
///
/// Returns `None` for key releases and for keys the focused widget ignores.
pub fn map_key(key: KeyEvent, focus: Focus) -> Option<Action> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    // Global keys first
    match key.code {
        KeyCode::Char('c') if ctrl => return Some(Action::Quit),
        KeyCode::Esc => return Some(Action::Escape),
        KeyCode::Tab => return Some(Action::FocusNext),
        KeyCode::BackTab => return Some(Action::FocusPrevious),
        _ => {}
    }

    match focus {
        Focus::Rating => match key.code {
            KeyCode::Left | KeyCode::Char('h') => Some(Action::RatingDown),
            KeyCode::Right | KeyCode::Char('l') => Some(Action::RatingUp),
            KeyCode::Char('0') => Rating::new(10).map(Action::SelectRating),
            KeyCode::Char(c @ '1'..='9') => c
                .to_digit(10)
                .and_then(|d| Rating::new(d as u8))
                .map(Action::SelectRating),
            KeyCode::Enter => Some(Action::Submit),
            _ => None,
        },
        Focus::Feedback => match key.code {
            KeyCode::Char('u') if ctrl => Some(Action::ClearText),
            KeyCode::Char(_) if ctrl => None,
            KeyCode::Char(c) => Some(Action::InsertChar(c)),
            KeyCode::Backspace => Some(Action::DeleteChar),
            KeyCode::Enter => Some(Action::Submit),
            _ => None,
        },
        Focus::List => match key.code {
            KeyCode::Up | KeyCode::Char('k') => Some(Action::SelectPrevious),
            KeyCode::Down | KeyCode::Char('j') => Some(Action::SelectNext),
            KeyCode::Enter | KeyCode::Char('e') => Some(Action::EditSelected),
            KeyCode::Delete | KeyCode::Char('d') => Some(Action::DeleteSelected),
            KeyCode::Char('q') => Some(Action::Quit),
            _ => None,
        },
    }
}
