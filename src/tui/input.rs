//! Keyboard input decoding.
//!
//! Maps crossterm key events onto selector [`Event`]s.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::{Event, Focus};
use crate::App;

/// Decode a key event for the given focus.
///
/// Returns `None` for keys the selector ignores.
pub fn map_key(key: KeyEvent, focus: Focus) -> Option<Event> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Event::Cancel),
            KeyCode::Char('l') => Some(Event::Reset),
            KeyCode::Char('u') => Some(Event::ClearQuery),
            KeyCode::Char('p') => Some(Event::Up),
            KeyCode::Char('n') => Some(Event::Down),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Esc => Some(Event::Cancel),
        KeyCode::Enter => Some(Event::Confirm),
        KeyCode::Tab => Some(Event::CycleFocus),
        KeyCode::Up => Some(Event::Up),
        KeyCode::Down => Some(Event::Down),
        KeyCode::Backspace => Some(Event::Backspace),
        KeyCode::Char(' ') if focus == Focus::Locations => Some(Event::Toggle),
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::ALT) => Some(Event::Char(c)),
        _ => None,
    }
}

/// Decode a key event and apply it to the selector.
pub fn handle_events(key: KeyEvent, app: &mut App) {
    if let Some(event) = map_key(key, app.focus) {
        app.handle(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    #[test]
    fn test_control_keys() {
        assert_eq!(map_key(ctrl('c'), Focus::Results), Some(Event::Cancel));
        assert_eq!(map_key(ctrl('l'), Focus::Search), Some(Event::Reset));
        assert_eq!(map_key(ctrl('u'), Focus::Search), Some(Event::ClearQuery));
        assert_eq!(map_key(ctrl('z'), Focus::Search), None);
    }

    #[test]
    fn test_navigation_keys() {
        assert_eq!(map_key(key(KeyCode::Esc), Focus::Locations), Some(Event::Cancel));
        assert_eq!(map_key(key(KeyCode::Enter), Focus::Search), Some(Event::Confirm));
        assert_eq!(map_key(key(KeyCode::Tab), Focus::Search), Some(Event::CycleFocus));
        assert_eq!(map_key(key(KeyCode::Up), Focus::Results), Some(Event::Up));
        assert_eq!(map_key(key(KeyCode::Down), Focus::Results), Some(Event::Down));
    }

    #[test]
    fn test_space_depends_on_focus() {
        assert_eq!(map_key(key(KeyCode::Char(' ')), Focus::Locations), Some(Event::Toggle));
        assert_eq!(map_key(key(KeyCode::Char(' ')), Focus::Search), Some(Event::Char(' ')));
    }

    #[test]
    fn test_shifted_characters_are_text() {
        let key = KeyEvent::new(KeyCode::Char('B'), KeyModifiers::SHIFT);
        assert_eq!(map_key(key, Focus::Search), Some(Event::Char('B')));
    }

    #[test]
    fn test_release_events_are_ignored() {
        let mut release = key(KeyCode::Enter);
        release.kind = KeyEventKind::Release;
        assert_eq!(map_key(release, Focus::Search), None);
    }
}
