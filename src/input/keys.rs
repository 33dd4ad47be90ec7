//! Keyboard event mapping and input event types.

use crate::editor::mode::EditorMode;
use termion::event::{Event, Key};

/// High-level input events abstracted from raw keyboard input.
///
/// Anything the modal interpreter understands is passed through as a
/// `Keystroke`; the remaining variants are front-end actions that bypass it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// Text to feed to the interpreter
    Keystroke(String),
    /// Abandon the pending command and return to normal mode
    Escape,
    /// Delete the char before the cursor (insert mode)
    Backspace,
    /// Write the buffer to its file (Ctrl-s)
    Save,
    /// Switch modal interpretation off or on (Ctrl-t)
    ToggleEnabled,
    /// User wants to quit the editor (Ctrl-q)
    Quit,
    /// Unknown or unmapped key
    Unknown,
}

/// Maps a termion Event to an InputEvent based on the current editor mode.
///
/// Control chords are handled the same way in every mode. Arrow keys move
/// the cursor in normal and visual mode by standing in for `h j k l`.
///
/// # Example
///
/// ```
/// use termion::event::{Event, Key};
/// use keyquill::editor::mode::EditorMode;
/// use keyquill::input::keys::{map_key_event, InputEvent};
///
/// let event = Event::Key(Key::Down);
/// let input_event = map_key_event(event, &EditorMode::Normal);
/// assert_eq!(input_event, InputEvent::Keystroke("j".to_string()));
/// ```
pub fn map_key_event(event: Event, mode: &EditorMode) -> InputEvent {
    let key = match event {
        Event::Key(k) => k,
        _ => return InputEvent::Unknown,
    };

    match key {
        Key::Ctrl('q') => return InputEvent::Quit,
        Key::Ctrl('s') => return InputEvent::Save,
        Key::Ctrl('t') => return InputEvent::ToggleEnabled,
        Key::Esc => return InputEvent::Escape,
        Key::Char(c) => return InputEvent::Keystroke(c.to_string()),
        _ => {}
    }

    match mode {
        EditorMode::Insert => match key {
            Key::Backspace => InputEvent::Backspace,
            _ => InputEvent::Unknown,
        },
        EditorMode::Normal | EditorMode::Visual => match key {
            Key::Left => InputEvent::Keystroke("h".to_string()),
            Key::Down => InputEvent::Keystroke("j".to_string()),
            Key::Up => InputEvent::Keystroke("k".to_string()),
            Key::Right => InputEvent::Keystroke("l".to_string()),
            Key::Home => InputEvent::Keystroke("s".to_string()),
            Key::End => InputEvent::Keystroke("e".to_string()),
            Key::PageDown => InputEvent::Keystroke("D".to_string()),
            Key::PageUp => InputEvent::Keystroke("U".to_string()),
            _ => InputEvent::Unknown,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quit_in_every_mode() {
        for mode in [EditorMode::Normal, EditorMode::Insert, EditorMode::Visual] {
            assert_eq!(
                map_key_event(Event::Key(Key::Ctrl('q')), &mode),
                InputEvent::Quit
            );
        }
    }

    #[test]
    fn test_chars_pass_through() {
        assert_eq!(
            map_key_event(Event::Key(Key::Char('d')), &EditorMode::Normal),
            InputEvent::Keystroke("d".to_string())
        );
        assert_eq!(
            map_key_event(Event::Key(Key::Char('\n')), &EditorMode::Insert),
            InputEvent::Keystroke("\n".to_string())
        );
    }

    #[test]
    fn test_arrow_keys_map_to_motions() {
        assert_eq!(
            map_key_event(Event::Key(Key::Up), &EditorMode::Visual),
            InputEvent::Keystroke("k".to_string())
        );
        assert_eq!(
            map_key_event(Event::Key(Key::Up), &EditorMode::Insert),
            InputEvent::Unknown
        );
    }

    #[test]
    fn test_backspace_only_in_insert_mode() {
        assert_eq!(
            map_key_event(Event::Key(Key::Backspace), &EditorMode::Insert),
            InputEvent::Backspace
        );
        assert_eq!(
            map_key_event(Event::Key(Key::Backspace), &EditorMode::Normal),
            InputEvent::Unknown
        );
    }

    #[test]
    fn test_escape() {
        assert_eq!(
            map_key_event(Event::Key(Key::Esc), &EditorMode::Insert),
            InputEvent::Escape
        );
    }
}
