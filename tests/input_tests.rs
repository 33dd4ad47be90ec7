use keyquill::command::Interpreter;
use keyquill::config::Config;
use keyquill::document::TextBuffer;
use keyquill::editor::mode::EditorMode;
use keyquill::input::keys::{map_key_event, InputEvent};
use keyquill::input::script::{parse_key_script, run_key_script, ScriptStep};
use termion::event::{Event, Key, MouseButton, MouseEvent};

#[test]
fn test_page_and_line_keys() {
    let cases = [
        (Key::Home, "s"),
        (Key::End, "e"),
        (Key::PageDown, "D"),
        (Key::PageUp, "U"),
    ];
    for (key, expected) in cases {
        assert_eq!(
            map_key_event(Event::Key(key), &EditorMode::Normal),
            InputEvent::Keystroke(expected.to_string())
        );
    }
}

#[test]
fn test_save_and_toggle_chords() {
    assert_eq!(
        map_key_event(Event::Key(Key::Ctrl('s')), &EditorMode::Insert),
        InputEvent::Save
    );
    assert_eq!(
        map_key_event(Event::Key(Key::Ctrl('t')), &EditorMode::Visual),
        InputEvent::ToggleEnabled
    );
}

#[test]
fn test_mouse_events_are_unknown() {
    let event = Event::Mouse(MouseEvent::Press(MouseButton::Left, 1, 1));
    assert_eq!(map_key_event(event, &EditorMode::Normal), InputEvent::Unknown);
}

#[test]
fn test_script_escapes() {
    assert_eq!(
        parse_key_script("<esc><Esc>"),
        vec![ScriptStep::Escape, ScriptStep::Escape]
    );
    assert_eq!(parse_key_script(""), Vec::<ScriptStep>::new());
}

#[test]
fn test_script_drives_interpreter() {
    let mut interp = Interpreter::new(Config::default());
    let mut buf = TextBuffer::from_text("one\ntwo");
    run_key_script(&mut interp, &mut buf, "Otop<cr>more<esc>jdd");
    assert_eq!(buf.text(), "top\nmore\ntwo");
    assert_eq!(interp.mode(), EditorMode::Normal);
}

#[test]
fn test_script_escape_abandons_pending_command() {
    let mut interp = Interpreter::new(Config::default());
    let mut buf = TextBuffer::from_text("abc");
    run_key_script(&mut interp, &mut buf, "d<esc>x");
    assert_eq!(buf.text(), "bc");
}
