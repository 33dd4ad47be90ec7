//! Status line widget for displaying editor state information.
//!
//! The status line shows:
//! - Current mode (NORMAL, INSERT, VISUAL, VISUAL LINE), or OFF while disabled
//! - Filename (or "[No Name]" if unsaved)
//! - Dirty indicator "[+]" for unsaved changes
//! - Keys typed towards a pending command
//! - Cursor position (line:col, 1-based)
//!
//! Example status line: ` NORMAL  notes.txt [+]  2d                 5:3`

use super::palette::Palette;
use crate::command::Interpreter;
use crate::document::TextBuffer;
use crate::editor::host::Editor;
use crate::editor::mode::EditorMode;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Text of the mode badge.
pub fn mode_badge(interpreter: &Interpreter) -> String {
    if interpreter.is_enabled() {
        format!(" {} ", interpreter.state().mode_label())
    } else {
        " OFF ".to_string()
    }
}

/// Left and right text of the status line, without the mode badge.
pub fn status_text(interpreter: &Interpreter, buffer: &TextBuffer) -> (String, String) {
    let filename = buffer
        .filename()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "[No Name]".to_string());
    let dirty_indicator = if buffer.is_dirty() { " [+]" } else { "" };
    let pending = interpreter.state().pending_keys();
    let pending = if pending.is_empty() {
        String::new()
    } else {
        format!("  {}", pending)
    };

    let left = format!(" {}{}{}", filename, dirty_indicator, pending);
    let right = format!("{} ", buffer.cursor());
    (left, right)
}

/// Renders the status line.
pub fn render_status_line(
    f: &mut Frame,
    area: Rect,
    interpreter: &Interpreter,
    buffer: &TextBuffer,
    colors: &Palette,
) {
    let badge = mode_badge(interpreter);
    let (left, right) = status_text(interpreter, buffer);

    let badge_color = match (interpreter.is_enabled(), interpreter.mode()) {
        (false, _) => colors.gutter,
        (true, EditorMode::Normal) => colors.mode_normal,
        (true, EditorMode::Insert) => colors.mode_insert,
        (true, EditorMode::Visual) => colors.mode_visual,
    };

    // Calculate padding to right-align the position
    let total_width = area.width as usize;
    let used = badge.chars().count() + left.chars().count() + right.chars().count();
    let padding = total_width.saturating_sub(used).max(1);

    let default_style = Style::default()
        .fg(colors.status_line_fg)
        .bg(colors.status_line_bg);
    let badge_style = Style::default()
        .fg(colors.status_line_bg)
        .bg(badge_color)
        .add_modifier(Modifier::BOLD);

    let spans = vec![
        Span::styled(badge, badge_style),
        Span::styled(left, default_style),
        Span::styled(" ".repeat(padding), default_style),
        Span::styled(right, default_style),
    ];

    let paragraph = Paragraph::new(Line::from(spans)).style(default_style);
    f.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn test_status_text_for_unnamed_clean_buffer() {
        let interp = Interpreter::new(Config::default());
        let buf = TextBuffer::from_text("abc");
        let (left, right) = status_text(&interp, &buf);
        assert_eq!(left, " [No Name]");
        assert_eq!(right, "1:1 ");
        assert_eq!(mode_badge(&interp), " NORMAL ");
    }

    #[test]
    fn test_status_text_shows_dirty_and_pending() {
        let mut interp = Interpreter::new(Config::default());
        let mut buf = TextBuffer::from_text("abc\ndef").with_filename("notes.txt");
        interp.handle_keystroke(Some(&mut buf), "jx2d");
        let (left, right) = status_text(&interp, &buf);
        assert_eq!(left, " notes.txt [+]  2d");
        assert_eq!(right, "2:1 ");
    }

    #[test]
    fn test_badge_when_disabled() {
        let mut interp = Interpreter::new(Config::default());
        interp.toggle_enabled(None);
        assert_eq!(mode_badge(&interp), " OFF ");
    }
}
