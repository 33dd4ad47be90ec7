//! Buffer view: the text with a line number gutter, selection and cursor.

use super::palette::Palette;
use crate::document::TextBuffer;
use crate::editor::host::{CursorStyle, Editor};
use crate::editor::position::{Position, Range};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Width of the line number gutter, including one space of padding.
pub fn gutter_width(line_count: usize) -> usize {
    line_count.max(1).to_string().len().max(3) + 1
}

/// Renders the visible part of `buffer` into `area`.
///
/// The caller keeps the buffer's viewport height in sync with `area` so that
/// `scroll_top` already has the cursor in view.
pub fn render_buffer_view(
    f: &mut Frame,
    area: Rect,
    buffer: &TextBuffer,
    show_line_numbers: bool,
    colors: &Palette,
) {
    let selection = buffer.selection();
    let highlight = (!selection.is_collapsed()).then(|| selection.range());
    let cursor = buffer.cursor();
    let width = gutter_width(buffer.line_count());

    let text_style = Style::default().fg(colors.foreground).bg(colors.background);
    let selected_style = text_style.bg(colors.selection);
    let cursor_style = match buffer.cursor_style() {
        CursorStyle::Block => text_style.add_modifier(Modifier::REVERSED),
        CursorStyle::Line => text_style.add_modifier(Modifier::UNDERLINED),
    };

    let lines: Vec<Line> = (buffer.scroll_top()..buffer.line_count())
        .take(area.height as usize)
        .map(|line| {
            let mut spans = Vec::new();
            if show_line_numbers {
                spans.push(Span::styled(
                    format!("{:>w$} ", line + 1, w = width - 1),
                    Style::default().fg(colors.gutter),
                ));
            }

            let text = buffer.line_text(line);
            let chars: Vec<char> = text.chars().collect();
            // one extra cell so the cursor can sit past the last char
            for column in 0..=chars.len() {
                let pos = Position::new(line, column);
                let c = chars.get(column).copied().unwrap_or(' ');
                let style = if pos == cursor {
                    cursor_style
                } else if is_selected(highlight, pos, chars.len()) {
                    selected_style
                } else if column == chars.len() {
                    continue;
                } else {
                    text_style
                };
                spans.push(Span::styled(c.to_string(), style));
            }
            Line::from(spans)
        })
        .collect();

    let paragraph = Paragraph::new(lines).style(text_style);
    f.render_widget(paragraph, area);
}

/// The end-of-line cell counts as selected when the selection runs past it.
fn is_selected(highlight: Option<Range>, pos: Position, line_len: usize) -> bool {
    match highlight {
        Some(range) if pos.character == line_len => {
            range.start <= pos && pos < range.end && pos.line < range.end.line
        }
        Some(range) => range.contains(pos),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gutter_width() {
        assert_eq!(gutter_width(1), 4);
        assert_eq!(gutter_width(999), 4);
        assert_eq!(gutter_width(1000), 5);
    }

    #[test]
    fn test_selection_covers_line_break_only_inside() {
        let range = Range::new(Position::new(0, 1), Position::new(1, 2));
        assert!(is_selected(Some(range), Position::new(0, 3), 3));
        assert!(is_selected(Some(range), Position::new(1, 1), 5));
        assert!(!is_selected(Some(range), Position::new(1, 2), 5));
        assert!(!is_selected(None, Position::new(0, 1), 3));
    }
}
