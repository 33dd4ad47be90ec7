//! The host editor capability set the interpreter drives.
//!
//! The interpreter never owns text. Everything it knows about the buffer comes
//! through the [`Editor`] trait: cursor and selection, line text, batched text
//! edits, viewport reveals, named host commands and the clipboard. Calls are
//! synchronous, so an edit has landed by the time the next read happens.
//!
//! [`crate::document::TextBuffer`] is the in-memory implementation used by the
//! terminal front-end and the tests.

use super::position::{Position, Range, Selection};
use anyhow::Result;

/// A single text change, expressed in buffer positions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextEdit {
    Insert { at: Position, text: String },
    Delete { range: Range },
    Replace { range: Range, text: String },
}

/// Cursor shape shown by the host.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CursorStyle {
    /// NORMAL and VISUAL mode
    #[default]
    Block,
    /// INSERT mode
    Line,
}

/// The editing surface behind the interpreter.
///
/// `edit` applies its operations in order; each later operation sees the
/// buffer as left by the earlier ones.
pub trait Editor {
    fn selection(&self) -> Selection;

    fn set_selection(&mut self, selection: Selection);

    /// Text of `line` without its terminator; empty for lines past the end.
    fn line_text(&self, line: usize) -> String;

    fn line_count(&self) -> usize;

    fn edit(&mut self, edits: &[TextEdit]) -> Result<()>;

    /// Scrolls the viewport so `pos` is visible.
    fn reveal_position(&mut self, pos: Position);

    fn run_named_command(&mut self, name: &str, args: &[String]) -> Result<()>;

    fn read_clipboard(&mut self) -> Option<String>;

    fn write_clipboard(&mut self, text: &str);

    fn set_cursor_style(&mut self, style: CursorStyle);

    /// Starts merging edits into a single undo step. Hosts without grouped
    /// undo can ignore it.
    fn begin_undo_group(&mut self) {}

    /// Closes the group opened by [`Editor::begin_undo_group`].
    fn end_undo_group(&mut self) {}

    /// The active end of the selection.
    fn cursor(&self) -> Position {
        self.selection().active
    }

    fn set_cursor(&mut self, pos: Position) {
        self.set_selection(Selection::caret(pos));
    }
}

/// Length of `line` in chars.
pub fn line_len(editor: &dyn Editor, line: usize) -> usize {
    editor.line_text(line).chars().count()
}

/// Index of the last line, `0` for an empty buffer.
pub fn last_line(editor: &dyn Editor) -> usize {
    editor.line_count().saturating_sub(1)
}

/// Clamps `pos` into the buffer.
pub fn clamp(editor: &dyn Editor, pos: Position) -> Position {
    let line = pos.line.min(last_line(editor));
    Position::new(line, pos.character.min(line_len(editor, line)))
}

/// Start of `line`.
pub fn line_start(line: usize) -> Position {
    Position::new(line, 0)
}

/// End of `line` (before its terminator).
pub fn line_end(editor: &dyn Editor, line: usize) -> Position {
    Position::new(line, line_len(editor, line))
}

/// The text covered by `range`, lines joined with `\n`.
pub fn text_in_range(editor: &dyn Editor, range: Range) -> String {
    let start = clamp(editor, range.start);
    let end = clamp(editor, range.end);
    if start.line == end.line {
        return editor
            .line_text(start.line)
            .chars()
            .skip(start.character)
            .take(end.character.saturating_sub(start.character))
            .collect();
    }

    let mut out: String = editor
        .line_text(start.line)
        .chars()
        .skip(start.character)
        .collect();
    for line in start.line + 1..end.line {
        out.push('\n');
        out.push_str(&editor.line_text(line));
    }
    out.push('\n');
    out.extend(editor.line_text(end.line).chars().take(end.character));
    out
}

/// Lines `first..=last` including their line terminator.
///
/// On the final line of the buffer there is no trailing terminator, so the
/// preceding one is taken instead; a single-line buffer yields just the text.
pub fn lines_with_terminator(editor: &dyn Editor, first: usize, last: usize) -> Range {
    let last = last.min(last_line(editor));
    let first = first.min(last);
    if last + 1 < editor.line_count() {
        Range::new(line_start(first), line_start(last + 1))
    } else if first > 0 {
        Range::new(line_end(editor, first - 1), line_end(editor, last))
    } else {
        Range::new(line_start(first), line_end(editor, last))
    }
}

/// Where the cursor lands after inserting `text` at `at`.
pub fn end_of_insertion(at: Position, text: &str) -> Position {
    match text.rsplit_once('\n') {
        Some((head, tail)) => Position::new(
            at.line + head.matches('\n').count() + 1,
            tail.chars().count(),
        ),
        None => Position::new(at.line, at.character + text.chars().count()),
    }
}

/// The position `count` chars before `pos`, crossing line terminators.
pub fn step_back(editor: &dyn Editor, pos: Position, count: usize) -> Position {
    let mut pos = clamp(editor, pos);
    let mut remaining = count;
    while remaining > 0 {
        if pos.character >= remaining {
            pos.character -= remaining;
            break;
        }
        if pos.line == 0 {
            pos.character = 0;
            break;
        }
        // the terminator counts as one char
        remaining -= pos.character + 1;
        pos = line_end(editor, pos.line - 1);
    }
    pos
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::TextBuffer;

    #[test]
    fn test_text_in_range_single_line() {
        let buf = TextBuffer::from_text("hello world");
        let r = Range::new(Position::new(0, 6), Position::new(0, 11));
        assert_eq!(text_in_range(&buf, r), "world");
    }

    #[test]
    fn test_text_in_range_multi_line() {
        let buf = TextBuffer::from_text("one\ntwo\nthree");
        let r = Range::new(Position::new(0, 1), Position::new(2, 2));
        assert_eq!(text_in_range(&buf, r), "ne\ntwo\nth");
    }

    #[test]
    fn test_lines_with_terminator_middle_line() {
        let buf = TextBuffer::from_text("a\nb\nc");
        let r = lines_with_terminator(&buf, 1, 1);
        assert_eq!(r, Range::new(Position::new(1, 0), Position::new(2, 0)));
        assert_eq!(text_in_range(&buf, r), "b\n");
    }

    #[test]
    fn test_lines_with_terminator_last_line_takes_previous_break() {
        let buf = TextBuffer::from_text("a\nb\nc");
        let r = lines_with_terminator(&buf, 2, 2);
        assert_eq!(text_in_range(&buf, r), "\nc");
    }

    #[test]
    fn test_end_of_insertion() {
        let at = Position::new(3, 2);
        assert_eq!(end_of_insertion(at, "abc"), Position::new(3, 5));
        assert_eq!(end_of_insertion(at, "ab\n"), Position::new(4, 0));
        assert_eq!(end_of_insertion(at, "a\nb\ncd"), Position::new(5, 2));
    }

    #[test]
    fn test_step_back_crosses_lines() {
        let buf = TextBuffer::from_text("ab\ncd");
        assert_eq!(step_back(&buf, Position::new(1, 1), 1), Position::new(1, 0));
        assert_eq!(step_back(&buf, Position::new(1, 1), 2), Position::new(0, 2));
        assert_eq!(step_back(&buf, Position::new(1, 1), 9), Position::new(0, 0));
    }
}
