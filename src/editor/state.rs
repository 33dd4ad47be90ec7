//! Mode controller state.
//!
//! This module provides the `ModalState` struct that owns everything the
//! interpreter remembers between keystrokes:
//!
//! - **Mode**: NORMAL, INSERT or VISUAL, plus whether VISUAL is line-wise
//! - **Visual anchor**: the fixed end of the selection while in VISUAL mode
//! - **Parsers**: the per-mode incremental key parsers
//! - **Repeat slots**: last repeatable command per mode, for `.`
//! - **Register**: the single yank/delete slot
//! - **Message**: the latest user-visible notification
//!
//! All mode transitions go through [`ModalState::set_mode`] and
//! [`ModalState::resume_normal`], which also keep the host's selection and
//! cursor style consistent with the mode.
//!
//! # Example
//!
//! ```
//! use keyquill::document::TextBuffer;
//! use keyquill::editor::mode::EditorMode;
//! use keyquill::editor::position::Position;
//! use keyquill::editor::state::ModalState;
//!
//! let mut buffer = TextBuffer::from_text("one\ntwo\nthree");
//! let mut state = ModalState::new("jk");
//! assert_eq!(state.mode(), EditorMode::Normal);
//!
//! state.set_mode(&mut buffer, EditorMode::Visual, true);
//! state.notice_move(&mut buffer, Position::new(1, 0));
//! assert_eq!(state.visual_anchor(), Some(Position::new(0, 0)));
//!
//! state.resume_normal(&mut buffer);
//! assert_eq!(state.mode(), EditorMode::Normal);
//! assert_eq!(state.visual_anchor(), None);
//! ```

use super::host::{clamp, line_end, line_start, CursorStyle, Editor};
use super::mode::EditorMode;
use super::position::{Position, Selection};
use super::registers::{Register, RegisterContent};
use super::repeat::RepeatSlots;
use crate::command::parser::{InsertParser, NormalParser, ParsedCommand, VisualParser};
use crate::config::Config;

/// Represents a message to display to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub text: String,
    pub level: MessageLevel,
}

/// Message severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Warning,
    Error,
}

/// The mode controller.
#[derive(Debug, Clone)]
pub struct ModalState {
    mode: EditorMode,
    visual_anchor: Option<Position>,
    visual_line_wise: bool,
    repeat: RepeatSlots,
    register: Register,
    normal_parser: NormalParser,
    visual_parser: VisualParser,
    insert_parser: InsertParser,
    message: Option<Message>,
}

impl ModalState {
    /// Creates a controller in NORMAL mode using `escape` to leave INSERT mode.
    pub fn new(escape: &str) -> Self {
        Self {
            mode: EditorMode::Normal,
            visual_anchor: None,
            visual_line_wise: false,
            repeat: RepeatSlots::new(),
            register: Register::new(),
            normal_parser: NormalParser::new(),
            visual_parser: VisualParser::new(),
            insert_parser: InsertParser::new(escape),
            message: None,
        }
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    pub fn visual_line_wise(&self) -> bool {
        self.visual_line_wise
    }

    pub fn visual_anchor(&self) -> Option<Position> {
        self.visual_anchor
    }

    /// Status line label for the current mode.
    pub fn mode_label(&self) -> &'static str {
        self.mode.label(self.visual_line_wise)
    }

    /// Switches mode and updates the host to match.
    ///
    /// Entering VISUAL anchors the selection at the cursor, or at the start of
    /// the cursor's line when `line_wise`; a line-wise selection immediately
    /// covers the whole line. Switching between the two VISUAL kinds keeps
    /// the existing anchor. Parser buffers are always cleared.
    pub fn set_mode(&mut self, editor: &mut dyn Editor, mode: EditorMode, line_wise: bool) {
        log::debug!(
            "mode {} -> {}",
            self.mode_label(),
            mode.label(line_wise && mode == EditorMode::Visual)
        );
        match mode {
            EditorMode::Normal => {
                editor.set_cursor_style(CursorStyle::Block);
                self.visual_anchor = None;
                self.visual_line_wise = false;
            }
            EditorMode::Insert => {
                editor.set_cursor_style(CursorStyle::Line);
                self.visual_anchor = None;
                self.visual_line_wise = false;
            }
            EditorMode::Visual => {
                editor.set_cursor_style(CursorStyle::Block);
                let cursor = clamp(editor, editor.cursor());
                let anchor = match (self.mode, self.visual_anchor) {
                    (EditorMode::Visual, Some(anchor)) => anchor,
                    _ if line_wise => line_start(cursor.line),
                    _ => cursor,
                };
                self.visual_anchor = Some(anchor);
                self.visual_line_wise = line_wise;
                self.mode = mode;
                self.notice_move(editor, cursor);
            }
        }
        self.mode = mode;
        self.reset_parsers();
    }

    /// Returns to NORMAL mode. A visual selection collapses to its start.
    pub fn resume_normal(&mut self, editor: &mut dyn Editor) {
        if self.mode == EditorMode::Visual {
            let start = editor.selection().range().start;
            editor.set_selection(Selection::caret(clamp(editor, start)));
        }
        self.insert_parser.reset();
        self.set_mode(editor, EditorMode::Normal, false);
    }

    /// Moves the cursor to `pos`, extending the selection in VISUAL mode.
    ///
    /// Char-wise, the selection runs from the anchor to `pos`. Line-wise, it
    /// covers whole lines: above the anchor line the anchor end snaps to the
    /// end of its line and the selection starts at the start of `pos`'s line;
    /// otherwise it runs from the start of the anchor line to the end of
    /// `pos`'s line.
    pub fn notice_move(&mut self, editor: &mut dyn Editor, pos: Position) {
        let pos = clamp(editor, pos);
        match (self.mode, self.visual_anchor) {
            (EditorMode::Visual, Some(anchor)) if self.visual_line_wise => {
                let selection = if pos.line < anchor.line {
                    Selection::new(line_end(editor, anchor.line), line_start(pos.line))
                } else {
                    Selection::new(line_start(anchor.line), line_end(editor, pos.line))
                };
                editor.set_selection(selection);
            }
            (EditorMode::Visual, Some(anchor)) => {
                editor.set_selection(Selection::new(anchor, pos));
            }
            _ => editor.set_cursor(pos),
        }
        editor.reveal_position(editor.cursor());
    }

    pub fn register(&self) -> &Register {
        &self.register
    }

    /// Overwrites the register, mirroring it to the host clipboard when configured.
    pub fn store_register(&mut self, editor: &mut dyn Editor, config: &Config, content: RegisterContent) {
        if config.sync_unnamed_register {
            editor.write_clipboard(&content.to_clipboard_text());
        }
        self.register.store(content);
    }

    /// Content to paste: the host clipboard when synced and non-empty,
    /// otherwise the register. Never modifies the register.
    pub fn paste_content(&self, editor: &mut dyn Editor, config: &Config) -> Option<RegisterContent> {
        let from_clipboard = if config.sync_unnamed_register {
            editor
                .read_clipboard()
                .filter(|text| !text.is_empty())
                .map(|text| RegisterContent::from_clipboard_text(&text))
        } else {
            None
        };
        from_clipboard.or_else(|| self.register.get().cloned())
    }

    pub fn record_command(&mut self, mode: EditorMode, command: &ParsedCommand) {
        self.repeat.record(mode, command);
    }

    pub fn last_command(&self, mode: EditorMode) -> Option<ParsedCommand> {
        self.repeat.last(mode).cloned()
    }

    pub fn normal_parser_mut(&mut self) -> &mut NormalParser {
        &mut self.normal_parser
    }

    pub fn visual_parser_mut(&mut self) -> &mut VisualParser {
        &mut self.visual_parser
    }

    pub fn insert_parser_mut(&mut self) -> &mut InsertParser {
        &mut self.insert_parser
    }

    pub fn reset_parsers(&mut self) {
        self.normal_parser.reset();
        self.visual_parser.reset();
        self.insert_parser.reset();
    }

    /// Keys typed towards a command that has not been emitted yet.
    pub fn pending_keys(&self) -> &str {
        match self.mode {
            EditorMode::Normal => self.normal_parser.pending(),
            EditorMode::Visual => self.visual_parser.pending(),
            EditorMode::Insert => "",
        }
    }

    pub fn message(&self) -> Option<&Message> {
        self.message.as_ref()
    }

    pub fn set_message(&mut self, text: String, level: MessageLevel) {
        self.message = Some(Message { text, level });
    }

    pub fn clear_message(&mut self) {
        self.message = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::TextBuffer;

    fn ten_lines() -> TextBuffer {
        let text = (0..10)
            .map(|i| format!("line {}", i))
            .collect::<Vec<_>>()
            .join("\n");
        TextBuffer::from_text(&text)
    }

    #[test]
    fn test_insert_mode_sets_line_cursor() {
        let mut buf = ten_lines();
        let mut state = ModalState::new("jk");
        state.set_mode(&mut buf, EditorMode::Insert, false);
        assert_eq!(buf.cursor_style(), CursorStyle::Line);

        state.resume_normal(&mut buf);
        assert_eq!(buf.cursor_style(), CursorStyle::Block);
    }

    #[test]
    fn test_visual_line_selects_whole_line_on_entry() {
        let mut buf = ten_lines();
        buf.set_cursor(Position::new(5, 3));
        let mut state = ModalState::new("jk");
        state.set_mode(&mut buf, EditorMode::Visual, true);

        assert_eq!(state.visual_anchor(), Some(Position::new(5, 0)));
        let range = buf.selection().range();
        assert_eq!(range.start, Position::new(5, 0));
        assert_eq!(range.end, Position::new(5, 6));
    }

    #[test]
    fn test_char_visual_extends_from_anchor() {
        let mut buf = ten_lines();
        buf.set_cursor(Position::new(2, 2));
        let mut state = ModalState::new("jk");
        state.set_mode(&mut buf, EditorMode::Visual, false);

        state.notice_move(&mut buf, Position::new(1, 4));
        assert_eq!(buf.selection().anchor, Position::new(2, 2));
        assert_eq!(buf.selection().active, Position::new(1, 4));

        state.notice_move(&mut buf, Position::new(3, 1));
        assert_eq!(buf.selection().anchor, Position::new(2, 2));
        assert_eq!(buf.cursor(), Position::new(3, 1));
    }

    #[test]
    fn test_resume_normal_collapses_to_selection_start() {
        let mut buf = ten_lines();
        buf.set_cursor(Position::new(4, 1));
        let mut state = ModalState::new("jk");
        state.set_mode(&mut buf, EditorMode::Visual, false);
        state.notice_move(&mut buf, Position::new(6, 2));

        state.resume_normal(&mut buf);
        assert!(buf.selection().is_collapsed());
        assert_eq!(buf.cursor(), Position::new(4, 1));
        assert_eq!(state.visual_anchor(), None);
    }

    #[test]
    fn test_switching_visual_kind_keeps_anchor() {
        let mut buf = ten_lines();
        buf.set_cursor(Position::new(3, 2));
        let mut state = ModalState::new("jk");
        state.set_mode(&mut buf, EditorMode::Visual, false);
        state.notice_move(&mut buf, Position::new(4, 1));
        state.set_mode(&mut buf, EditorMode::Visual, true);

        assert!(state.visual_line_wise());
        assert_eq!(state.visual_anchor(), Some(Position::new(3, 2)));
        let range = buf.selection().range();
        assert_eq!(range.start, Position::new(3, 0));
        assert_eq!(range.end, Position::new(4, 6));
    }

    #[test]
    fn test_messages() {
        let mut state = ModalState::new("jk");
        assert!(state.message().is_none());
        state.set_message("hello".to_string(), MessageLevel::Warning);
        assert_eq!(state.message().unwrap().level, MessageLevel::Warning);
        state.clear_message();
        assert!(state.message().is_none());
    }
}
