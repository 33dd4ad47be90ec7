//! In-memory text buffer implementing the [`Editor`] host trait.
//!
//! Lines are stored without terminators and positions count chars, not bytes.
//! Every [`Editor::edit`] call maps the selection through the edits, so text
//! typed at the cursor pushes it right and a deleted span containing it
//! collapses it to the span start. Outside an undo group each call also
//! records one undo snapshot.

use crate::editor::host::{end_of_insertion, CursorStyle, Editor, TextEdit};
use crate::editor::position::{Position, Range, Selection};
use crate::editor::undo::{BufferSnapshot, UndoHistory};
use crate::file::saver::save_text_file;
use anyhow::{anyhow, bail, Context, Result};
use std::path::{Path, PathBuf};

const DEFAULT_UNDO_LIMIT: usize = 50;
const DEFAULT_VIEWPORT_HEIGHT: usize = 24;

/// Where yanked text is mirrored.
#[derive(Debug, Clone)]
enum ClipboardBackend {
    Memory(Option<String>),
    System,
}

/// A line-based text buffer with cursor, undo history and viewport.
#[derive(Debug, Clone)]
pub struct TextBuffer {
    lines: Vec<String>,
    selection: Selection,
    history: UndoHistory,
    clipboard: ClipboardBackend,
    filename: Option<PathBuf>,
    dirty: bool,
    scroll_top: usize,
    viewport_height: usize,
    cursor_style: CursorStyle,
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextBuffer {
    /// An empty buffer with one empty line.
    pub fn new() -> Self {
        Self {
            lines: vec![String::new()],
            selection: Selection::default(),
            history: UndoHistory::new(DEFAULT_UNDO_LIMIT),
            clipboard: ClipboardBackend::Memory(None),
            filename: None,
            dirty: false,
            scroll_top: 0,
            viewport_height: DEFAULT_VIEWPORT_HEIGHT,
            cursor_style: CursorStyle::Block,
        }
    }

    /// A buffer holding `text`; `\r\n` line endings become `\n`.
    ///
    /// # Example
    ///
    /// ```
    /// use keyquill::document::TextBuffer;
    /// use keyquill::editor::host::Editor;
    ///
    /// let buffer = TextBuffer::from_text("one\r\ntwo");
    /// assert_eq!(buffer.line_count(), 2);
    /// assert_eq!(buffer.text(), "one\ntwo");
    /// ```
    pub fn from_text(text: &str) -> Self {
        let normalized = text.replace("\r\n", "\n");
        Self {
            lines: normalized.split('\n').map(str::to_string).collect(),
            ..Self::new()
        }
    }

    /// Uses the system clipboard instead of the in-memory one.
    pub fn with_system_clipboard(mut self) -> Self {
        self.clipboard = ClipboardBackend::System;
        self
    }

    pub fn with_filename(mut self, path: impl Into<PathBuf>) -> Self {
        self.filename = Some(path.into());
        self
    }

    pub fn with_undo_limit(mut self, limit: usize) -> Self {
        self.history = UndoHistory::new(limit);
        self
    }

    /// The whole buffer, lines joined with `\n`.
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn filename(&self) -> Option<&Path> {
        self.filename.as_deref()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_saved(&mut self) {
        self.dirty = false;
    }

    pub fn cursor_style(&self) -> CursorStyle {
        self.cursor_style
    }

    pub fn scroll_top(&self) -> usize {
        self.scroll_top
    }

    pub fn viewport_height(&self) -> usize {
        self.viewport_height
    }

    /// Sets the number of visible lines and keeps the cursor in view.
    pub fn set_viewport_height(&mut self, height: usize) {
        self.viewport_height = height.max(1);
        let cursor = self.selection.active;
        self.reveal_position(cursor);
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Deletes the char before the cursor, joining lines at column 0.
    pub fn backspace(&mut self) -> Result<()> {
        let end = self.clamp(self.selection.active);
        let start = if end.character > 0 {
            Position::new(end.line, end.character - 1)
        } else if end.line > 0 {
            Position::new(end.line - 1, self.line_len(end.line - 1))
        } else {
            return Ok(());
        };
        self.edit(&[TextEdit::Delete {
            range: Range::new(start, end),
        }])
    }

    /// Writes the buffer to its file.
    pub fn save(&mut self) -> Result<()> {
        let path = self
            .filename
            .clone()
            .ok_or_else(|| anyhow!("No file name"))?;
        save_text_file(&path, &self.lines)?;
        self.dirty = false;
        log::info!("wrote {}", path.display());
        Ok(())
    }

    pub fn undo(&mut self) -> bool {
        let current = self.snapshot();
        match self.history.undo(current) {
            Some(previous) => {
                self.restore(previous);
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self) -> bool {
        let current = self.snapshot();
        match self.history.redo(current) {
            Some(next) => {
                self.restore(next);
                true
            }
            None => false,
        }
    }

    fn snapshot(&self) -> BufferSnapshot {
        BufferSnapshot {
            lines: self.lines.clone(),
            selection: self.selection,
        }
    }

    fn restore(&mut self, snapshot: BufferSnapshot) {
        self.lines = snapshot.lines;
        self.selection = snapshot.selection;
        self.dirty = true;
        let cursor = self.selection.active;
        self.reveal_position(cursor);
    }

    fn line_len(&self, line: usize) -> usize {
        self.lines.get(line).map_or(0, |l| l.chars().count())
    }

    fn clamp(&self, pos: Position) -> Position {
        let line = pos.line.min(self.lines.len().saturating_sub(1));
        Position::new(line, pos.character.min(self.line_len(line)))
    }

    fn insert_text(&mut self, at: Position, text: &str) {
        let at = self.clamp(at);
        let line = &self.lines[at.line];
        let split = byte_index(line, at.character);
        let tail = line[split..].to_string();
        let head = line[..split].to_string();

        let mut pieces = text.split('\n');
        let first = pieces.next().unwrap_or_default();
        let mut new_lines = vec![format!("{}{}", head, first)];
        new_lines.extend(pieces.map(str::to_string));
        if let Some(last) = new_lines.last_mut() {
            last.push_str(&tail);
        }
        self.lines.splice(at.line..=at.line, new_lines);

        self.selection = Selection::new(
            shift_for_insert(self.selection.anchor, at, text),
            shift_for_insert(self.selection.active, at, text),
        );
    }

    fn delete_range(&mut self, range: Range) {
        let start = self.clamp(range.start);
        let end = self.clamp(range.end);
        if start >= end {
            return;
        }
        let head = {
            let line = &self.lines[start.line];
            line[..byte_index(line, start.character)].to_string()
        };
        let tail = {
            let line = &self.lines[end.line];
            line[byte_index(line, end.character)..].to_string()
        };
        self.lines
            .splice(start.line..=end.line, [format!("{}{}", head, tail)]);

        let range = Range::new(start, end);
        self.selection = Selection::new(
            shift_for_delete(self.selection.anchor, range),
            shift_for_delete(self.selection.active, range),
        );
    }

    fn reveal_line(&mut self, line: usize, at: &str) -> Result<()> {
        let line = line.min(self.lines.len().saturating_sub(1));
        let height = self.viewport_height.max(1);
        self.scroll_top = match at {
            "center" => line.saturating_sub(height / 2),
            "top" => line,
            "bottom" => (line + 1).saturating_sub(height),
            other => bail!("revealLine: unknown position `{}`", other),
        };
        Ok(())
    }
}

impl Editor for TextBuffer {
    fn selection(&self) -> Selection {
        self.selection
    }

    fn set_selection(&mut self, selection: Selection) {
        self.selection = Selection::new(self.clamp(selection.anchor), self.clamp(selection.active));
    }

    fn line_text(&self, line: usize) -> String {
        self.lines.get(line).cloned().unwrap_or_default()
    }

    fn line_count(&self) -> usize {
        self.lines.len()
    }

    fn edit(&mut self, edits: &[TextEdit]) -> Result<()> {
        if edits.is_empty() {
            return Ok(());
        }
        self.history.checkpoint(self.snapshot());
        for edit in edits {
            match edit {
                TextEdit::Insert { at, text } => self.insert_text(*at, text),
                TextEdit::Delete { range } => self.delete_range(*range),
                TextEdit::Replace { range, text } => {
                    self.delete_range(*range);
                    self.insert_text(range.start, text);
                }
            }
        }
        self.dirty = true;
        Ok(())
    }

    fn reveal_position(&mut self, pos: Position) {
        let height = self.viewport_height.max(1);
        if pos.line < self.scroll_top {
            self.scroll_top = pos.line;
        } else if pos.line >= self.scroll_top + height {
            self.scroll_top = pos.line + 1 - height;
        }
    }

    fn run_named_command(&mut self, name: &str, args: &[String]) -> Result<()> {
        log::debug!("host command {} {:?}", name, args);
        match name {
            "undo" => {
                self.undo();
                Ok(())
            }
            "redo" => {
                self.redo();
                Ok(())
            }
            "revealLine" => {
                let line = args
                    .first()
                    .ok_or_else(|| anyhow!("revealLine: missing line"))?
                    .parse::<usize>()
                    .context("revealLine: line must be a number")?;
                let at = args.get(1).map_or("center", String::as_str);
                self.reveal_line(line, at)
            }
            "write" => self.save(),
            other => bail!("unknown command: {}", other),
        }
    }

    fn read_clipboard(&mut self) -> Option<String> {
        match &self.clipboard {
            ClipboardBackend::Memory(text) => text.clone(),
            ClipboardBackend::System => arboard::Clipboard::new()
                .and_then(|mut clipboard| clipboard.get_text())
                .ok(),
        }
    }

    fn write_clipboard(&mut self, text: &str) {
        match &mut self.clipboard {
            ClipboardBackend::Memory(slot) => *slot = Some(text.to_string()),
            ClipboardBackend::System => {
                if let Err(e) = arboard::Clipboard::new().and_then(|mut c| c.set_text(text)) {
                    log::warn!("clipboard write failed: {}", e);
                }
            }
        }
    }

    fn set_cursor_style(&mut self, style: CursorStyle) {
        self.cursor_style = style;
    }

    fn begin_undo_group(&mut self) {
        self.history.begin_group();
    }

    fn end_undo_group(&mut self) {
        self.history.end_group();
    }
}

/// Byte offset of char `index` in `line`, or its length past the end.
fn byte_index(line: &str, index: usize) -> usize {
    line.char_indices()
        .nth(index)
        .map_or(line.len(), |(offset, _)| offset)
}

fn shift_for_insert(pos: Position, at: Position, text: &str) -> Position {
    if pos < at {
        return pos;
    }
    let end = end_of_insertion(at, text);
    if pos.line == at.line {
        Position::new(end.line, end.character + (pos.character - at.character))
    } else {
        Position::new(pos.line + (end.line - at.line), pos.character)
    }
}

fn shift_for_delete(pos: Position, range: Range) -> Position {
    if pos <= range.start {
        pos
    } else if pos <= range.end {
        range.start
    } else if pos.line == range.end.line {
        Position::new(
            range.start.line,
            range.start.character + (pos.character - range.end.character),
        )
    } else {
        Position::new(pos.line - (range.end.line - range.start.line), pos.character)
    }
}
