//! Cursor motion primitives.
//!
//! Every motion maps a starting position to a new position (or, for the
//! "inner" text object, a range) using only read access to the host buffer.
//! Motions never fail: at a buffer edge they return the position unchanged.

use crate::config::Config;
use crate::editor::host::{clamp, last_line, line_end, line_len, Editor};
use crate::editor::position::{Position, Range};

/// Lines moved by the `D` / `U` page motions.
pub const PAGE_LINES: usize = 20;

pub fn left_char(editor: &dyn Editor, _config: &Config, pos: Position) -> Position {
    let pos = clamp(editor, pos);
    Position::new(pos.line, pos.character.saturating_sub(1))
}

pub fn right_char(editor: &dyn Editor, _config: &Config, pos: Position) -> Position {
    let pos = clamp(editor, pos);
    let max = line_len(editor, pos.line);
    Position::new(pos.line, (pos.character + 1).min(max))
}

pub fn up_char(editor: &dyn Editor, _config: &Config, pos: Position) -> Position {
    up_lines(editor, pos, 1)
}

pub fn down_char(editor: &dyn Editor, _config: &Config, pos: Position) -> Position {
    down_lines(editor, pos, 1)
}

pub fn up_page(editor: &dyn Editor, _config: &Config, pos: Position) -> Position {
    up_lines(editor, pos, PAGE_LINES)
}

pub fn down_page(editor: &dyn Editor, _config: &Config, pos: Position) -> Position {
    down_lines(editor, pos, PAGE_LINES)
}

fn up_lines(editor: &dyn Editor, pos: Position, count: usize) -> Position {
    let line = pos.line.min(last_line(editor)).saturating_sub(count);
    Position::new(line, pos.character.min(line_len(editor, line)))
}

fn down_lines(editor: &dyn Editor, pos: Position, count: usize) -> Position {
    let line = pos.line.saturating_add(count).min(last_line(editor));
    Position::new(line, pos.character.min(line_len(editor, line)))
}

pub fn start_of_line(editor: &dyn Editor, _config: &Config, pos: Position) -> Position {
    Position::new(clamp(editor, pos).line, 0)
}

pub fn end_of_line(editor: &dyn Editor, _config: &Config, pos: Position) -> Position {
    line_end(editor, clamp(editor, pos).line)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CharClass {
    Blank,
    Punctuation,
    Word,
}

fn classify(c: char, config: &Config) -> CharClass {
    if c.is_whitespace() {
        CharClass::Blank
    } else if config.word_separators.contains(c) {
        CharClass::Punctuation
    } else {
        CharClass::Word
    }
}

fn first_non_blank(chars: &[char]) -> usize {
    chars
        .iter()
        .position(|c| !c.is_whitespace())
        .unwrap_or(chars.len())
}

/// Start of the next word. Runs of word chars and runs of separator chars
/// are separate words; at the end of a line the motion continues on the next.
pub fn next_word(editor: &dyn Editor, config: &Config, pos: Position) -> Position {
    let pos = clamp(editor, pos);
    let chars: Vec<char> = editor.line_text(pos.line).chars().collect();
    let mut i = pos.character;

    if i < chars.len() {
        let class = classify(chars[i], config);
        if class != CharClass::Blank {
            while i < chars.len() && classify(chars[i], config) == class {
                i += 1;
            }
        }
        while i < chars.len() && classify(chars[i], config) == CharClass::Blank {
            i += 1;
        }
        if i < chars.len() {
            return Position::new(pos.line, i);
        }
    }

    if pos.line < last_line(editor) {
        let next: Vec<char> = editor.line_text(pos.line + 1).chars().collect();
        Position::new(pos.line + 1, first_non_blank(&next))
    } else {
        Position::new(pos.line, chars.len())
    }
}

/// Start of the current or previous word; from column 0 it moves to the
/// last word of the previous line.
pub fn previous_word(editor: &dyn Editor, config: &Config, pos: Position) -> Position {
    let pos = clamp(editor, pos);
    let (line, col) = if pos.character == 0 {
        if pos.line == 0 {
            return pos;
        }
        (pos.line - 1, line_len(editor, pos.line - 1))
    } else {
        (pos.line, pos.character)
    };

    let chars: Vec<char> = editor.line_text(line).chars().collect();
    let mut i = col;
    while i > 0 && classify(chars[i - 1], config) == CharClass::Blank {
        i -= 1;
    }
    if i == 0 {
        return Position::new(line, 0);
    }
    let class = classify(chars[i - 1], config);
    while i > 0 && classify(chars[i - 1], config) == class {
        i -= 1;
    }
    Position::new(line, i)
}

/// Next occurrence of `target` after the cursor on the same line.
pub fn next_char_on_line(editor: &dyn Editor, _config: &Config, pos: Position, target: char) -> Position {
    let pos = clamp(editor, pos);
    editor
        .line_text(pos.line)
        .chars()
        .enumerate()
        .skip(pos.character + 1)
        .find(|&(_, c)| c == target)
        .map(|(i, _)| Position::new(pos.line, i))
        .unwrap_or(pos)
}

/// Previous occurrence of `target` before the cursor on the same line.
pub fn previous_char_on_line(
    editor: &dyn Editor,
    _config: &Config,
    pos: Position,
    target: char,
) -> Position {
    let pos = clamp(editor, pos);
    let chars: Vec<char> = editor.line_text(pos.line).chars().collect();
    chars[..pos.character.min(chars.len())]
        .iter()
        .rposition(|&c| c == target)
        .map(|i| Position::new(pos.line, i))
        .unwrap_or(pos)
}

fn delimiter_pair(c: char) -> (char, char) {
    match c {
        '(' | ')' => ('(', ')'),
        '[' | ']' => ('[', ']'),
        '{' | '}' => ('{', '}'),
        '<' | '>' => ('<', '>'),
        other => (other, other),
    }
}

/// Text strictly between the nearest `open` at or before the cursor and the
/// nearest `close` after it, on the cursor's line. Empty range at the cursor
/// when either side is missing.
pub fn inner(editor: &dyn Editor, _config: &Config, pos: Position, delimiter: char) -> Range {
    let pos = clamp(editor, pos);
    let (open, close) = delimiter_pair(delimiter);
    let chars: Vec<char> = editor.line_text(pos.line).chars().collect();
    if chars.is_empty() {
        return Range::point(pos);
    }

    let cursor = pos.character.min(chars.len() - 1);
    let left = if open == close {
        chars[..cursor].iter().rposition(|&c| c == open)
    } else {
        chars[..=cursor].iter().rposition(|&c| c == open)
    };
    let from = if open != close && chars[cursor] == close {
        cursor
    } else {
        cursor + 1
    };
    let right = if open != close && chars[cursor] == close {
        Some(cursor)
    } else {
        chars[from.min(chars.len())..]
            .iter()
            .position(|&c| c == close)
            .map(|i| i + from)
    };

    match (left, right) {
        (Some(l), Some(r)) if l < r => {
            Range::new(Position::new(pos.line, l + 1), Position::new(pos.line, r))
        }
        _ => Range::point(pos),
    }
}
