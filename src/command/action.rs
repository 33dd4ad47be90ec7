//! Operator actions.
//!
//! Every operator in the registry points at one of these functions. An action
//! receives the compiled range, argument and line-wise flag through an
//! [`ActionContext`] and talks to the host only via the [`Editor`] trait.
//! Mode changes and cursor moves go through the [`ModalState`] so the visual
//! selection stays consistent.

use super::interpreter;
use super::motion;
use super::registry::Registry;
use crate::config::Config;
use crate::editor::host::{
    clamp, end_of_insertion, last_line, line_end, line_len, line_start, text_in_range, Editor,
    TextEdit,
};
use crate::editor::mode::EditorMode;
use crate::editor::position::{Position, Range};
use crate::editor::registers::RegisterContent;
use crate::editor::state::ModalState;
use anyhow::{Context, Result};

/// An operator implementation.
pub type Action = fn(&mut ActionContext<'_>) -> Result<()>;

/// Everything an action may read or change while it runs.
pub struct ActionContext<'a> {
    pub editor: &'a mut dyn Editor,
    pub state: &'a mut ModalState,
    pub registry: &'a Registry,
    pub config: &'a Config,
    /// Target range; a point at the cursor for operators without a motion.
    pub range: Range,
    pub arg: Option<char>,
    /// Set for whole-line motions and line-wise visual selections.
    pub line_wise: bool,
    /// First and last line the operator touches.
    pub lines: (usize, usize),
    /// Host commands bound to the operator char, if any.
    pub host_commands: &'a [String],
}

impl ActionContext<'_> {
    fn cursor(&self) -> Position {
        clamp(&*self.editor, self.editor.cursor())
    }

    fn move_to(&mut self, pos: Position) {
        self.state.notice_move(self.editor, pos);
    }

    fn enter_insert(&mut self) {
        self.state.set_mode(self.editor, EditorMode::Insert, false);
    }

    /// Text an operator puts in the register; whole lines without
    /// terminators when line-wise.
    fn register_text(&self) -> String {
        if !self.line_wise {
            return text_in_range(&*self.editor, self.range);
        }
        let (first, last) = self.lines;
        (first..=last)
            .map(|line| self.editor.line_text(line))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn store(&mut self, text: String, line_wise: bool) {
        let content = RegisterContent::new(&text, line_wise);
        self.state.store_register(self.editor, self.config, content);
    }
}

macro_rules! movement {
    ($name:ident, $step:path) => {
        pub fn $name(ctx: &mut ActionContext<'_>) -> Result<()> {
            let to = $step(&*ctx.editor, ctx.config, ctx.cursor());
            ctx.move_to(to);
            Ok(())
        }
    };
}

movement!(move_left, motion::left_char);
movement!(move_right, motion::right_char);
movement!(move_up, motion::up_char);
movement!(move_down, motion::down_char);
movement!(move_word_forward, motion::next_word);
movement!(move_word_backward, motion::previous_word);
movement!(move_line_start, motion::start_of_line);
movement!(move_line_end, motion::end_of_line);
movement!(move_page_down, motion::down_page);
movement!(move_page_up, motion::up_page);

pub fn find_forward(ctx: &mut ActionContext<'_>) -> Result<()> {
    if let Some(target) = ctx.arg {
        let to = motion::next_char_on_line(&*ctx.editor, ctx.config, ctx.cursor(), target);
        ctx.move_to(to);
    }
    Ok(())
}

pub fn find_backward(ctx: &mut ActionContext<'_>) -> Result<()> {
    if let Some(target) = ctx.arg {
        let to = motion::previous_char_on_line(&*ctx.editor, ctx.config, ctx.cursor(), target);
        ctx.move_to(to);
    }
    Ok(())
}

/// `z` + `z`/`t`/`b`: scroll so the cursor line sits at the center, top or bottom.
pub fn scroll_line(ctx: &mut ActionContext<'_>) -> Result<()> {
    let at = match ctx.arg {
        Some('z') => "center",
        Some('t') => "top",
        Some('b') => "bottom",
        _ => return Ok(()),
    };
    let line = ctx.cursor().line.to_string();
    ctx.editor
        .run_named_command("revealLine", &[line, at.to_string()])
}

pub fn insert_before(ctx: &mut ActionContext<'_>) -> Result<()> {
    ctx.state.resume_normal(ctx.editor);
    ctx.enter_insert();
    Ok(())
}

pub fn append_after(ctx: &mut ActionContext<'_>) -> Result<()> {
    ctx.state.resume_normal(ctx.editor);
    let to = motion::right_char(&*ctx.editor, ctx.config, ctx.cursor());
    ctx.move_to(to);
    ctx.enter_insert();
    Ok(())
}

pub fn insert_line_start(ctx: &mut ActionContext<'_>) -> Result<()> {
    ctx.state.resume_normal(ctx.editor);
    let to = line_start(ctx.cursor().line);
    ctx.move_to(to);
    ctx.enter_insert();
    Ok(())
}

pub fn append_line_end(ctx: &mut ActionContext<'_>) -> Result<()> {
    ctx.state.resume_normal(ctx.editor);
    let to = line_end(&*ctx.editor, ctx.cursor().line);
    ctx.move_to(to);
    ctx.enter_insert();
    Ok(())
}

pub fn open_line_below(ctx: &mut ActionContext<'_>) -> Result<()> {
    ctx.state.resume_normal(ctx.editor);
    let line = ctx.cursor().line;
    let at = line_end(&*ctx.editor, line);
    ctx.editor.edit(&[TextEdit::Insert {
        at,
        text: "\n".to_string(),
    }])?;
    ctx.editor.set_cursor(line_start(line + 1));
    ctx.enter_insert();
    Ok(())
}

pub fn open_line_above(ctx: &mut ActionContext<'_>) -> Result<()> {
    ctx.state.resume_normal(ctx.editor);
    let line = ctx.cursor().line;
    ctx.editor.edit(&[TextEdit::Insert {
        at: line_start(line),
        text: "\n".to_string(),
    }])?;
    ctx.editor.set_cursor(line_start(line));
    ctx.enter_insert();
    Ok(())
}

fn toggle_visual(ctx: &mut ActionContext<'_>, line_wise: bool) {
    if ctx.state.mode() == EditorMode::Visual && ctx.state.visual_line_wise() == line_wise {
        ctx.state.resume_normal(ctx.editor);
    } else {
        ctx.state.set_mode(ctx.editor, EditorMode::Visual, line_wise);
    }
}

pub fn visual_char(ctx: &mut ActionContext<'_>) -> Result<()> {
    toggle_visual(ctx, false);
    Ok(())
}

pub fn visual_line(ctx: &mut ActionContext<'_>) -> Result<()> {
    toggle_visual(ctx, true);
    Ok(())
}

/// `x`: delete the char under the cursor into the register.
pub fn delete_char(ctx: &mut ActionContext<'_>) -> Result<()> {
    let pos = ctx.cursor();
    if pos.character >= line_len(&*ctx.editor, pos.line) {
        return Ok(());
    }
    let range = Range::new(pos, Position::new(pos.line, pos.character + 1));
    let text = text_in_range(&*ctx.editor, range);
    ctx.store(text, false);
    ctx.editor.edit(&[TextEdit::Delete { range }])?;
    ctx.editor.set_cursor(clamp(&*ctx.editor, pos));
    Ok(())
}

pub fn paste_after(ctx: &mut ActionContext<'_>) -> Result<()> {
    paste(ctx, true)
}

pub fn paste_before(ctx: &mut ActionContext<'_>) -> Result<()> {
    paste(ctx, false)
}

/// Line-wise content goes on a new line below (`p`) or above (`P`) the cursor
/// line; char-wise content is inserted at the cursor.
fn paste(ctx: &mut ActionContext<'_>, after: bool) -> Result<()> {
    let Some(content) = ctx.state.paste_content(ctx.editor, ctx.config) else {
        return Ok(());
    };
    let cursor = ctx.cursor();

    if content.line_wise {
        let line = cursor.line;
        if after {
            let at = line_end(&*ctx.editor, line);
            ctx.editor.edit(&[TextEdit::Insert {
                at,
                text: format!("\n{}", content.text),
            }])?;
            ctx.editor.set_cursor(line_start(line + 1));
        } else {
            ctx.editor.edit(&[TextEdit::Insert {
                at: line_start(line),
                text: format!("{}\n", content.text),
            }])?;
            ctx.editor.set_cursor(line_start(line));
        }
    } else {
        ctx.editor.edit(&[TextEdit::Insert {
            at: cursor,
            text: content.text.clone(),
        }])?;
        ctx.editor.set_cursor(end_of_insertion(cursor, &content.text));
    }
    Ok(())
}

pub fn delete_range(ctx: &mut ActionContext<'_>) -> Result<()> {
    let range = ctx.range;
    if range.is_empty() {
        return Ok(());
    }
    let text = ctx.register_text();
    ctx.store(text, ctx.line_wise);
    ctx.editor.edit(&[TextEdit::Delete { range }])?;

    let landing = if ctx.line_wise {
        line_start(ctx.lines.0.min(last_line(&*ctx.editor)))
    } else {
        range.start
    };
    let landing = clamp(&*ctx.editor, landing);
    ctx.editor.set_cursor(landing);
    Ok(())
}

pub fn yank_range(ctx: &mut ActionContext<'_>) -> Result<()> {
    let range = ctx.range;
    if range.is_empty() {
        return Ok(());
    }
    let text = ctx.register_text();
    ctx.store(text, ctx.line_wise);
    if !ctx.line_wise && ctx.state.mode() == EditorMode::Normal {
        ctx.editor.set_cursor(range.start);
    }
    Ok(())
}

/// Like delete, then INSERT mode. Line-wise, the lines' text goes but one
/// empty line stays behind for the new text.
pub fn change_range(ctx: &mut ActionContext<'_>) -> Result<()> {
    let range = ctx.range;
    let target = if ctx.line_wise {
        let (first, last) = ctx.lines;
        Range::new(line_start(first), line_end(&*ctx.editor, last))
    } else {
        range
    };

    if !range.is_empty() {
        let text = ctx.register_text();
        ctx.store(text, ctx.line_wise);
    }
    if !target.is_empty() {
        ctx.editor.edit(&[TextEdit::Delete { range: target }])?;
    }

    ctx.state.resume_normal(ctx.editor);
    let start = clamp(&*ctx.editor, target.start);
    ctx.editor.set_cursor(start);
    ctx.enter_insert();
    Ok(())
}

pub fn indent_range(ctx: &mut ActionContext<'_>) -> Result<()> {
    let (first, last) = ctx.lines;
    let indent = " ".repeat(ctx.config.indent_width);
    let edits: Vec<TextEdit> = (first..=last)
        .filter(|&line| line_len(&*ctx.editor, line) > 0)
        .map(|line| TextEdit::Insert {
            at: line_start(line),
            text: indent.clone(),
        })
        .collect();
    if !edits.is_empty() {
        ctx.editor.edit(&edits)?;
    }
    land_on_first_non_blank(ctx, first);
    Ok(())
}

/// Removes up to `indent_width` leading spaces, or one leading tab, per line.
pub fn dedent_range(ctx: &mut ActionContext<'_>) -> Result<()> {
    let (first, last) = ctx.lines;
    let width = ctx.config.indent_width;
    let edits: Vec<TextEdit> = (first..=last)
        .filter_map(|line| {
            let text = ctx.editor.line_text(line);
            let strip = if text.starts_with('\t') {
                1
            } else {
                text.chars().take(width).take_while(|&c| c == ' ').count()
            };
            (strip > 0).then(|| TextEdit::Delete {
                range: Range::new(line_start(line), Position::new(line, strip)),
            })
        })
        .collect();
    if !edits.is_empty() {
        ctx.editor.edit(&edits)?;
    }
    land_on_first_non_blank(ctx, first);
    Ok(())
}

fn land_on_first_non_blank(ctx: &mut ActionContext<'_>, line: usize) {
    if ctx.state.mode() != EditorMode::Normal {
        return;
    }
    let column = ctx
        .editor
        .line_text(line)
        .chars()
        .take_while(|c| c.is_whitespace())
        .count();
    ctx.editor.set_cursor(Position::new(line, column));
}

/// `r`: replace the char under the cursor with the argument.
pub fn replace_char(ctx: &mut ActionContext<'_>) -> Result<()> {
    let Some(replacement) = ctx.arg else {
        return Ok(());
    };
    let pos = ctx.cursor();
    if pos.character >= line_len(&*ctx.editor, pos.line) {
        return Ok(());
    }
    ctx.editor.edit(&[TextEdit::Replace {
        range: Range::new(pos, Position::new(pos.line, pos.character + 1)),
        text: replacement.to_string(),
    }])?;
    ctx.editor.set_cursor(pos);
    Ok(())
}

/// `.`: run the last recorded command for the current mode again.
pub fn repeat_last(ctx: &mut ActionContext<'_>) -> Result<()> {
    let Some(last) = ctx.state.last_command(ctx.state.mode()) else {
        log::debug!("nothing to repeat");
        return Ok(());
    };
    interpreter::run_parsed(&last, ctx.editor, ctx.state, ctx.registry, ctx.config);
    Ok(())
}

/// Runs the host commands bound to the operator char, stopping at the first failure.
pub fn run_host_commands(ctx: &mut ActionContext<'_>) -> Result<()> {
    for name in ctx.host_commands {
        ctx.editor
            .run_named_command(name, &[])
            .with_context(|| format!("command `{}` failed", name))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::TextBuffer;

    fn register_text_for(text: &str, range: Range, line_wise: bool, lines: (usize, usize)) -> String {
        let mut buf = TextBuffer::from_text(text);
        let config = Config::default();
        let registry = Registry::new(&config);
        let mut state = ModalState::new(&config.escape_sequence);
        let ctx = ActionContext {
            editor: &mut buf,
            state: &mut state,
            registry: &registry,
            config: &config,
            range,
            arg: None,
            line_wise,
            lines,
            host_commands: &[],
        };
        ctx.register_text()
    }

    #[test]
    fn test_line_wise_register_text_keeps_empty_lines() {
        let range = Range::new(Position::new(0, 0), Position::new(1, 1));
        assert_eq!(register_text_for("\nb", range, true, (0, 1)), "\nb");
        assert_eq!(register_text_for("\nb", range, true, (1, 1)), "b");
    }

    #[test]
    fn test_char_wise_register_text_is_the_range() {
        let range = Range::new(Position::new(0, 1), Position::new(1, 1));
        assert_eq!(register_text_for("abc\ndef", range, false, (0, 1)), "bc\nd");
    }
}
