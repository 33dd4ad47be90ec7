//! Turns a parsed command into something executable.
//!
//! Compilation resolves the operator to its action and, for range-taking
//! operators, resolves the target range against the current cursor or visual
//! selection. It only reads the host; nothing is changed until the compiled
//! command runs.

use super::action::Action;
use super::parser::ParsedCommand;
use super::registry::{ActionKind, Capability, Registry};
use crate::config::Config;
use crate::editor::host::{lines_with_terminator, Editor};
use crate::editor::mode::EditorMode;
use crate::editor::position::{Position, Range};
use crate::editor::state::ModalState;
use std::fmt;

/// A command ready to run.
#[derive(Clone)]
pub struct CompiledCommand {
    /// How many times the action runs.
    pub repeat: u32,
    pub action: Action,
    pub kind: ActionKind,
    pub range: Range,
    pub arg: Option<char>,
    pub line_wise: bool,
    /// First and last line the range covers, terminators excluded.
    pub lines: (usize, usize),
    pub host_commands: Vec<String>,
}

impl fmt::Debug for CompiledCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledCommand")
            .field("repeat", &self.repeat)
            .field("kind", &self.kind)
            .field("range", &self.range)
            .field("arg", &self.arg)
            .field("line_wise", &self.line_wise)
            .field("lines", &self.lines)
            .field("host_commands", &self.host_commands)
            .finish_non_exhaustive()
    }
}

/// Compiles `parsed` against the current editor state.
///
/// Returns `None` when the operator (or the motion of a range operator) has
/// no table entry, or a motion that needs an argument did not get one.
///
/// - A motion equal to the operator selects the whole cursor line including
///   its terminator, line-wise.
/// - Otherwise the motion is applied from the cursor, then applied again
///   from each previous endpoint `motion_repeat - 1` more times; the range
///   spans everything visited.
/// - In VISUAL mode the selection is the range (whole lines when line-wise)
///   and the command runs once.
pub fn compile(
    parsed: &ParsedCommand,
    editor: &dyn Editor,
    state: &ModalState,
    registry: &Registry,
    config: &Config,
) -> Option<CompiledCommand> {
    let binding = registry.operator(parsed.operator)?;
    let action = binding.capability.action()?;
    let cursor = editor.cursor();

    let mut compiled = CompiledCommand {
        repeat: parsed.operator_repeat.max(1),
        action,
        kind: binding.kind,
        range: Range::point(cursor),
        arg: parsed.arg,
        line_wise: false,
        lines: (cursor.line, cursor.line),
        host_commands: registry.host_commands(parsed.operator).to_vec(),
    };

    if parsed.is_virtual {
        compiled.repeat = 1;
        return Some(compiled);
    }
    if !binding.capability.needs_range() {
        return Some(compiled);
    }

    if state.mode() == EditorMode::Visual {
        let selection = editor.selection().range();
        if state.visual_line_wise() {
            compiled.range = lines_with_terminator(editor, selection.start.line, selection.end.line);
            compiled.line_wise = true;
        } else {
            compiled.range = selection;
        }
        compiled.lines = (selection.start.line, selection.end.line);
        compiled.repeat = 1;
        return Some(compiled);
    }

    match parsed.motion {
        Some(_) if parsed.is_whole_line() => {
            compiled.range = lines_with_terminator(editor, cursor.line, cursor.line);
            compiled.line_wise = true;
        }
        Some(motion) => {
            let capability = registry.motion(motion)?;
            compiled.range = resolve_motion(
                capability,
                parsed.arg,
                parsed.motion_repeat.max(1),
                editor,
                config,
                cursor,
            )?;
            compiled.lines = (compiled.range.start.line, compiled.range.end.line);
        }
        None => {}
    }
    Some(compiled)
}

fn resolve_motion(
    capability: &Capability,
    arg: Option<char>,
    repeat: u32,
    editor: &dyn Editor,
    config: &Config,
    from: Position,
) -> Option<Range> {
    let step = |pos: Position| -> Option<Range> {
        match *capability {
            Capability::MotionNoArg(f) => Some(f(editor, config, pos)),
            Capability::MotionWithArg(f) => arg.map(|a| f(editor, config, pos, a)),
            _ => None,
        }
    };

    let mut span = step(from)?;
    let mut pos = from;
    let mut current = span;
    for _ in 1..repeat {
        // continue from the far end of the previous application
        let next_from = if current.start == pos {
            current.end
        } else {
            current.start
        };
        if next_from == pos {
            break;
        }
        pos = next_from;
        current = step(pos)?;
        span = Range::new(span.start.min(current.start), span.end.max(current.end));
    }
    Some(span)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::TextBuffer;

    fn compile_at(text: &str, cursor: Position, parsed: &ParsedCommand) -> Option<CompiledCommand> {
        let mut buf = TextBuffer::from_text(text);
        buf.set_cursor(cursor);
        let config = Config::default();
        let registry = Registry::new(&config);
        let state = ModalState::new(&config.escape_sequence);
        compile(parsed, &buf, &state, &registry, &config)
    }

    fn with_motion(op: char, motion: char, motion_repeat: u32) -> ParsedCommand {
        let mut parsed = ParsedCommand::new(op);
        parsed.motion = Some(motion);
        parsed.motion_repeat = motion_repeat;
        parsed
    }

    #[test]
    fn test_unknown_operator_does_not_compile() {
        assert!(compile_at("abc", Position::new(0, 0), &ParsedCommand::new('q')).is_none());
    }

    #[test]
    fn test_no_arg_operator_gets_point_range() {
        let compiled = compile_at("abc", Position::new(0, 1), &ParsedCommand::new('x')).unwrap();
        assert_eq!(compiled.range, Range::point(Position::new(0, 1)));
        assert_eq!(compiled.repeat, 1);
        assert!(!compiled.line_wise);
    }

    #[test]
    fn test_whole_line_motion() {
        let compiled = compile_at("a\nbb\nc", Position::new(1, 1), &with_motion('d', 'd', 1)).unwrap();
        assert!(compiled.line_wise);
        assert_eq!(
            compiled.range,
            Range::new(Position::new(1, 0), Position::new(2, 0))
        );
        assert_eq!(compiled.lines, (1, 1));
    }

    #[test]
    fn test_whole_line_span_on_last_line_with_empty_first_line() {
        let compiled = compile_at("\nb", Position::new(1, 0), &with_motion('d', 'd', 1)).unwrap();
        assert_eq!(
            compiled.range,
            Range::new(Position::new(0, 0), Position::new(1, 1))
        );
        assert_eq!(compiled.lines, (1, 1));
    }

    #[test]
    fn test_visual_line_span_keeps_empty_first_line() {
        let config = Config::default();
        let registry = Registry::new(&config);
        let mut buf = TextBuffer::from_text("\nb");
        let mut state = ModalState::new("jk");
        state.set_mode(&mut buf, EditorMode::Visual, true);
        state.notice_move(&mut buf, Position::new(1, 0));

        let compiled = compile(&ParsedCommand::new('y'), &buf, &state, &registry, &config).unwrap();
        assert!(compiled.line_wise);
        assert_eq!(compiled.lines, (0, 1));
    }

    #[test]
    fn test_motion_repeat_chains_from_endpoint() {
        let compiled = compile_at("one two three four", Position::new(0, 0), &with_motion('d', 'w', 3)).unwrap();
        assert_eq!(
            compiled.range,
            Range::new(Position::new(0, 0), Position::new(0, 14))
        );
    }

    #[test]
    fn test_backward_motion_repeat_extends_backward() {
        let compiled = compile_at("one two three", Position::new(0, 13), &with_motion('d', 'b', 2)).unwrap();
        assert_eq!(
            compiled.range,
            Range::new(Position::new(0, 4), Position::new(0, 13))
        );
    }

    #[test]
    fn test_motion_with_missing_arg_does_not_compile() {
        assert!(compile_at("a,b", Position::new(0, 0), &with_motion('d', 'f', 1)).is_none());
    }

    #[test]
    fn test_unknown_motion_does_not_compile() {
        assert!(compile_at("abc", Position::new(0, 0), &with_motion('d', 'q', 1)).is_none());
    }

    #[test]
    fn test_find_motion_with_arg() {
        let mut parsed = with_motion('d', 'f', 1);
        parsed.arg = Some(',');
        let compiled = compile_at("ab,cd", Position::new(0, 0), &parsed).unwrap();
        assert_eq!(
            compiled.range,
            Range::new(Position::new(0, 0), Position::new(0, 2))
        );
    }

    #[test]
    fn test_virtual_command_runs_once() {
        let mut parsed = ParsedCommand::new('.');
        parsed.is_virtual = true;
        parsed.operator_repeat = 7;
        let compiled = compile_at("abc", Position::new(0, 0), &parsed).unwrap();
        assert_eq!(compiled.repeat, 1);
        assert_eq!(compiled.kind, ActionKind::Virtual);
    }

    #[test]
    fn test_visual_selection_overrides_motion() {
        let config = Config::default();
        let registry = Registry::new(&config);
        let mut buf = TextBuffer::from_text("hello world");
        buf.set_cursor(Position::new(0, 2));
        let mut state = ModalState::new("jk");
        state.set_mode(&mut buf, EditorMode::Visual, false);
        state.notice_move(&mut buf, Position::new(0, 7));

        let mut parsed = ParsedCommand::new('d');
        parsed.operator_repeat = 5;
        let compiled = compile(&parsed, &buf, &state, &registry, &config).unwrap();
        assert_eq!(compiled.repeat, 1);
        assert_eq!(
            compiled.range,
            Range::new(Position::new(0, 2), Position::new(0, 7))
        );
    }
}
