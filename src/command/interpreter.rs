//! Keystroke entry point and command dispatch.
//!
//! [`Interpreter`] routes each typed char to the parser for the current mode,
//! records repeatable commands and runs the repeat loop. In INSERT mode chars
//! are typed into the buffer and watched for the escape sequence.

use super::action::ActionContext;
use super::compiler::{compile, CompiledCommand};
use super::parser::ParsedCommand;
use super::registry::{ActionKind, Registry};
use crate::config::Config;
use crate::editor::host::{end_of_insertion, step_back, CursorStyle, Editor, TextEdit};
use crate::editor::mode::EditorMode;
use crate::editor::position::Range;
use crate::editor::registers::Register;
use crate::editor::state::{Message, MessageLevel, ModalState};
use anyhow::Result;

/// The modal keystroke interpreter.
#[derive(Debug, Clone)]
pub struct Interpreter {
    state: ModalState,
    registry: Registry,
    config: Config,
    enabled: bool,
}

impl Interpreter {
    pub fn new(config: Config) -> Self {
        Self {
            state: ModalState::new(&config.escape_sequence),
            registry: Registry::new(&config),
            config,
            enabled: true,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn state(&self) -> &ModalState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut ModalState {
        &mut self.state
    }

    pub fn mode(&self) -> EditorMode {
        self.state.mode()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn register(&self) -> &Register {
        self.state.register()
    }

    pub fn message(&self) -> Option<&Message> {
        self.state.message()
    }

    /// True while a partial command is buffered.
    pub fn has_pending_input(&self) -> bool {
        !self.state.pending_keys().is_empty()
    }

    /// Handles typed text one char at a time.
    ///
    /// Without an active editor the input is dropped. While disabled the text
    /// is inserted literally.
    pub fn handle_keystroke(&mut self, editor: Option<&mut dyn Editor>, input: &str) {
        let Some(editor) = editor else {
            log::trace!("no active editor, dropping {:?}", input);
            return;
        };
        if !self.enabled {
            if let Err(err) = type_text(editor, input) {
                self.report(&err);
            }
            return;
        }
        for c in input.chars() {
            self.handle_char(editor, c);
        }
    }

    /// Abandons any partial command and returns to NORMAL mode.
    pub fn force_normal_mode(&mut self, editor: Option<&mut dyn Editor>) {
        self.state.reset_parsers();
        if let Some(editor) = editor {
            self.state.resume_normal(editor);
            editor.end_undo_group();
        }
    }

    /// Switches interpretation off (keys type literally) or back on.
    pub fn toggle_enabled(&mut self, editor: Option<&mut dyn Editor>) {
        self.enabled = !self.enabled;
        log::info!("interpreter {}", if self.enabled { "enabled" } else { "disabled" });
        self.state.reset_parsers();
        if let Some(editor) = editor {
            editor.end_undo_group();
            if self.enabled {
                self.state.resume_normal(editor);
            } else {
                editor.set_cursor_style(CursorStyle::Line);
            }
        }
    }

    fn handle_char(&mut self, editor: &mut dyn Editor, c: char) {
        let parsed = match self.state.mode() {
            EditorMode::Insert => {
                self.handle_insert_char(editor, c);
                return;
            }
            EditorMode::Normal => self.state.normal_parser_mut().parse(c, &self.registry),
            EditorMode::Visual => self.state.visual_parser_mut().parse(c, &self.registry),
        };
        if let Some(parsed) = parsed {
            self.dispatch(editor, &parsed);
        }
    }

    fn handle_insert_char(&mut self, editor: &mut dyn Editor, c: char) {
        if let Err(err) = type_text(editor, &c.to_string()) {
            self.report(&err);
            return;
        }
        if !self.state.insert_parser_mut().parse(c) {
            return;
        }

        let escape_len = self.state.insert_parser_mut().escape_len();
        let end = editor.cursor();
        let start = step_back(editor, end, escape_len);
        if let Err(err) = editor.edit(&[TextEdit::Delete {
            range: Range::new(start, end),
        }]) {
            self.report(&err);
        }
        editor.set_cursor(start);
        self.state.resume_normal(editor);
        editor.end_undo_group();
    }

    fn dispatch(&mut self, editor: &mut dyn Editor, parsed: &ParsedCommand) {
        let mode = self.state.mode();
        let repeatable = self
            .registry
            .operator(parsed.operator)
            .is_some_and(|binding| binding.kind == ActionKind::Edit);
        if repeatable {
            self.state.record_command(mode, parsed);
        }
        self.state.clear_message();
        log::debug!("{} {:?}", mode, parsed);

        // a command and the INSERT session it opens undo together
        editor.begin_undo_group();
        run_parsed(parsed, editor, &mut self.state, &self.registry, &self.config);
        if self.state.mode() != EditorMode::Insert {
            editor.end_undo_group();
        }
    }

    fn report(&mut self, err: &anyhow::Error) {
        report_error(&mut self.state, err);
    }
}

/// Compiles and runs `parsed`, honoring its operator repeat count.
///
/// Each iteration after the first compiles the command again so it resolves
/// against the cursor left by the previous one. The loop stops early when a
/// run changes the mode, fails, or stops compiling.
pub fn run_parsed(
    parsed: &ParsedCommand,
    editor: &mut dyn Editor,
    state: &mut ModalState,
    registry: &Registry,
    config: &Config,
) {
    let Some(mut compiled) = compile(parsed, editor, state, registry, config) else {
        log::debug!("{:?} did not compile", parsed);
        return;
    };

    let start_mode = state.mode();
    for i in 0..compiled.repeat {
        if i > 0 {
            if state.mode() != start_mode {
                break;
            }
            match compile(parsed, editor, state, registry, config) {
                Some(next) => compiled = next,
                None => break,
            }
        }
        if let Err(err) = execute(&compiled, editor, state, registry, config) {
            report_error(state, &err);
            break;
        }
    }
}

fn execute(
    compiled: &CompiledCommand,
    editor: &mut dyn Editor,
    state: &mut ModalState,
    registry: &Registry,
    config: &Config,
) -> Result<()> {
    let result = {
        let mut ctx = ActionContext {
            editor: &mut *editor,
            state: &mut *state,
            registry,
            config,
            range: compiled.range,
            arg: compiled.arg,
            line_wise: compiled.line_wise,
            lines: compiled.lines,
            host_commands: &compiled.host_commands,
        };
        (compiled.action)(&mut ctx)
    };

    if compiled.kind == ActionKind::Edit && state.mode() == EditorMode::Visual {
        state.resume_normal(editor);
    }
    result
}

fn report_error(state: &mut ModalState, err: &anyhow::Error) {
    log::warn!("{:#}", err);
    state.set_message(format!("{:#}", err), MessageLevel::Error);
}

/// Inserts `text` at the cursor and moves the cursor past it.
fn type_text(editor: &mut dyn Editor, text: &str) -> Result<()> {
    let at = editor.cursor();
    editor.edit(&[TextEdit::Insert {
        at,
        text: text.to_string(),
    }])?;
    editor.set_cursor(end_of_insertion(at, text));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::TextBuffer;
    use crate::editor::position::Position;

    fn run(text: &str, keys: &str) -> (TextBuffer, Interpreter) {
        let mut buf = TextBuffer::from_text(text);
        let mut interp = Interpreter::new(Config::default());
        interp.handle_keystroke(Some(&mut buf), keys);
        (buf, interp)
    }

    #[test]
    fn test_no_editor_is_a_no_op() {
        let mut interp = Interpreter::new(Config::default());
        interp.handle_keystroke(None, "i");
        assert_eq!(interp.mode(), EditorMode::Normal);
    }

    #[test]
    fn test_insert_and_escape() {
        let (buf, interp) = run("", "ihellojk");
        assert_eq!(buf.text(), "hello");
        assert_eq!(interp.mode(), EditorMode::Normal);
    }

    #[test]
    fn test_insert_session_undoes_in_one_step() {
        let (buf, interp) = run("x", "ihijku");
        assert_eq!(buf.text(), "x");
        assert_eq!(interp.mode(), EditorMode::Normal);
    }

    #[test]
    fn test_counted_edit_undoes_in_one_step() {
        let (buf, _) = run("a\nb\nc\nd", "3ddu");
        assert_eq!(buf.text(), "a\nb\nc\nd");
    }

    #[test]
    fn test_count_stops_when_mode_changes() {
        let (buf, interp) = run("abc", "3cwXjk");
        assert_eq!(buf.text(), "X");
        assert_eq!(interp.mode(), EditorMode::Normal);
    }

    #[test]
    fn test_disabled_types_literally() {
        let mut buf = TextBuffer::from_text("");
        let mut interp = Interpreter::new(Config::default());
        interp.toggle_enabled(Some(&mut buf));
        interp.handle_keystroke(Some(&mut buf), "dd");
        assert_eq!(buf.text(), "dd");

        interp.toggle_enabled(Some(&mut buf));
        assert!(interp.is_enabled());
        assert_eq!(buf.cursor_style(), CursorStyle::Block);
    }

    #[test]
    fn test_force_normal_drops_partial_command() {
        let mut buf = TextBuffer::from_text("one\ntwo");
        let mut interp = Interpreter::new(Config::default());
        interp.handle_keystroke(Some(&mut buf), "2d");
        assert_eq!(interp.state().pending_keys(), "2d");

        interp.force_normal_mode(Some(&mut buf));
        assert_eq!(interp.state().pending_keys(), "");
        interp.handle_keystroke(Some(&mut buf), "j");
        assert_eq!(buf.text(), "one\ntwo");
        assert_eq!(buf.cursor(), Position::new(1, 0));
    }

    #[test]
    fn test_failed_host_command_reports_error() {
        let mut config = Config::default();
        config
            .command_bindings
            .insert("Q".to_string(), vec!["noSuchCommand".to_string()]);
        let mut buf = TextBuffer::from_text("x");
        let mut interp = Interpreter::new(config);
        interp.handle_keystroke(Some(&mut buf), "Q");

        let message = interp.state().message().unwrap();
        assert_eq!(message.level, MessageLevel::Error);
        assert!(message.text.contains("noSuchCommand"));
    }
}
