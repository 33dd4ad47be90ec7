//! Keystroke scripts for headless runs.
//!
//! A script is plain text fed to the interpreter as typed keys, with two
//! escapes: `<esc>` forces NORMAL mode and `<cr>` types a newline.

use crate::command::Interpreter;
use crate::document::TextBuffer;

/// One step of a parsed script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptStep {
    Keys(String),
    Escape,
}

/// Splits `script` into key runs and escapes.
///
/// # Example
///
/// ```
/// use keyquill::input::script::{parse_key_script, ScriptStep};
///
/// let steps = parse_key_script("ihi<esc>x");
/// assert_eq!(
///     steps,
///     vec![
///         ScriptStep::Keys("ihi".to_string()),
///         ScriptStep::Escape,
///         ScriptStep::Keys("x".to_string()),
///     ]
/// );
/// ```
pub fn parse_key_script(script: &str) -> Vec<ScriptStep> {
    let mut steps = Vec::new();
    let mut keys = String::new();
    let mut rest = script;

    while let Some(c) = rest.chars().next() {
        let lower = rest.get(..5).map(str::to_ascii_lowercase);
        if lower.as_deref() == Some("<esc>") {
            if !keys.is_empty() {
                steps.push(ScriptStep::Keys(std::mem::take(&mut keys)));
            }
            steps.push(ScriptStep::Escape);
            rest = &rest[5..];
        } else if rest.get(..4).map(str::to_ascii_lowercase).as_deref() == Some("<cr>") {
            keys.push('\n');
            rest = &rest[4..];
        } else {
            keys.push(c);
            rest = &rest[c.len_utf8()..];
        }
    }
    if !keys.is_empty() {
        steps.push(ScriptStep::Keys(keys));
    }
    steps
}

/// Feeds `script` to `interpreter` against `buffer`.
pub fn run_key_script(interpreter: &mut Interpreter, buffer: &mut TextBuffer, script: &str) {
    for step in parse_key_script(script) {
        log::debug!("script step {:?}", step);
        match step {
            ScriptStep::Keys(keys) => interpreter.handle_keystroke(Some(&mut *buffer), &keys),
            ScriptStep::Escape => interpreter.force_normal_mode(Some(&mut *buffer)),
        }
    }
}
