//! Trigger-character tables for operators and motions.
//!
//! A char can appear in both tables: `w` in operator position moves the
//! cursor, `w` after `d` supplies the range. The operator table also holds
//! the configured host-command bindings, which override a built-in entry for
//! the same char.

use super::action::{self, Action};
use super::motion;
use crate::config::Config;
use crate::editor::host::Editor;
use crate::editor::position::{Position, Range};
use std::collections::HashMap;
use std::fmt;

/// Motion without an argument: range from the start position to its target.
pub type MotionFn = fn(&dyn Editor, &Config, Position) -> Range;

/// Motion taking one literal char.
pub type MotionArgFn = fn(&dyn Editor, &Config, Position, char) -> Range;

/// What a trigger char resolves to, tagged by arity.
#[derive(Clone, Copy)]
pub enum Capability {
    MotionNoArg(MotionFn),
    MotionWithArg(MotionArgFn),
    OperatorNoArg(Action),
    OperatorWithRange(Action),
    OperatorWithArg(Action),
    Virtual(Action),
}

impl Capability {
    /// The action run for an operator entry.
    pub fn action(&self) -> Option<Action> {
        match *self {
            Capability::OperatorNoArg(f)
            | Capability::OperatorWithRange(f)
            | Capability::OperatorWithArg(f)
            | Capability::Virtual(f) => Some(f),
            Capability::MotionNoArg(_) | Capability::MotionWithArg(_) => None,
        }
    }

    pub fn needs_range(&self) -> bool {
        matches!(self, Capability::OperatorWithRange(_))
    }
}

impl fmt::Debug for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Capability::MotionNoArg(_) => "MotionNoArg",
            Capability::MotionWithArg(_) => "MotionWithArg",
            Capability::OperatorNoArg(_) => "OperatorNoArg",
            Capability::OperatorWithRange(_) => "OperatorWithRange",
            Capability::OperatorWithArg(_) => "OperatorWithArg",
            Capability::Virtual(_) => "Virtual",
        };
        f.write_str(name)
    }
}

/// How an operator relates to mode and repeat handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    /// Only moves the cursor; extends the selection in VISUAL mode.
    Movement,
    /// Enters or leaves a mode itself.
    Mode,
    /// Changes text or host state; recorded for dot-repeat and ends VISUAL mode.
    Edit,
    /// Dot-repeat.
    Virtual,
}

/// An operator table entry.
#[derive(Debug, Clone, Copy)]
pub struct Binding {
    pub capability: Capability,
    pub kind: ActionKind,
}

macro_rules! span {
    ($name:ident, $step:path) => {
        fn $name(editor: &dyn Editor, config: &Config, pos: Position) -> Range {
            Range::new(pos, $step(editor, config, pos))
        }
    };
    ($name:ident, $step:path, arg) => {
        fn $name(editor: &dyn Editor, config: &Config, pos: Position, arg: char) -> Range {
            Range::new(pos, $step(editor, config, pos, arg))
        }
    };
}

span!(word_forward_span, motion::next_word);
span!(word_backward_span, motion::previous_word);
span!(left_span, motion::left_char);
span!(right_span, motion::right_char);
span!(up_span, motion::up_char);
span!(down_span, motion::down_char);
span!(line_start_span, motion::start_of_line);
span!(line_end_span, motion::end_of_line);
span!(page_down_span, motion::down_page);
span!(page_up_span, motion::up_page);
span!(find_forward_span, motion::next_char_on_line, arg);
span!(find_backward_span, motion::previous_char_on_line, arg);

/// The operator and motion tables plus host-command bindings.
#[derive(Debug, Clone)]
pub struct Registry {
    operators: HashMap<char, Binding>,
    motions: HashMap<char, Capability>,
    host_commands: HashMap<char, Vec<String>>,
}

impl Registry {
    /// Builds the built-in tables and layers `config.command_bindings` on top.
    pub fn new(config: &Config) -> Self {
        use ActionKind::{Edit, Mode, Movement};
        use Capability::{OperatorNoArg, OperatorWithArg, OperatorWithRange};

        let mut registry = Self {
            operators: HashMap::new(),
            motions: HashMap::new(),
            host_commands: HashMap::new(),
        };

        registry.add_operator('i', OperatorNoArg(action::insert_before), Mode);
        registry.add_operator('a', OperatorNoArg(action::append_after), Mode);
        registry.add_operator('I', OperatorNoArg(action::insert_line_start), Mode);
        registry.add_operator('A', OperatorNoArg(action::append_line_end), Mode);
        registry.add_operator('o', OperatorNoArg(action::open_line_below), Edit);
        registry.add_operator('O', OperatorNoArg(action::open_line_above), Edit);
        registry.add_operator('v', OperatorNoArg(action::visual_char), Mode);
        registry.add_operator('V', OperatorNoArg(action::visual_line), Mode);
        registry.add_operator('h', OperatorNoArg(action::move_left), Movement);
        registry.add_operator('j', OperatorNoArg(action::move_down), Movement);
        registry.add_operator('k', OperatorNoArg(action::move_up), Movement);
        registry.add_operator('l', OperatorNoArg(action::move_right), Movement);
        registry.add_operator('w', OperatorNoArg(action::move_word_forward), Movement);
        registry.add_operator('b', OperatorNoArg(action::move_word_backward), Movement);
        registry.add_operator('s', OperatorNoArg(action::move_line_start), Movement);
        registry.add_operator('e', OperatorNoArg(action::move_line_end), Movement);
        registry.add_operator('D', OperatorNoArg(action::move_page_down), Movement);
        registry.add_operator('U', OperatorNoArg(action::move_page_up), Movement);
        registry.add_operator('x', OperatorNoArg(action::delete_char), Edit);
        registry.add_operator('p', OperatorNoArg(action::paste_after), Edit);
        registry.add_operator('P', OperatorNoArg(action::paste_before), Edit);

        registry.add_operator('d', OperatorWithRange(action::delete_range), Edit);
        registry.add_operator('y', OperatorWithRange(action::yank_range), Edit);
        registry.add_operator('c', OperatorWithRange(action::change_range), Edit);
        registry.add_operator('>', OperatorWithRange(action::indent_range), Edit);
        registry.add_operator('<', OperatorWithRange(action::dedent_range), Edit);

        registry.add_operator('f', OperatorWithArg(action::find_forward), Movement);
        registry.add_operator('F', OperatorWithArg(action::find_backward), Movement);
        registry.add_operator('r', OperatorWithArg(action::replace_char), Edit);
        registry.add_operator('z', OperatorWithArg(action::scroll_line), Movement);

        registry.add_operator('.', Capability::Virtual(action::repeat_last), ActionKind::Virtual);

        registry.add_motion('w', Capability::MotionNoArg(word_forward_span));
        registry.add_motion('b', Capability::MotionNoArg(word_backward_span));
        registry.add_motion('h', Capability::MotionNoArg(left_span));
        registry.add_motion('j', Capability::MotionNoArg(down_span));
        registry.add_motion('k', Capability::MotionNoArg(up_span));
        registry.add_motion('l', Capability::MotionNoArg(right_span));
        registry.add_motion('e', Capability::MotionNoArg(line_end_span));
        registry.add_motion('s', Capability::MotionNoArg(line_start_span));
        registry.add_motion('D', Capability::MotionNoArg(page_down_span));
        registry.add_motion('U', Capability::MotionNoArg(page_up_span));
        registry.add_motion('f', Capability::MotionWithArg(find_forward_span));
        registry.add_motion('F', Capability::MotionWithArg(find_backward_span));
        registry.add_motion('i', Capability::MotionWithArg(motion::inner));

        for (key, commands) in &config.command_bindings {
            let mut chars = key.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => {
                    registry.add_operator(c, OperatorNoArg(action::run_host_commands), Edit);
                    registry.host_commands.insert(c, commands.clone());
                }
                _ => log::warn!("ignoring command binding {:?}: key must be one character", key),
            }
        }

        registry
    }

    fn add_operator(&mut self, c: char, capability: Capability, kind: ActionKind) {
        self.operators.insert(c, Binding { capability, kind });
    }

    fn add_motion(&mut self, c: char, capability: Capability) {
        self.motions.insert(c, capability);
    }

    /// The entry for `c` in operator position.
    pub fn operator(&self, c: char) -> Option<&Binding> {
        self.operators.get(&c)
    }

    /// The entry for `c` in motion position.
    pub fn motion(&self, c: char) -> Option<&Capability> {
        self.motions.get(&c)
    }

    /// Host commands bound to `c`; empty when unbound.
    pub fn host_commands(&self, c: char) -> &[String] {
        self.host_commands.get(&c).map(Vec::as_slice).unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_char_can_be_operator_and_motion() {
        let registry = Registry::new(&Config::default());
        assert!(matches!(
            registry.operator('w').unwrap().capability,
            Capability::OperatorNoArg(_)
        ));
        assert!(matches!(
            registry.motion('w'),
            Some(Capability::MotionNoArg(_))
        ));
    }

    #[test]
    fn test_arity_classification() {
        let registry = Registry::new(&Config::default());
        assert!(registry.operator('d').unwrap().capability.needs_range());
        assert!(matches!(
            registry.operator('r').unwrap().capability,
            Capability::OperatorWithArg(_)
        ));
        assert!(matches!(
            registry.operator('.').unwrap().capability,
            Capability::Virtual(_)
        ));
        assert!(matches!(
            registry.motion('i'),
            Some(Capability::MotionWithArg(_))
        ));
        assert!(registry.motion('d').is_none());
        assert!(registry.operator('q').is_none());
    }

    #[test]
    fn test_kinds() {
        let registry = Registry::new(&Config::default());
        assert_eq!(registry.operator('j').unwrap().kind, ActionKind::Movement);
        assert_eq!(registry.operator('i').unwrap().kind, ActionKind::Mode);
        assert_eq!(registry.operator('d').unwrap().kind, ActionKind::Edit);
    }

    #[test]
    fn test_command_bindings_override_and_ignore_bad_keys() {
        let mut bindings = BTreeMap::new();
        bindings.insert("x".to_string(), vec!["one".to_string(), "two".to_string()]);
        bindings.insert("zz".to_string(), vec!["ignored".to_string()]);
        let config = Config {
            command_bindings: bindings,
            ..Config::default()
        };
        let registry = Registry::new(&config);

        assert_eq!(registry.host_commands('x'), ["one", "two"]);
        assert!(registry.host_commands('z').is_empty());
        assert_eq!(registry.operator('x').unwrap().kind, ActionKind::Edit);
    }
}
