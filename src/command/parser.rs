//! Incremental keystroke parsers, one per mode.
//!
//! Each parser consumes a single char per call and either keeps the partial
//! command buffered (returning `None`) or emits a complete command and resets.
//! Classification is table-driven through [`Registry`]: the parsers decide
//! how many more keys a command needs purely from the arity of the entry the
//! key resolves to.
//!
//! ```text
//!   2  d  3  w        -> operator 'd' x2, motion 'w' x3
//!   d  d              -> operator 'd', motion 'd' (whole line)
//!   r  x              -> operator 'r', arg 'x'
//!   d  f  ,           -> operator 'd', motion 'f', arg ','
//! ```

use super::registry::{Capability, Registry};

/// Largest repeat count a parser will accumulate.
pub const MAX_COUNT: u32 = 99_999;

/// A fully parsed command.
///
/// `motion` is only set for range-taking operators; a motion equal to the
/// operator char means "the whole current line". Counts default to 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand {
    pub operator: char,
    pub motion: Option<char>,
    pub operator_repeat: u32,
    pub motion_repeat: u32,
    pub arg: Option<char>,
    pub is_virtual: bool,
}

impl ParsedCommand {
    /// A bare command with default counts.
    pub fn new(operator: char) -> Self {
        Self {
            operator,
            motion: None,
            operator_repeat: 1,
            motion_repeat: 1,
            arg: None,
            is_virtual: false,
        }
    }

    /// True when the motion is the operator repeated (`dd`, `yy`, `>>`).
    pub fn is_whole_line(&self) -> bool {
        self.motion == Some(self.operator)
    }
}

/// Digit accumulator: the first digit must be non-zero.
#[derive(Debug, Clone, Default)]
struct Count(Option<u32>);

impl Count {
    fn accept(&mut self, c: char) -> bool {
        let Some(digit) = c.to_digit(10) else {
            return false;
        };
        match self.0 {
            None if digit == 0 => false,
            None => {
                self.0 = Some(digit);
                true
            }
            Some(n) => {
                self.0 = Some((n * 10 + digit).min(MAX_COUNT));
                true
            }
        }
    }

    fn value(&self) -> u32 {
        self.0.unwrap_or(1)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum ParseState {
    #[default]
    ReadingOperator,
    ReadingMotion,
    ReadingArg,
}

/// Parser for NORMAL mode: `[count] operator [[count] motion] [arg]`.
#[derive(Debug, Clone, Default)]
pub struct NormalParser {
    state: ParseState,
    operator: Option<char>,
    motion: Option<char>,
    operator_count: Count,
    motion_count: Count,
    keys: String,
}

impl NormalParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Keys buffered towards the next command.
    pub fn pending(&self) -> &str {
        &self.keys
    }

    /// Feeds one keystroke. Unrecognised keys leave the buffered state alone.
    pub fn parse(&mut self, c: char, registry: &Registry) -> Option<ParsedCommand> {
        match self.state {
            ParseState::ReadingOperator => {
                if self.operator_count.accept(c) {
                    self.keys.push(c);
                    return None;
                }
                let binding = registry.operator(c)?;
                self.operator = Some(c);
                self.keys.push(c);
                match binding.capability {
                    Capability::OperatorNoArg(_) => Some(self.emit(false)),
                    Capability::Virtual(_) => Some(self.emit(true)),
                    Capability::OperatorWithRange(_) => {
                        self.state = ParseState::ReadingMotion;
                        None
                    }
                    Capability::OperatorWithArg(_) => {
                        self.state = ParseState::ReadingArg;
                        None
                    }
                    Capability::MotionNoArg(_) | Capability::MotionWithArg(_) => {
                        self.operator = None;
                        self.keys.pop();
                        None
                    }
                }
            }
            ParseState::ReadingMotion => {
                if self.motion_count.accept(c) {
                    self.keys.push(c);
                    return None;
                }
                if self.operator == Some(c) {
                    self.motion = Some(c);
                    return Some(self.emit(false));
                }
                match registry.motion(c)? {
                    Capability::MotionNoArg(_) => {
                        self.motion = Some(c);
                        Some(self.emit(false))
                    }
                    Capability::MotionWithArg(_) => {
                        self.motion = Some(c);
                        self.keys.push(c);
                        self.state = ParseState::ReadingArg;
                        None
                    }
                    _ => None,
                }
            }
            ParseState::ReadingArg => {
                let mut command = self.emit(false);
                command.arg = Some(c);
                Some(command)
            }
        }
    }

    fn emit(&mut self, is_virtual: bool) -> ParsedCommand {
        let command = ParsedCommand {
            operator: self.operator.unwrap_or_default(),
            motion: self.motion,
            operator_repeat: self.operator_count.value(),
            motion_repeat: self.motion_count.value(),
            arg: None,
            is_virtual,
        };
        log::trace!("normal parser emitted {:?}", command);
        self.reset();
        command
    }
}

/// Parser for VISUAL mode: `[count] operator [arg]`.
///
/// Range-taking operators emit immediately because the selection supplies
/// the range.
#[derive(Debug, Clone, Default)]
pub struct VisualParser {
    awaiting_arg: bool,
    operator: Option<char>,
    count: Count,
    keys: String,
}

impl VisualParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn pending(&self) -> &str {
        &self.keys
    }

    pub fn parse(&mut self, c: char, registry: &Registry) -> Option<ParsedCommand> {
        if self.awaiting_arg {
            let mut command = self.emit(false);
            command.arg = Some(c);
            return Some(command);
        }
        if self.count.accept(c) {
            self.keys.push(c);
            return None;
        }
        let binding = registry.operator(c)?;
        self.operator = Some(c);
        match binding.capability {
            Capability::OperatorNoArg(_) | Capability::OperatorWithRange(_) => {
                Some(self.emit(false))
            }
            Capability::Virtual(_) => Some(self.emit(true)),
            Capability::OperatorWithArg(_) => {
                self.keys.push(c);
                self.awaiting_arg = true;
                None
            }
            Capability::MotionNoArg(_) | Capability::MotionWithArg(_) => {
                self.operator = None;
                None
            }
        }
    }

    fn emit(&mut self, is_virtual: bool) -> ParsedCommand {
        let mut command = ParsedCommand::new(self.operator.unwrap_or_default());
        command.operator_repeat = self.count.value();
        command.is_virtual = is_virtual;
        log::trace!("visual parser emitted {:?}", command);
        self.reset();
        command
    }
}

/// Matcher for the multi-char INSERT mode escape sequence.
///
/// A char that breaks the prefix clears the buffer without being
/// reconsidered as the start of a new match.
#[derive(Debug, Clone)]
pub struct InsertParser {
    buffer: String,
    escape: String,
}

impl InsertParser {
    pub fn new(escape: &str) -> Self {
        Self {
            buffer: String::new(),
            escape: escape.to_string(),
        }
    }

    pub fn reset(&mut self) {
        self.buffer.clear();
    }

    pub fn escape(&self) -> &str {
        &self.escape
    }

    /// Number of chars in the escape sequence.
    pub fn escape_len(&self) -> usize {
        self.escape.chars().count()
    }

    /// Feeds one char; returns true once the whole sequence has been typed.
    /// The caller resets the parser after a match.
    pub fn parse(&mut self, c: char) -> bool {
        if self.escape.is_empty() {
            return false;
        }
        self.buffer.push(c);
        if self.escape.starts_with(self.buffer.as_str()) {
            self.escape == self.buffer
        } else {
            self.buffer.clear();
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn registry() -> Registry {
        Registry::new(&Config::default())
    }

    fn feed(parser: &mut NormalParser, keys: &str) -> Vec<ParsedCommand> {
        let registry = registry();
        keys.chars()
            .filter_map(|c| parser.parse(c, &registry))
            .collect()
    }

    #[test]
    fn test_operator_no_arg_emits_immediately() {
        let mut parser = NormalParser::new();
        let out = feed(&mut parser, "x");
        assert_eq!(out, vec![ParsedCommand::new('x')]);
        assert_eq!(parser.pending(), "");
    }

    #[test]
    fn test_count_prefix() {
        let mut parser = NormalParser::new();
        let out = feed(&mut parser, "120x");
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].operator_repeat, 120);
        assert_eq!(out[0].operator, 'x');
    }

    #[test]
    fn test_leading_zero_is_not_a_count() {
        let mut parser = NormalParser::new();
        let out = feed(&mut parser, "0x");
        assert_eq!(out[0].operator_repeat, 1);
    }

    #[test]
    fn test_count_is_capped() {
        let mut parser = NormalParser::new();
        let out = feed(&mut parser, "9999999x");
        assert_eq!(out[0].operator_repeat, MAX_COUNT);
    }

    #[test]
    fn test_operator_with_motion() {
        let mut parser = NormalParser::new();
        let out = feed(&mut parser, "2d3w");
        assert_eq!(out.len(), 1);
        let cmd = &out[0];
        assert_eq!(cmd.operator, 'd');
        assert_eq!(cmd.motion, Some('w'));
        assert_eq!(cmd.operator_repeat, 2);
        assert_eq!(cmd.motion_repeat, 3);
        assert_eq!(cmd.arg, None);
    }

    #[test]
    fn test_operator_pending_shows_keys() {
        let mut parser = NormalParser::new();
        assert!(feed(&mut parser, "2d3").is_empty());
        assert_eq!(parser.pending(), "2d3");
    }

    #[test]
    fn test_doubled_operator_is_whole_line() {
        let mut parser = NormalParser::new();
        let out = feed(&mut parser, "yy");
        assert!(out[0].is_whole_line());
        assert_eq!(out[0].motion_repeat, 1);
    }

    #[test]
    fn test_motion_with_arg() {
        let mut parser = NormalParser::new();
        let out = feed(&mut parser, "df,");
        assert_eq!(out[0].motion, Some('f'));
        assert_eq!(out[0].arg, Some(','));
    }

    #[test]
    fn test_operator_with_arg_takes_any_char() {
        let mut parser = NormalParser::new();
        let out = feed(&mut parser, "r7");
        assert_eq!(out[0].operator, 'r');
        assert_eq!(out[0].arg, Some('7'));
        assert_eq!(out[0].operator_repeat, 1);
    }

    #[test]
    fn test_virtual_command() {
        let mut parser = NormalParser::new();
        let out = feed(&mut parser, ".");
        assert!(out[0].is_virtual);
        assert_eq!(out[0].operator, '.');
    }

    #[test]
    fn test_unknown_key_keeps_buffered_state() {
        let mut parser = NormalParser::new();
        // 'Q' is not an operator; 'q' is not a motion
        let out = feed(&mut parser, "3Qd2qw");
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].operator_repeat, 3);
        assert_eq!(out[0].motion_repeat, 2);
        assert_eq!(out[0].motion, Some('w'));
    }

    #[test]
    fn test_parser_resets_between_commands() {
        let mut parser = NormalParser::new();
        let out = feed(&mut parser, "3xdw");
        assert_eq!(out.len(), 2);
        assert_eq!(out[1].operator_repeat, 1);
        assert_eq!(out[1].motion_repeat, 1);
    }

    #[test]
    fn test_visual_parser_range_operator_emits_immediately() {
        let registry = registry();
        let mut parser = VisualParser::new();
        assert_eq!(parser.parse('d', &registry), Some(ParsedCommand::new('d')));
    }

    #[test]
    fn test_visual_parser_arg_operator() {
        let registry = registry();
        let mut parser = VisualParser::new();
        assert!(parser.parse('2', &registry).is_none());
        assert!(parser.parse('r', &registry).is_none());
        let cmd = parser.parse('z', &registry).unwrap();
        assert_eq!(cmd.operator, 'r');
        assert_eq!(cmd.arg, Some('z'));
        assert_eq!(cmd.operator_repeat, 2);
    }

    #[test]
    fn test_insert_parser_matches_full_sequence() {
        let mut parser = InsertParser::new("jk");
        assert!(!parser.parse('j'));
        assert!(parser.parse('k'));
    }

    #[test]
    fn test_insert_parser_breaking_char_is_not_reconsidered() {
        let mut parser = InsertParser::new("jk");
        assert!(!parser.parse('j'));
        // "jj" breaks the prefix; the second 'j' does not start a new match
        assert!(!parser.parse('j'));
        assert!(!parser.parse('k'));
    }

    #[test]
    fn test_insert_parser_empty_escape_never_matches() {
        let mut parser = InsertParser::new("");
        assert!(!parser.parse('j'));
    }
}
