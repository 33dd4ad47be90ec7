//! Repeatable command tracking for the '.' key.
//!
//! The last recorded command is kept per mode and stored as the *parsed*
//! command, not the compiled one, so a repeat re-resolves its range against
//! the cursor at the time it is replayed.

use super::mode::EditorMode;
use crate::command::parser::ParsedCommand;

/// Last repeatable command for NORMAL and VISUAL mode.
#[derive(Debug, Clone, Default)]
pub struct RepeatSlots {
    normal: Option<ParsedCommand>,
    visual: Option<ParsedCommand>,
}

impl RepeatSlots {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `command` for `mode`. Virtual commands and INSERT mode are ignored.
    pub fn record(&mut self, mode: EditorMode, command: &ParsedCommand) {
        if command.is_virtual {
            return;
        }
        match mode {
            EditorMode::Normal => self.normal = Some(command.clone()),
            EditorMode::Visual => self.visual = Some(command.clone()),
            EditorMode::Insert => {}
        }
    }

    pub fn last(&self, mode: EditorMode) -> Option<&ParsedCommand> {
        match mode {
            EditorMode::Normal => self.normal.as_ref(),
            EditorMode::Visual => self.visual.as_ref(),
            EditorMode::Insert => None,
        }
    }
}
