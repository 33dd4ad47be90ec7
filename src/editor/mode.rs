//! Editor mode management for modal editing.
//!
//! This module provides the `EditorMode` enum that represents the current editing
//! mode. Following vim-style modal editing, the interpreter is always in exactly
//! one of three modes, and each mode routes keystrokes to its own parser.
//!
//! # Modes
//!
//! - **Normal**: The default mode; keys are parsed as counts, operators and motions
//! - **Insert**: Keys are inserted as text until the escape sequence is typed
//! - **Visual**: Motions extend a selection, operators act on it
//!
//! Whether a visual selection is line-wise is tracked separately by the mode
//! controller ([`crate::editor::state::ModalState`]).
//!
//! # Example
//!
//! ```
//! use keyquill::editor::mode::EditorMode;
//!
//! // Interpreter starts in Normal mode by default
//! let mode = EditorMode::default();
//! assert_eq!(mode, EditorMode::Normal);
//! assert_eq!(format!("{}", mode), "NORMAL");
//!
//! let mode = EditorMode::Insert;
//! assert_eq!(format!("{}", mode), "INSERT");
//! ```

use std::fmt;

/// Represents the current editing mode of the interpreter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EditorMode {
    /// Normal mode for commands and navigation.
    #[default]
    Normal,
    /// Insert mode; keystrokes become text.
    Insert,
    /// Visual mode for selecting text.
    Visual,
}

impl EditorMode {
    /// Returns the status line label, distinguishing line-wise visual mode.
    ///
    /// ```
    /// use keyquill::editor::mode::EditorMode;
    ///
    /// assert_eq!(EditorMode::Visual.label(true), "VISUAL LINE");
    /// assert_eq!(EditorMode::Visual.label(false), "VISUAL");
    /// assert_eq!(EditorMode::Normal.label(true), "NORMAL");
    /// ```
    pub fn label(&self, visual_line_wise: bool) -> &'static str {
        match self {
            EditorMode::Normal => "NORMAL",
            EditorMode::Insert => "INSERT",
            EditorMode::Visual if visual_line_wise => "VISUAL LINE",
            EditorMode::Visual => "VISUAL",
        }
    }
}

impl fmt::Display for EditorMode {
    /// Formats the mode as an uppercase string suitable for display in the status bar.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label(false))
    }
}
