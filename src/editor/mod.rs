//! Editor-facing state and the host capability trait.
//!
//! # Modules
//!
//! - `host`: the [`host::Editor`] trait the interpreter drives, plus buffer helpers
//! - `position`: positions, ranges and selections
//! - `mode`: NORMAL, INSERT and VISUAL
//! - `state`: the mode controller
//! - `registers`: the single yank/delete register
//! - `repeat`: last command per mode for `.`
//! - `undo`: snapshot history used by the reference buffer
//!
//! # Example
//!
//! ```
//! use keyquill::editor::mode::EditorMode;
//!
//! let mode = EditorMode::default();
//! assert_eq!(mode, EditorMode::Normal);
//! ```

pub mod host;
pub mod mode;
pub mod position;
pub mod registers;
pub mod repeat;
pub mod state;
pub mod undo;
