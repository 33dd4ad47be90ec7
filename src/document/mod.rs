//! The in-memory document the terminal front-end edits.
//!
//! [`TextBuffer`] is the reference implementation of the
//! [`crate::editor::host::Editor`] trait: plain lines of text plus a
//! selection, undo history, viewport and clipboard.

pub mod buffer;

pub use buffer::TextBuffer;
