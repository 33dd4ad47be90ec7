//! File I/O for text documents.
//!
//! This module loads text files (or piped stdin) into a [`crate::document::TextBuffer`]
//! and writes buffers back with an atomic temp-file-and-rename.

pub mod loader;
pub mod saver;
