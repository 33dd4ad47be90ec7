//! Text file loading functionality.
//!
//! This module provides functions to load text from files or stdin into a
//! [`TextBuffer`] ready for editing.

use crate::document::TextBuffer;
use anyhow::{Context, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Loads a text file into a buffer named after `path`.
///
/// A file that does not exist yet yields an empty buffer carrying the name,
/// so the first save creates it. `\r\n` line endings are normalised to `\n`.
///
/// # Examples
///
/// ```no_run
/// use keyquill::file::loader::load_text_file;
///
/// let buffer = load_text_file("notes.txt").unwrap();
/// assert_eq!(buffer.filename().unwrap().to_str(), Some("notes.txt"));
/// ```
///
/// # Errors
///
/// This function will return an error if:
/// - The file exists but cannot be read (permissions, is a directory, etc.)
/// - The file contents are not valid UTF-8
pub fn load_text_file<P: AsRef<Path>>(path: P) -> Result<TextBuffer> {
    let path = path.as_ref();
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            log::info!("{} does not exist, starting empty", path.display());
            String::new()
        }
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to read file: {}", path.display()))
        }
    };
    Ok(TextBuffer::from_text(&content).with_filename(path))
}

/// Reads all of stdin into an unnamed buffer.
///
/// # Errors
///
/// Returns an error if reading stdin fails or the input is not valid UTF-8.
pub fn load_text_from_stdin() -> Result<TextBuffer> {
    use std::io::{self, Read};

    let mut buffer = String::new();
    io::stdin()
        .read_to_string(&mut buffer)
        .context("Failed to read from stdin")?;
    Ok(TextBuffer::from_text(&buffer))
}
