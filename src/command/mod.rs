//! Keystroke interpretation: parsing, compilation and dispatch.
//!
//! A keystroke flows through these stages:
//!
//! 1. `parser`: per-mode parsers accumulate chars into a [`parser::ParsedCommand`]
//! 2. `compiler`: resolves the operator's action and its target range
//! 3. `interpreter`: runs the compiled command with its repeat count and
//!    records it for `.`
//!
//! `registry` holds the trigger-char tables, `motion` the cursor motions and
//! `action` the operator implementations.
//!
//! # Example
//!
//! ```
//! use keyquill::command::interpreter::Interpreter;
//! use keyquill::config::Config;
//! use keyquill::document::TextBuffer;
//!
//! let mut buffer = TextBuffer::from_text("one\ntwo\nthree");
//! let mut interpreter = Interpreter::new(Config::default());
//! interpreter.handle_keystroke(Some(&mut buffer), "jdd");
//! assert_eq!(buffer.text(), "one\nthree");
//! ```

pub mod action;
pub mod compiler;
pub mod interpreter;
pub mod motion;
pub mod parser;
pub mod registry;

pub use interpreter::Interpreter;
