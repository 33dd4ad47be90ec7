//! keyquill: a modal (vim-style) keystroke interpreter.
//!
//! Keystrokes are parsed per mode into commands, compiled against a host
//! editor into an action plus a target range, and executed with counts and
//! dot-repeat. The host is anything implementing [`editor::host::Editor`];
//! [`document::TextBuffer`] is the in-memory one used by the terminal
//! front-end.

pub mod command;
pub mod config;
pub mod document;
pub mod editor;
pub mod file;
pub mod input;
pub mod ui;
