//! Integration tests for file I/O operations.

use keyquill::command::Interpreter;
use keyquill::config::Config;
use keyquill::editor::host::Editor;
use keyquill::file::loader::load_text_file;
use keyquill::file::saver::save_text_file;
use std::fs;
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};

#[test]
fn test_load_text_file() {
    let mut temp_file = NamedTempFile::new().unwrap();
    write!(temp_file, "first\nsecond").unwrap();

    let buffer = load_text_file(temp_file.path()).unwrap();
    assert_eq!(buffer.line_count(), 2);
    assert_eq!(buffer.line_text(1), "second");
    assert_eq!(buffer.filename(), Some(temp_file.path()));
    assert!(!buffer.is_dirty());
}

#[test]
fn test_load_normalises_crlf() {
    let mut temp_file = NamedTempFile::new().unwrap();
    write!(temp_file, "a\r\nb\r\n").unwrap();

    let buffer = load_text_file(temp_file.path()).unwrap();
    assert_eq!(buffer.text(), "a\nb\n");
}

#[test]
fn test_load_missing_file_gives_named_empty_buffer() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("new.txt");

    let buffer = load_text_file(&path).unwrap();
    assert_eq!(buffer.text(), "");
    assert_eq!(buffer.filename(), Some(path.as_path()));
}

#[test]
fn test_load_directory_fails() {
    let dir = TempDir::new().unwrap();
    assert!(load_text_file(dir.path()).is_err());
}

#[test]
fn test_save_text_file_leaves_no_temp_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("out.txt");

    save_text_file(&path, &["one".to_string(), "two".to_string()]).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "one\ntwo");
    assert!(!dir.path().join("out.txt.tmp").exists());
}

#[test]
fn test_trailing_newline_survives_roundtrip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("notes.txt");
    fs::write(&path, "keep\n").unwrap();

    let mut buffer = load_text_file(&path).unwrap();
    buffer.save().unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "keep\n");
}

#[test]
fn test_edit_and_save() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("edit.txt");
    fs::write(&path, "alpha\nbeta\ngamma").unwrap();

    let mut buffer = load_text_file(&path).unwrap();
    let mut interp = Interpreter::new(Config::default());
    interp.handle_keystroke(Some(&mut buffer), "jdd");
    assert!(buffer.is_dirty());

    buffer.save().unwrap();
    assert!(!buffer.is_dirty());
    assert_eq!(fs::read_to_string(&path).unwrap(), "alpha\ngamma");
}

#[test]
fn test_write_binding_saves() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bound.txt");
    fs::write(&path, "abc").unwrap();

    let mut config = Config::default();
    config
        .command_bindings
        .insert("W".to_string(), vec!["write".to_string()]);
    let mut buffer = load_text_file(&path).unwrap();
    let mut interp = Interpreter::new(config);
    interp.handle_keystroke(Some(&mut buffer), "xW");

    assert_eq!(fs::read_to_string(&path).unwrap(), "bc");
    assert!(interp.message().is_none());
}
