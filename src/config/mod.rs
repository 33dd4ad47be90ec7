//! Configuration system for keyquill.
//!
//! This module provides the configuration structure for keyquill with sensible defaults
//! and support for serialization/deserialization via serde. Configuration is loaded
//! from a TOML file and can be pointed elsewhere from the command line.
//!
//! # Example
//!
//! ```
//! use keyquill::config::Config;
//!
//! // Use default configuration
//! let config = Config::default();
//! assert_eq!(config.escape_sequence, "jk");
//! assert_eq!(config.indent_width, 4);
//!
//! // Create custom configuration
//! let custom = Config {
//!     escape_sequence: "kj".to_string(),
//!     indent_width: 2,
//!     ..Config::default()
//! };
//! assert_eq!(custom.undo_limit, 50);
//! ```

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Configuration for the keyquill interpreter and its terminal front-end.
///
/// All fields have sensible defaults via `Config::default()`, and any field
/// missing from a config file takes its default.
///
/// # Fields
///
/// * `word_separators` - Punctuation that forms its own word class for `w`/`b`
/// * `escape_sequence` - Keys that leave INSERT mode (default: "jk")
/// * `command_bindings` - Single key to host command names (default: `u` undo, `R` redo)
/// * `indent_width` - Spaces added or removed by `>` and `<` (default: 4)
/// * `sync_unnamed_register` - Sync the register with the system clipboard (default: true)
/// * `undo_limit` - Maximum number of undo snapshots to keep (default: 50)
/// * `show_line_numbers` - Display line numbers in the editor (default: true)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Punctuation treated as a separate word class by word motions
    #[serde(default = "default_word_separators")]
    pub word_separators: String,

    /// Keys typed in INSERT mode to return to NORMAL mode
    #[serde(default = "default_escape_sequence")]
    pub escape_sequence: String,

    /// Spaces per indentation step
    #[serde(default = "default_indent_width")]
    pub indent_width: usize,

    /// Sync unnamed register with system clipboard
    #[serde(default = "default_sync_unnamed_register")]
    pub sync_unnamed_register: bool,

    /// Maximum number of undo operations to keep
    #[serde(default = "default_undo_limit")]
    pub undo_limit: usize,

    /// Display line numbers in the editor
    #[serde(default = "default_show_line_numbers")]
    pub show_line_numbers: bool,

    /// Trigger key to the host commands it runs, in order
    #[serde(default = "default_command_bindings")]
    pub command_bindings: BTreeMap<String, Vec<String>>,
}

fn default_word_separators() -> String {
    "`~!@#$%^&*()-=+[{]}\\|;:'\",.<>/?".to_string()
}

fn default_escape_sequence() -> String {
    "jk".to_string()
}

fn default_command_bindings() -> BTreeMap<String, Vec<String>> {
    let mut bindings = BTreeMap::new();
    bindings.insert("u".to_string(), vec!["undo".to_string()]);
    bindings.insert("R".to_string(), vec!["redo".to_string()]);
    bindings
}

fn default_indent_width() -> usize {
    4
}

fn default_sync_unnamed_register() -> bool {
    true
}

fn default_undo_limit() -> usize {
    50
}

fn default_show_line_numbers() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            word_separators: default_word_separators(),
            escape_sequence: default_escape_sequence(),
            indent_width: default_indent_width(),
            sync_unnamed_register: default_sync_unnamed_register(),
            undo_limit: default_undo_limit(),
            show_line_numbers: default_show_line_numbers(),
            command_bindings: default_command_bindings(),
        }
    }
}

impl Config {
    /// Returns the path to the config file.
    ///
    /// Uses `~/.config/keyquill/config.toml` on all platforms.
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|mut path| {
            path.push(".config");
            path.push("keyquill");
            path.push("config.toml");
            path
        })
    }

    /// Loads configuration from the default config file.
    ///
    /// Returns the default configuration if the file doesn't exist or can't be read.
    pub fn load() -> Self {
        let config_path = match Self::config_path() {
            Some(path) => path,
            None => return Self::default(),
        };

        if !config_path.exists() {
            return Self::default();
        }

        match Self::load_from(&config_path) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("using default configuration: {:#}", err);
                Self::default()
            }
        }
    }

    /// Loads configuration from `path`, failing on I/O or parse errors.
    pub fn load_from(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Saves configuration to the default config file.
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        self.save_to(&config_path)
    }

    /// Saves configuration to `path`, creating parent directories.
    pub fn save_to(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let toml_string = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_string)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bindings() {
        let config = Config::default();
        assert_eq!(config.command_bindings["u"], vec!["undo".to_string()]);
        assert_eq!(config.command_bindings["R"], vec!["redo".to_string()]);
    }

    #[test]
    fn test_separators_exclude_word_chars() {
        let config = Config::default();
        assert!(config.word_separators.contains('.'));
        assert!(!config.word_separators.contains('_'));
        assert!(!config.word_separators.contains('a'));
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: Config = toml::from_str("indent_width = 2").unwrap();
        assert_eq!(config.indent_width, 2);
        assert_eq!(config.escape_sequence, "jk");
        assert!(config.sync_unnamed_register);
    }
}
