//! Text file saving functionality.

use anyhow::{anyhow, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Saves `lines` to `path`, joined with `\n`.
///
/// The write is atomic: the text goes to a temporary file next to the target,
/// which is then renamed over it, so the target is never left partially
/// written. A buffer loaded from a file with a trailing newline ends in an
/// empty line, so the newline survives a load/save cycle.
///
/// # Examples
///
/// ```no_run
/// use keyquill::file::saver::save_text_file;
///
/// let lines = vec!["first".to_string(), "second".to_string()];
/// save_text_file("notes.txt", &lines).unwrap();
/// ```
///
/// # Errors
///
/// Returns an error if the path has no file name, or if writing the temp
/// file or renaming it fails.
pub fn save_text_file<P: AsRef<Path>>(path: P, lines: &[String]) -> Result<()> {
    let path = path.as_ref();
    let temp_path = temp_path_for(path)?;

    fs::write(&temp_path, lines.join("\n"))
        .with_context(|| format!("Failed to write temp file: {}", temp_path.display()))?;
    fs::rename(&temp_path, path)
        .with_context(|| format!("Failed to rename temp file to {}", path.display()))?;

    Ok(())
}

/// `name.ext` becomes `name.ext.tmp` in the same directory.
fn temp_path_for(path: &Path) -> Result<PathBuf> {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| anyhow!("Invalid file name: {}", path.display()))?;
    Ok(path.with_file_name(format!("{}.tmp", name)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temp_path_keeps_extension() {
        let temp = temp_path_for(Path::new("/tmp/notes.txt")).unwrap();
        assert_eq!(temp, PathBuf::from("/tmp/notes.txt.tmp"));
    }

    #[test]
    fn test_temp_path_requires_file_name() {
        assert!(temp_path_for(Path::new("/")).is_err());
    }
}
