//! File system utilities.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Replaces the contents of `path` in one step.
///
/// The content goes to a hidden sibling file first and is then renamed over
/// the target, so an interrupted write leaves either the old or the new
/// document on disk, never a truncated one. The sibling lives in the same
/// directory so the rename stays on one filesystem.
///
/// # Errors
///
/// Returns an error if the temp file cannot be written or renamed.
pub fn atomic_write(path: &Path, content: &str) -> Result<()> {
    let temp_path = temp_path_for(path);

    fs::write(&temp_path, content)
        .with_context(|| format!("Failed to write {}", temp_path.display()))?;

    if let Err(e) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(e).with_context(|| format!("Failed to replace {}", path.display()));
    }

    Ok(())
}

fn temp_path_for(path: &Path) -> PathBuf {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let file_name = path.file_name().unwrap_or_default().to_string_lossy();
    parent.join(format!(".{file_name}.tmp"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_atomic_write_creates_file() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("models.xml");

        atomic_write(&file_path, "<models />").unwrap();

        assert_eq!(fs::read_to_string(&file_path).unwrap(), "<models />");
    }

    #[test]
    fn test_atomic_write_overwrites_existing() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("models.xml");

        fs::write(&file_path, "old").unwrap();
        atomic_write(&file_path, "new").unwrap();

        assert_eq!(fs::read_to_string(&file_path).unwrap(), "new");
    }

    #[test]
    fn test_atomic_write_no_temp_file_remains() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("models.xml");

        atomic_write(&file_path, "content").unwrap();

        assert!(!temp_dir.path().join(".models.xml.tmp").exists());
    }

    #[test]
    fn test_atomic_write_missing_directory_fails() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("missing").join("models.xml");

        assert!(atomic_write(&file_path, "content").is_err());
        assert!(!file_path.exists());
    }

    #[test]
    fn test_temp_path_for_bare_file_name() {
        assert_eq!(
            temp_path_for(Path::new("models.xml")),
            PathBuf::from("./.models.xml.tmp")
        );
    }
}
