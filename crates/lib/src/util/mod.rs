//! Small filesystem helpers shared by the editing modules.

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Sibling staging file used by [`write_atomic`].
pub fn temp_path(path: &Path) -> PathBuf {
  let mut name: OsString = path.as_os_str().to_os_string();
  name.push(".tmp");
  PathBuf::from(name)
}

/// Write `content` to `path` via a temp file and rename.
///
/// Readers see either the old or the new file, never a truncated one.
pub fn write_atomic(path: &Path, content: &str) -> io::Result<()> {
  let temp = temp_path(path);
  fs::write(&temp, content)?;
  if let Err(e) = fs::rename(&temp, path) {
    let _ = fs::remove_file(&temp);
    return Err(e);
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;
  use tempfile::TempDir;

  #[test]
  fn replaces_content_without_leftovers() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("recipe.py");
    fs::write(&path, "old").unwrap();

    write_atomic(&path, "new").unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "new");
    assert!(!temp_path(&path).exists());
  }

  #[test]
  fn failed_staging_leaves_target_alone() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("recipe.py");
    fs::write(&path, "old").unwrap();
    fs::create_dir(temp_path(&path)).unwrap();

    assert!(write_atomic(&path, "new").is_err());
    assert_eq!(fs::read_to_string(&path).unwrap(), "old");
  }
}
