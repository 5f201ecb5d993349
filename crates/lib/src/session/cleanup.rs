//! Guarded removal of component include directories.

use std::io;
use std::path::{Component, Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DeletionError {
  #[error("'{0}' is not a plain directory name")]
  InvalidName(String),

  #[error("'{}' resolves outside of '{}'", path.display(), root.display())]
  OutsideRoot { path: PathBuf, root: PathBuf },

  #[error("failed to resolve '{}'", path.display())]
  Resolve {
    path: PathBuf,
    #[source]
    source: io::Error,
  },
}

/// Component name as used for directories: `espressif/mdns` → `espressif__mdns`.
pub fn filesystem_name(component: &str) -> String {
  component.replace('/', "__")
}

/// Resolve the include directory of `component` below `include_root`.
///
/// Returns `Ok(None)` if the directory does not exist. Names that are not a
/// single normal path component, and directories that resolve outside the
/// root through symlinks, are refused.
pub fn include_dir_for(include_root: &Path, component: &str) -> Result<Option<PathBuf>, DeletionError> {
  let mut parts = Path::new(component).components();
  let single_normal = matches!(parts.next(), Some(Component::Normal(_))) && parts.next().is_none();
  if component.is_empty() || component.contains(['/', '\\']) || !single_normal {
    return Err(DeletionError::InvalidName(component.to_string()));
  }

  let dir = include_root.join(component);
  if !dir.exists() {
    return Ok(None);
  }

  let root = dunce::canonicalize(include_root).map_err(|e| DeletionError::Resolve {
    path: include_root.to_path_buf(),
    source: e,
  })?;
  let resolved = dunce::canonicalize(&dir).map_err(|e| DeletionError::Resolve {
    path: dir.clone(),
    source: e,
  })?;

  if resolved == root || !resolved.starts_with(&root) {
    return Err(DeletionError::OutsideRoot { path: dir, root });
  }

  Ok(Some(resolved))
}
