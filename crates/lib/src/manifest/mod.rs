//! Declarative component manifest (`idf_component.yml`) handling.
//!
//! The manifest is looked up in the framework directory first and the
//! project source directory second. Whichever file is used gets a one-time
//! `.orig` copy before the first edit so the pristine state can be recovered
//! by hand. If neither exists a minimal manifest is written to the project
//! source directory.

mod types;

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, warn};

use crate::changelog::ChangeLog;
use crate::consts::{MANIFEST_BACKUP_SUFFIX, MANIFEST_FILENAME};
use crate::util::write_atomic;

pub use types::{DependencySpec, Manifest};

/// Errors that can occur when working with the manifest file.
#[derive(Debug, Error)]
pub enum ManifestError {
  #[error("failed to read manifest '{}'", path.display())]
  Read {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("failed to write manifest '{}'", path.display())]
  Write {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("failed to parse manifest '{}'", path.display())]
  Parse {
    path: PathBuf,
    #[source]
    source: serde_yaml::Error,
  },

  #[error("failed to serialize manifest")]
  Serialize(#[source] serde_yaml::Error),

  #[error("failed to back up manifest '{}'", path.display())]
  Backup {
    path: PathBuf,
    #[source]
    source: io::Error,
  },
}

/// Path of the one-time backup for a manifest.
pub fn backup_path(path: &Path) -> PathBuf {
  let mut name = path.as_os_str().to_os_string();
  name.push(".");
  name.push(MANIFEST_BACKUP_SUFFIX);
  PathBuf::from(name)
}

/// Locates, loads and saves the manifest for one session.
///
/// Remembers which paths were already backed up so a manifest is copied at
/// most once per session even if the backup is deleted in between.
#[derive(Debug, Default)]
pub struct ManifestStore {
  backed_up: HashSet<PathBuf>,
}

impl ManifestStore {
  pub fn new() -> Self {
    Self::default()
  }

  /// Find the manifest to edit, creating a default one if none exists.
  ///
  /// # Errors
  ///
  /// Returns an error if the backup copy or the default manifest cannot be
  /// written.
  pub fn locate_or_create(
    &mut self,
    framework_dir: &Path,
    project_src_dir: &Path,
    log: &mut ChangeLog,
  ) -> Result<PathBuf, ManifestError> {
    let framework_manifest = framework_dir.join(MANIFEST_FILENAME);
    if framework_manifest.exists() {
      self.backup(&framework_manifest, log)?;
      return Ok(framework_manifest);
    }

    let project_manifest = project_src_dir.join(MANIFEST_FILENAME);
    if project_manifest.exists() {
      self.backup(&project_manifest, log)?;
      return Ok(project_manifest);
    }

    if let Some(parent) = project_manifest.parent() {
      fs::create_dir_all(parent).map_err(|e| ManifestError::Write {
        path: project_manifest.clone(),
        source: e,
      })?;
    }
    Manifest::with_default_dependency().save(&project_manifest)?;
    log.log(format!("Created new component.yml file at {}", project_manifest.display()));

    Ok(project_manifest)
  }

  fn backup(&mut self, path: &Path, log: &mut ChangeLog) -> Result<(), ManifestError> {
    if self.backed_up.contains(path) {
      return Ok(());
    }

    let backup = backup_path(path);
    if !backup.exists() {
      fs::copy(path, &backup).map_err(|e| ManifestError::Backup {
        path: path.to_path_buf(),
        source: e,
      })?;
      log.log(format!("Created backup: {}", backup.display()));
    }
    self.backed_up.insert(path.to_path_buf());

    Ok(())
  }

  /// Load a manifest, substituting an empty one on any failure.
  ///
  /// Malformed manifests are discarded rather than repaired; the failure is
  /// reported through `tracing` only.
  pub fn load(path: &Path) -> Manifest {
    match Self::try_load(path) {
      Ok(manifest) => manifest,
      Err(e) => {
        warn!(path = %path.display(), error = %e, "using empty manifest");
        Manifest::default()
      }
    }
  }

  /// Load a manifest, reporting read and parse failures.
  ///
  /// An empty or `null` document is an empty manifest, not an error.
  pub fn try_load(path: &Path) -> Result<Manifest, ManifestError> {
    let content = fs::read_to_string(path).map_err(|e| ManifestError::Read {
      path: path.to_path_buf(),
      source: e,
    })?;

    if content.trim().is_empty() {
      return Ok(Manifest::default());
    }

    let manifest: Option<Manifest> = serde_yaml::from_str(&content).map_err(|e| ManifestError::Parse {
      path: path.to_path_buf(),
      source: e,
    })?;

    Ok(manifest.unwrap_or_default())
  }
}

impl Manifest {
  /// Write the manifest with the default YAML formatting.
  ///
  /// The file is replaced atomically; a failed save leaves the old one.
  pub fn save(&self, path: &Path) -> Result<(), ManifestError> {
    let content = serde_yaml::to_string(self).map_err(ManifestError::Serialize)?;
    write_atomic(path, &content).map_err(|e| ManifestError::Write {
      path: path.to_path_buf(),
      source: e,
    })?;
    debug!(path = %path.display(), deps = self.dependencies.len(), "manifest saved");
    Ok(())
  }
}
