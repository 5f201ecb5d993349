//! Inputs of a component session.

use std::path::PathBuf;

use crate::consts::{MAX_REMOVAL_RATIO, MIN_COMPONENT_ENTRY_LEN};

/// Directories a session reads and edits.
#[derive(Debug, Clone)]
pub struct SessionPaths {
  /// Arduino framework package (`framework-arduinoespressif32`).
  pub framework_dir: PathBuf,
  /// Per-MCU SDK directory holding the build recipe and `include/`.
  pub libs_dir: PathBuf,
  /// Project source directory scanned for component usage.
  pub project_src_dir: PathBuf,
}

/// Component related options of the current build environment.
#[derive(Debug, Clone, Default)]
pub struct ComponentOptions {
  /// `lib_ignore` entries, as written by the user.
  pub lib_ignore: Vec<String>,
  /// `lib_deps` entries, used for usage detection only.
  pub lib_deps: Vec<String>,
  /// `custom_component_add`: one `name` or `name@version` per line.
  pub component_add: Option<String>,
  /// `custom_component_remove`: one `name` per line.
  pub component_remove: Option<String>,
}

/// Tunable thresholds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Limits {
  /// Added entries with this many characters or fewer are skipped.
  pub min_component_entry_len: usize,
  /// Largest share of recipe lines a single edit may remove.
  pub max_removal_ratio: f64,
}

impl Default for Limits {
  fn default() -> Self {
    Self {
      min_component_entry_len: MIN_COMPONENT_ENTRY_LEN,
      max_removal_ratio: MAX_REMOVAL_RATIO,
    }
  }
}
