//! Heuristic detection of SDK components a project actually uses.
//!
//! Source files and declared library dependencies are matched against fixed
//! keyword tables. A single keyword anywhere in a file marks the component as
//! used, so the result errs on the side of keeping components.

mod patterns;

use std::cell::OnceCell;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use patterns::{LIB_DEP_KEYWORDS, SOURCE_EXTENSIONS, SOURCE_KEYWORDS};

/// Answers whether a component is needed by the project.
///
/// The recipe patcher consults an oracle before stripping include entries.
pub trait UsageOracle {
  fn is_used(&self, name: &str) -> bool;
}

/// Scans a project for component usage, once per session.
#[derive(Debug)]
pub struct ProjectAnalyzer {
  src_dir: PathBuf,
  lib_deps: Vec<String>,
  used: OnceCell<BTreeSet<String>>,
}

impl ProjectAnalyzer {
  pub fn new(src_dir: impl Into<PathBuf>, lib_deps: Vec<String>) -> Self {
    Self {
      src_dir: src_dir.into(),
      lib_deps,
      used: OnceCell::new(),
    }
  }

  /// Scan sources and declared dependencies without touching the cache.
  pub fn analyze(&self) -> BTreeSet<String> {
    let mut used = BTreeSet::new();

    if self.src_dir.is_dir() {
      for entry in WalkDir::new(&self.src_dir).into_iter().filter_map(Result::ok) {
        if entry.file_type().is_file() && is_source_file(entry.path()) {
          used.extend(components_in_file(entry.path()));
        }
      }
    }

    for dep in &self.lib_deps {
      used.extend(components_in_lib_dep(dep));
    }

    debug!(src = %self.src_dir.display(), components = ?used, "project analysis complete");
    used
  }

  /// Components detected in the project, computed on first access.
  pub fn used_components(&self) -> &BTreeSet<String> {
    self.used.get_or_init(|| self.analyze())
  }
}

impl UsageOracle for ProjectAnalyzer {
  /// Exact match, or either name containing the other.
  fn is_used(&self, name: &str) -> bool {
    let name = name.to_lowercase();
    let used = self.used_components();
    if used.contains(&name) {
      return true;
    }
    used
      .iter()
      .any(|component| component.contains(&name) || name.contains(component.as_str()))
  }
}

fn is_source_file(path: &Path) -> bool {
  path
    .extension()
    .and_then(|ext| ext.to_str())
    .is_some_and(|ext| SOURCE_EXTENSIONS.contains(&ext))
}

/// Unreadable files contribute nothing.
fn components_in_file(path: &Path) -> BTreeSet<String> {
  let bytes = match fs::read(path) {
    Ok(bytes) => bytes,
    Err(e) => {
      debug!(path = %path.display(), error = %e, "skipping unreadable source file");
      return BTreeSet::new();
    }
  };
  let content = String::from_utf8_lossy(&bytes).to_lowercase();

  SOURCE_KEYWORDS
    .iter()
    .filter(|(_, keywords)| keywords.iter().any(|k| content.contains(k)))
    .map(|(component, _)| component.to_string())
    .collect()
}

fn components_in_lib_dep(dep: &str) -> BTreeSet<String> {
  let dep = dep.to_uppercase();
  LIB_DEP_KEYWORDS
    .iter()
    .filter(|(_, keywords)| keywords.iter().any(|k| dep.contains(k)))
    .map(|(component, _)| component.to_string())
    .collect()
}
