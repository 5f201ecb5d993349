//! Normalizes user-supplied library names into SDK include directory names.
//!
//! Lookup order for a name:
//! 1. the framework library table (keyed by `library.properties` name and
//!    by directory name)
//! 2. the same table after stripping common prefixes and suffixes
//! 3. the direct aliases, then the include alias table
//! 4. the cleaned name itself

mod aliases;

use std::cell::OnceCell;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::consts::LIBRARY_PROPERTIES;

use aliases::{DIRECT_ALIASES, INCLUDE_ALIASES, STRIP_PREFIXES, STRIP_SUFFIXES, lookup};

/// Maps library names to include directory names.
#[derive(Debug)]
pub struct LibraryMapper {
  framework_dir: PathBuf,
  libraries: OnceCell<HashMap<String, String>>,
}

impl LibraryMapper {
  pub fn new(framework_dir: impl Into<PathBuf>) -> Self {
    Self {
      framework_dir: framework_dir.into(),
      libraries: OnceCell::new(),
    }
  }

  /// Convert a library name to the include directory it registers.
  ///
  /// Never fails; unknown names come back lowercased and stripped.
  pub fn to_include_name(&self, lib_name: &str) -> String {
    let libraries = self.libraries();
    let lower = lib_name.trim().to_lowercase();

    if let Some(include) = libraries.get(&lower) {
      return include.clone();
    }

    let cleaned = clean_name(&lower);
    if let Some(include) = libraries.get(&cleaned) {
      return include.clone();
    }

    if let Some(include) = lookup(DIRECT_ALIASES, &cleaned).or_else(|| lookup(INCLUDE_ALIASES, &cleaned)) {
      return include.to_string();
    }

    cleaned
  }

  /// Framework library table, scanned on first use.
  pub fn libraries(&self) -> &HashMap<String, String> {
    self
      .libraries
      .get_or_init(|| scan_framework_libraries(&self.framework_dir.join("libraries")))
  }
}

fn clean_name(name: &str) -> String {
  let mut cleaned = name;
  for prefix in STRIP_PREFIXES {
    if let Some(rest) = cleaned.strip_prefix(prefix) {
      cleaned = rest;
    }
  }
  for suffix in STRIP_SUFFIXES {
    if let Some(rest) = cleaned.strip_suffix(suffix) {
      cleaned = rest;
    }
  }
  cleaned.to_string()
}

/// Each library directory with a readable `name=` line contributes two keys.
fn scan_framework_libraries(libraries_dir: &Path) -> HashMap<String, String> {
  let mut mapping = HashMap::new();

  let entries = match fs::read_dir(libraries_dir) {
    Ok(entries) => entries,
    Err(e) => {
      debug!(path = %libraries_dir.display(), error = %e, "no framework libraries");
      return mapping;
    }
  };

  for entry in entries.flatten() {
    let lib_dir = entry.path();
    if !lib_dir.is_dir() {
      continue;
    }
    let Some(dir_name) = lib_dir.file_name().and_then(|n| n.to_str()) else {
      continue;
    };
    let Some(lib_name) = read_library_name(&lib_dir) else {
      continue;
    };

    let include = include_for_library(&lib_name, dir_name);
    mapping.insert(lib_name.to_lowercase(), include.clone());
    mapping.insert(dir_name.to_lowercase(), include);
  }

  debug!(path = %libraries_dir.display(), entries = mapping.len(), "scanned framework libraries");
  mapping
}

/// `name=` value from a library's metadata file.
fn read_library_name(lib_dir: &Path) -> Option<String> {
  let content = fs::read_to_string(lib_dir.join(LIBRARY_PROPERTIES)).ok()?;
  content
    .lines()
    .map(str::trim)
    .find_map(|line| line.strip_prefix("name="))
    .map(|name| name.trim().to_string())
}

fn include_for_library(lib_name: &str, dir_name: &str) -> String {
  let lib_key = lib_name.to_lowercase().replace(' ', "").replace('-', "_");
  let dir_key = dir_name.to_lowercase();

  lookup(INCLUDE_ALIASES, &lib_key)
    .or_else(|| lookup(INCLUDE_ALIASES, &dir_key))
    .map(str::to_string)
    .unwrap_or(dir_key)
}
