//! Backup, restore and include stripping for the generated build recipe.
//!
//! The framework ships a generated `pioarduino-build.py` per MCU that
//! registers every SDK include directory. Ignored libraries and removed
//! components are taken out of that file by deleting the matching lines.
//! The edit is all or nothing: if it would drop more than the configured
//! share of lines (or grow the file) the original content is kept.

mod patterns;

use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, warn};

use crate::analyze::UsageOracle;
use crate::changelog::ChangeLog;
use crate::consts::{MAX_REMOVAL_RATIO, RECIPE_FILENAME};
use crate::util::write_atomic;

pub use patterns::PatternSet;

/// Errors that can occur while editing the recipe.
#[derive(Debug, Error)]
pub enum RecipeError {
  #[error("failed to read build recipe '{}'", path.display())]
  Read {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("failed to write build recipe '{}'", path.display())]
  Write {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("failed to back up build recipe to '{}'", path.display())]
  Backup {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("failed to restore build recipe from '{}'", path.display())]
  Restore {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("invalid include pattern for '{name}'")]
  Pattern {
    name: String,
    #[source]
    source: regex::Error,
  },
}

/// What a strip pass did to the recipe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StripOutcome {
  /// There is no recipe to edit.
  MissingRecipe,
  /// Nothing matched; the file was not touched.
  Unchanged,
  /// The edit failed validation and was discarded.
  Rejected { original_lines: usize, new_lines: usize },
  /// The edited content was written back.
  Written { removed: usize },
}

/// Result of editing recipe text in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patched {
  pub content: String,
  /// Number of include entries removed across all names.
  pub removed: usize,
}

/// Whether an edit from `original` to `edited` is acceptable.
///
/// Rejects edits that remove more than `max_ratio` of the original lines or
/// add lines.
pub fn validate_removal(original: &str, edited: &str, max_ratio: f64) -> bool {
  let original_lines = original.lines().count();
  let new_lines = edited.lines().count();
  if new_lines > original_lines {
    return false;
  }
  let removed = original_lines - new_lines;
  (removed as f64) <= (original_lines as f64) * max_ratio
}

/// Remove include registrations for `names` from recipe text.
///
/// Names the oracle reports as used are left alone and blank names are
/// skipped. Blank lines and
/// dangling commas left by the removal are cleaned up afterwards.
pub fn strip_content<'a>(
  content: &str,
  names: impl IntoIterator<Item = &'a str>,
  set: PatternSet,
  oracle: Option<&dyn UsageOracle>,
  log: &mut ChangeLog,
) -> Result<Patched, RecipeError> {
  let mut content = content.to_string();
  let mut removed = 0;

  for name in names {
    // An empty name would match every include line.
    if name.trim().is_empty() {
      continue;
    }
    if oracle.is_some_and(|o| o.is_used(name)) {
      log.log(format!(
        "Skipping removal of library '{}' - detected as used in project",
        name
      ));
      continue;
    }

    let regexes = patterns::include_patterns(name, set).map_err(|e| RecipeError::Pattern {
      name: name.to_string(),
      source: e,
    })?;

    let mut removed_for_name = 0;
    for re in regexes {
      let hits = re.find_iter(&content).count();
      if hits > 0 {
        content = re.replace_all(&content, "").into_owned();
        removed_for_name += hits;
      }
    }

    if removed_for_name > 0 {
      log.log(format!(
        "Removed {} include entries for library '{}'",
        removed_for_name, name
      ));
      removed += removed_for_name;
    }
  }

  let content = patterns::blank_lines().replace_all(&content, "\n");
  let content = patterns::dangling_comma().replace_all(&content, "\n]").into_owned();

  Ok(Patched { content, removed })
}

/// The per-MCU build recipe and its backup.
#[derive(Debug, Clone)]
pub struct RecipePatcher {
  libs_dir: PathBuf,
  mcu: String,
  max_removal_ratio: f64,
}

impl RecipePatcher {
  /// `libs_dir` is the per-MCU SDK directory holding the recipe.
  pub fn new(libs_dir: impl Into<PathBuf>, mcu: &str) -> Self {
    Self {
      libs_dir: libs_dir.into(),
      mcu: mcu.to_string(),
      max_removal_ratio: MAX_REMOVAL_RATIO,
    }
  }

  pub fn with_max_removal_ratio(mut self, ratio: f64) -> Self {
    self.max_removal_ratio = ratio;
    self
  }

  pub fn recipe_path(&self) -> PathBuf {
    self.libs_dir.join(RECIPE_FILENAME)
  }

  /// Backup location, namespaced by MCU so targets never share one.
  pub fn backup_path(&self) -> PathBuf {
    self.libs_dir.join(format!("{}.{}", RECIPE_FILENAME, self.mcu))
  }

  pub fn has_backup(&self) -> bool {
    self.backup_path().exists()
  }

  /// Copy the recipe aside unless a backup for this MCU already exists.
  ///
  /// An existing backup holds the pristine file and must not be replaced
  /// by an already edited one. Returns `true` if a backup was written.
  pub fn backup(&self, log: &mut ChangeLog) -> Result<bool, RecipeError> {
    let recipe = self.recipe_path();
    let backup = self.backup_path();
    if !recipe.exists() || backup.exists() {
      return Ok(false);
    }

    fs::copy(&recipe, &backup).map_err(|e| RecipeError::Backup {
      path: backup.clone(),
      source: e,
    })?;
    log.log(format!("Created backup of {} for {}", RECIPE_FILENAME, self.mcu));
    Ok(true)
  }

  /// Put the backup back in place and delete it.
  ///
  /// Returns `true` if a backup was restored.
  pub fn restore(&self, log: &mut ChangeLog) -> Result<bool, RecipeError> {
    let backup = self.backup_path();
    if !backup.exists() {
      return Ok(false);
    }

    fs::copy(&backup, self.recipe_path()).map_err(|e| RecipeError::Restore {
      path: backup.clone(),
      source: e,
    })?;
    fs::remove_file(&backup).map_err(|e| RecipeError::Restore {
      path: backup.clone(),
      source: e,
    })?;
    log.log(format!("Restored original {} from backup", RECIPE_FILENAME));
    Ok(true)
  }

  /// Strip include registrations for ignored libraries.
  pub fn strip_includes(
    &self,
    names: &BTreeSet<String>,
    oracle: Option<&dyn UsageOracle>,
    log: &mut ChangeLog,
  ) -> Result<StripOutcome, RecipeError> {
    let outcome = self.apply(names, PatternSet::IgnoredLibrary, oracle, log)?;
    if let StripOutcome::Written { removed } = outcome {
      log.log(format!("Successfully updated build file with {} total removals", removed));
    }
    Ok(outcome)
  }

  /// Strip `CPPPATH` entries of components removed from the manifest.
  pub fn remove_component_entries(
    &self,
    components: &BTreeSet<String>,
    log: &mut ChangeLog,
  ) -> Result<StripOutcome, RecipeError> {
    let outcome = self.apply(components, PatternSet::RemovedComponent, None, log)?;
    if matches!(outcome, StripOutcome::Written { .. }) {
      log.log("Cleaned up CPPPATH entries for removed components");
    }
    Ok(outcome)
  }

  fn apply(
    &self,
    names: &BTreeSet<String>,
    set: PatternSet,
    oracle: Option<&dyn UsageOracle>,
    log: &mut ChangeLog,
  ) -> Result<StripOutcome, RecipeError> {
    let path = self.recipe_path();
    if !path.exists() {
      return Ok(StripOutcome::MissingRecipe);
    }

    let original = fs::read_to_string(&path).map_err(|e| RecipeError::Read {
      path: path.clone(),
      source: e,
    })?;

    let patched = strip_content(&original, names.iter().map(String::as_str), set, oracle, log)?;

    if !validate_removal(&original, &patched.content, self.max_removal_ratio) {
      let original_lines = original.lines().count();
      let new_lines = patched.content.lines().count();
      warn!(
        path = %path.display(),
        original_lines,
        new_lines,
        "recipe edit rejected, keeping original"
      );
      return Ok(StripOutcome::Rejected {
        original_lines,
        new_lines,
      });
    }

    if patched.content == original {
      return Ok(StripOutcome::Unchanged);
    }

    write_recipe(&path, &patched.content)?;
    debug!(path = %path.display(), removed = patched.removed, "recipe updated");
    Ok(StripOutcome::Written {
      removed: patched.removed,
    })
  }
}

fn write_recipe(path: &Path, content: &str) -> Result<(), RecipeError> {
  write_atomic(path, content).map_err(|e| RecipeError::Write {
    path: path.to_path_buf(),
    source: e,
  })
}
