//! Component session orchestration.
//!
//! A [`ComponentManager`] lives for one build invocation. It wires the
//! manifest store, usage analyzer, library mapper and recipe patcher
//! together and exposes the three independent operations a build triggers:
//! adding components, removing components, and ignoring libraries. A
//! post-build [`ComponentManager::restore`] puts the recipe back.
//!
//! Nothing here fails the build. Errors from the collaborators are turned
//! into change log entries and the session carries on.

mod cleanup;
mod options;

use std::collections::BTreeSet;
use std::fs;

use tracing::{debug, info};

use crate::analyze::{ProjectAnalyzer, UsageOracle};
use crate::changelog::ChangeLog;
use crate::consts::{INCLUDE_DIR, WILDCARD_VERSION};
use crate::manifest::{Manifest, ManifestStore};
use crate::mapper::LibraryMapper;
use crate::recipe::{RecipePatcher, StripOutcome};

pub use cleanup::{DeletionError, filesystem_name, include_dir_for};
pub use options::{ComponentOptions, Limits, SessionPaths};

/// Components that are never stripped from the recipe, whatever the user
/// puts into `lib_ignore`.
pub const CRITICAL_COMPONENTS: &[&str] = &[
  "lwip",       // network stack
  "freertos",   // scheduler
  "esp_system",
  "esp_common",
  "driver",
  "nvs_flash",
  "spi_flash",
  "esp_timer",
  "esp_event",
  "log",
];

pub fn is_critical(component: &str) -> bool {
  CRITICAL_COMPONENTS.contains(&component)
}

/// Split a `custom_component_add` entry into name and version.
///
/// `name@version` yields both parts trimmed; a bare name gets `*`.
pub fn parse_component_entry(entry: &str) -> (String, String) {
  match entry.split_once('@') {
    Some((name, version)) => (name.trim().to_string(), version.trim().to_string()),
    None => (entry.trim().to_string(), WILDCARD_VERSION.to_string()),
  }
}

/// Where a session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
  Idle,
  BackedUp,
  ComponentsEdited,
  LibsIgnored,
  Cleaned,
}

/// Coordinates all component operations of one build session.
#[derive(Debug)]
pub struct ComponentManager {
  paths: SessionPaths,
  options: ComponentOptions,
  limits: Limits,
  log: ChangeLog,
  manifests: ManifestStore,
  analyzer: ProjectAnalyzer,
  mapper: LibraryMapper,
  patcher: RecipePatcher,
  removed: BTreeSet<String>,
  ignored: BTreeSet<String>,
  state: SessionState,
}

impl ComponentManager {
  pub fn new(paths: SessionPaths, mcu: &str, options: ComponentOptions, limits: Limits) -> Self {
    Self::with_log(paths, mcu, options, limits, ChangeLog::new())
  }

  /// Like [`ComponentManager::new`] but with a caller supplied change log.
  pub fn with_log(
    paths: SessionPaths,
    mcu: &str,
    options: ComponentOptions,
    limits: Limits,
    log: ChangeLog,
  ) -> Self {
    let analyzer = ProjectAnalyzer::new(&paths.project_src_dir, options.lib_deps.clone());
    let mapper = LibraryMapper::new(&paths.framework_dir);
    let patcher = RecipePatcher::new(&paths.libs_dir, &mcu.to_lowercase()).with_max_removal_ratio(limits.max_removal_ratio);

    Self {
      paths,
      options,
      limits,
      log,
      manifests: ManifestStore::new(),
      analyzer,
      mapper,
      patcher,
      removed: BTreeSet::new(),
      ignored: BTreeSet::new(),
      state: SessionState::Idle,
    }
  }

  pub fn log(&self) -> &ChangeLog {
    &self.log
  }

  pub fn state(&self) -> SessionState {
    self.state
  }

  /// Filesystem names of components removed so far.
  pub fn removed_components(&self) -> &BTreeSet<String> {
    &self.removed
  }

  /// Include names ignored so far.
  pub fn ignored_libs(&self) -> &BTreeSet<String> {
    &self.ignored
  }

  pub fn analyzer(&self) -> &ProjectAnalyzer {
    &self.analyzer
  }

  pub fn mapper(&self) -> &LibraryMapper {
    &self.mapper
  }

  pub fn patcher(&self) -> &RecipePatcher {
    &self.patcher
  }

  /// Apply `custom_component_add` / `custom_component_remove`, then the
  /// `lib_ignore` handling.
  pub fn handle_component_settings(&mut self, add_components: bool, remove_components: bool) {
    if (remove_components && self.removed.is_empty()) || add_components {
      self.backup_recipe();
    }

    self.update_manifest(add_components, remove_components);

    if !self.removed.is_empty() {
      self.cleanup_removed_components();
    }

    self.handle_lib_ignore();

    if !self.log.is_empty() {
      let count = self.log.count();
      self.log.log(format!("Session completed with {} changes", count));
    }
  }

  /// Strip include entries for the environment's `lib_ignore` list.
  pub fn handle_lib_ignore(&mut self) {
    if self.ignored.is_empty() {
      self.backup_recipe();
    }

    let entries = self.lib_ignore_entries();
    if entries.is_empty() {
      return;
    }

    let processed = entries.len();
    self.ignored.extend(entries);

    let oracle: &dyn UsageOracle = &self.analyzer;
    match self.patcher.strip_includes(&self.ignored, Some(oracle), &mut self.log) {
      Ok(StripOutcome::Rejected {
        original_lines,
        new_lines,
      }) => self.log.log(format!(
        "Discarded build file edit: {} of {} lines would be removed",
        original_lines.saturating_sub(new_lines),
        original_lines
      )),
      Ok(outcome) => debug!(?outcome, "lib_ignore strip finished"),
      Err(e) => self
        .log
        .log(format!("Error processing ignored library includes: {}", e)),
    }

    self.log.log(format!("Processed {} ignored libraries", processed));
    self.state = SessionState::LibsIgnored;
  }

  /// Restore the pristine recipe; meant to run as a post-build hook.
  ///
  /// The session only counts as cleaned when a backup was put back.
  pub fn restore(&mut self) {
    match self.patcher.restore(&mut self.log) {
      Ok(true) => self.state = SessionState::Cleaned,
      Ok(false) => debug!(state = ?self.state, "no recipe backup to restore"),
      Err(e) => self.log.log(format!("Error restoring build file: {}", e)),
    }
  }

  /// `lib_ignore` entries mapped to include names, minus empty and critical
  /// ones.
  pub fn lib_ignore_entries(&self) -> Vec<String> {
    self
      .options
      .lib_ignore
      .iter()
      .map(|entry| entry.trim())
      .filter(|entry| !entry.is_empty())
      .map(|entry| self.mapper.to_include_name(entry))
      .filter(|name| {
        // Names that clean down to nothing, like `lib`, match every line.
        if name.is_empty() {
          debug!("dropping lib_ignore entry with an empty include name");
          return false;
        }
        let critical = is_critical(name);
        if critical {
          debug!(component = %name, "refusing to ignore critical component");
        }
        !critical
      })
      .collect()
  }

  fn backup_recipe(&mut self) {
    match self.patcher.backup(&mut self.log) {
      Ok(_) => {
        if self.state == SessionState::Idle && self.patcher.has_backup() {
          self.state = SessionState::BackedUp;
        }
      }
      Err(e) => self.log.log(format!("Error creating backup of build file: {}", e)),
    }
  }

  fn update_manifest(&mut self, add_components: bool, remove_components: bool) {
    let path = match self.manifests.locate_or_create(
      &self.paths.framework_dir,
      &self.paths.project_src_dir,
      &mut self.log,
    ) {
      Ok(path) => path,
      Err(e) => {
        self.log.log(format!("Error preparing component configuration: {}", e));
        return;
      }
    };

    let mut manifest = ManifestStore::load(&path);
    let before = manifest.clone();

    if remove_components {
      if let Some(entries) = self.options.component_remove.clone() {
        self.remove_components(&mut manifest, entries.lines());
      }
    }

    if add_components {
      if let Some(entries) = self.options.component_add.clone() {
        self.add_components(&mut manifest, entries.lines());
      }
    }

    match manifest.save(&path) {
      Ok(()) => self
        .log
        .log(format!("Saved component configuration to {}", path.display())),
      Err(e) => self.log.log(format!("Error saving component configuration: {}", e)),
    }

    if manifest != before {
      self.state = SessionState::ComponentsEdited;
    }
  }

  fn remove_components<'a>(&mut self, manifest: &mut Manifest, entries: impl Iterator<Item = &'a str>) {
    for component in entries.map(str::trim).filter(|c| !c.is_empty()) {
      if manifest.remove(component) {
        self.log.log(format!("Removed component: {}", component));
        self.removed.insert(filesystem_name(component));
      }
    }
  }

  fn add_components<'a>(&mut self, manifest: &mut Manifest, entries: impl Iterator<Item = &'a str>) {
    for entry in entries.map(str::trim) {
      if entry.chars().count() <= self.limits.min_component_entry_len {
        continue;
      }
      let (name, version) = parse_component_entry(entry);
      if manifest.add(&name, &version) {
        self.log.log(format!("Added component: {} (version: {})", name, version));
      }
    }
  }

  fn cleanup_removed_components(&mut self) {
    let include_root = self.paths.libs_dir.join(INCLUDE_DIR);
    for component in self.removed.clone() {
      match include_dir_for(&include_root, &component) {
        Ok(Some(dir)) => match fs::remove_dir_all(&dir) {
          Ok(()) => {
            info!(path = %dir.display(), "removed include directory");
            self.log.log(format!("Removed include directory: {}", dir.display()));
          }
          Err(e) => self
            .log
            .log(format!("Error removing include directory {}: {}", dir.display(), e)),
        },
        Ok(None) => {}
        Err(e) => self
          .log
          .log(format!("Refusing to remove include directory for '{}': {}", component, e)),
      }
    }

    if let Err(e) = self.patcher.remove_component_entries(&self.removed, &mut self.log) {
      self.log.log(format!("Error cleaning up CPPPATH entries: {}", e));
    }
  }
}
