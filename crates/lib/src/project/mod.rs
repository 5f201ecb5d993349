//! `platformio.ini` reader.
//!
//! Only the subset a component session needs: `[section]` headers,
//! `key = value` pairs, indented continuation lines and full-line or
//! `" ;"` inline comments. Options are read from one `[env:NAME]` section;
//! `extends` is not followed.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::session::ComponentOptions;

pub const PROJECT_FILENAME: &str = "platformio.ini";

const ENV_PREFIX: &str = "env:";
const PLATFORMIO_SECTION: &str = "platformio";
const DEFAULT_SRC_DIR: &str = "src";

#[derive(Debug, Error)]
pub enum ProjectError {
  #[error("failed to read '{path}'")]
  Read {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("line {line}: {message}")]
  Syntax { line: usize, message: String },

  #[error("environment '{0}' not found")]
  UnknownEnv(String),

  #[error("no environment defined")]
  NoEnv,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Section {
  name: String,
  options: Vec<(String, String)>,
}

impl Section {
  fn get(&self, key: &str) -> Option<&str> {
    self
      .options
      .iter()
      .rev()
      .find(|(k, _)| k == key)
      .map(|(_, v)| v.as_str())
  }
}

/// Parsed project configuration.
#[derive(Debug, Clone, Default)]
pub struct ProjectConfig {
  sections: Vec<Section>,
}

impl ProjectConfig {
  pub fn load(path: &Path) -> Result<Self, ProjectError> {
    let text = fs::read_to_string(path).map_err(|e| ProjectError::Read {
      path: path.to_path_buf(),
      source: e,
    })?;
    Self::parse(&text)
  }

  pub fn parse(text: &str) -> Result<Self, ProjectError> {
    let mut sections: Vec<Section> = Vec::new();
    // Continuations may only follow a key.
    let mut open_key = false;

    for (idx, raw) in text.lines().enumerate() {
      let line_no = idx + 1;
      let line = strip_inline_comment(raw);
      let trimmed = line.trim();

      if trimmed.is_empty() || trimmed.starts_with(';') || trimmed.starts_with('#') {
        continue;
      }

      let indented = line.starts_with([' ', '\t']);
      if indented && open_key {
        if let Some((_, value)) = sections.last_mut().and_then(|s| s.options.last_mut()) {
          if !value.is_empty() {
            value.push('\n');
          }
          value.push_str(trimmed);
        }
        continue;
      }

      if let Some(name) = trimmed.strip_prefix('[').and_then(|s| s.strip_suffix(']')) {
        sections.push(Section {
          name: name.trim().to_string(),
          options: Vec::new(),
        });
        open_key = false;
        continue;
      }

      let Some((key, value)) = trimmed.split_once('=') else {
        return Err(ProjectError::Syntax {
          line: line_no,
          message: format!("expected 'key = value', found '{}'", trimmed),
        });
      };
      let Some(section) = sections.last_mut() else {
        return Err(ProjectError::Syntax {
          line: line_no,
          message: "option outside of a section".to_string(),
        });
      };
      section
        .options
        .push((key.trim().to_lowercase(), value.trim().to_string()));
      open_key = true;
    }

    Ok(Self { sections })
  }

  fn section(&self, name: &str) -> Option<&Section> {
    self.sections.iter().rev().find(|s| s.name == name)
  }

  /// Names of all `[env:NAME]` sections, in file order.
  pub fn env_names(&self) -> Vec<&str> {
    self
      .sections
      .iter()
      .filter_map(|s| s.name.strip_prefix(ENV_PREFIX))
      .collect()
  }

  /// First of `[platformio] default_envs`, else the first environment.
  pub fn default_env(&self) -> Option<&str> {
    let configured = self
      .section(PLATFORMIO_SECTION)
      .and_then(|s| s.get("default_envs"))
      .and_then(|v| split_list(v).next());
    configured.or_else(|| self.env_names().into_iter().next())
  }

  /// The named environment, or the default one when `name` is `None`.
  pub fn env(&self, name: Option<&str>) -> Result<EnvSection<'_>, ProjectError> {
    let name = match name {
      Some(name) => name,
      None => self.default_env().ok_or(ProjectError::NoEnv)?,
    };
    self
      .section(&format!("{}{}", ENV_PREFIX, name))
      .map(|section| EnvSection { section })
      .ok_or_else(|| ProjectError::UnknownEnv(name.to_string()))
  }

  /// Project source directory (`[platformio] src_dir`, default `src`).
  pub fn src_dir(&self, project_dir: &Path) -> PathBuf {
    let configured = self.section(PLATFORMIO_SECTION).and_then(|s| s.get("src_dir"));
    project_dir.join(configured.unwrap_or(DEFAULT_SRC_DIR))
  }
}

/// Options of one `[env:NAME]` section.
#[derive(Debug, Clone, Copy)]
pub struct EnvSection<'a> {
  section: &'a Section,
}

impl<'a> EnvSection<'a> {
  pub fn name(&self) -> &'a str {
    self
      .section
      .name
      .strip_prefix(ENV_PREFIX)
      .unwrap_or(&self.section.name)
  }

  pub fn get(&self, key: &str) -> Option<&'a str> {
    self.section.get(key)
  }

  pub fn has(&self, key: &str) -> bool {
    self.get(key).is_some()
  }

  /// A list option split on newlines and commas.
  pub fn list(&self, key: &str) -> Vec<String> {
    self
      .get(key)
      .map(|v| split_list(v).map(str::to_string).collect())
      .unwrap_or_default()
  }

  pub fn mcu(&self) -> Option<&'a str> {
    self.get("board_build.mcu")
  }

  pub fn frameworks(&self) -> Vec<String> {
    self.list("framework")
  }

  pub fn custom_sdkconfig(&self) -> Option<&'a str> {
    self.get("custom_sdkconfig")
  }

  pub fn component_options(&self) -> ComponentOptions {
    ComponentOptions {
      lib_ignore: self.list("lib_ignore"),
      lib_deps: self.list("lib_deps"),
      component_add: self.get("custom_component_add").map(str::to_string),
      component_remove: self.get("custom_component_remove").map(str::to_string),
    }
  }

  /// Removal handling runs for `custom_component_remove` or `lib_ignore`.
  pub fn wants_removal(&self) -> bool {
    self.has("custom_component_remove") || self.has("lib_ignore")
  }

  pub fn wants_addition(&self) -> bool {
    self.has("custom_component_add")
  }
}

fn split_list(value: &str) -> impl Iterator<Item = &str> {
  value
    .split(['\n', ','])
    .map(str::trim)
    .filter(|item| !item.is_empty())
}

fn strip_inline_comment(line: &str) -> &str {
  match line.find(" ;") {
    Some(pos) => &line[..pos],
    None => line,
  }
}
