//! Dependency manifest types.
//!
//! # Manifest Format
//!
//! ```yaml
//! dependencies:
//!   idf: ">=5.1"
//!   espressif/esp32-camera:
//!     version: "2.0.15"
//! ```
//!
//! A dependency value is kept as raw YAML: a bare constraint (string or
//! number), a mapping with `version`, `path`, `rules` and friends, or null.
//! Entries this crate did not add are written back exactly as read.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_yaml::{Mapping, Value};

/// The `idf_component.yml` document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
  /// Component name to dependency spec.
  #[serde(default, deserialize_with = "nullable_map")]
  pub dependencies: BTreeMap<String, DependencySpec>,

  /// Any other top-level keys (`description`, `targets`, ...).
  #[serde(flatten)]
  pub extra: BTreeMap<String, Value>,
}

/// A single dependency entry, verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DependencySpec(pub Value);

/// `dependencies:` with nothing after it parses as null.
fn nullable_map<'de, D>(deserializer: D) -> Result<BTreeMap<String, DependencySpec>, D::Error>
where
  D: Deserializer<'de>,
{
  Ok(Option::deserialize(deserializer)?.unwrap_or_default())
}

fn scalar_text(value: &Value) -> Option<String> {
  match value {
    Value::String(s) => Some(s.clone()),
    Value::Number(n) => Some(n.to_string()),
    Value::Bool(b) => Some(b.to_string()),
    _ => None,
  }
}

impl DependencySpec {
  /// Create a `{version: ...}` entry.
  pub fn with_version(version: &str) -> Self {
    let mut mapping = Mapping::new();
    mapping.insert(Value::from("version"), Value::from(version));
    DependencySpec(Value::Mapping(mapping))
  }

  /// The version constraint, if the entry names one.
  ///
  /// Numeric constraints (`idf: 5.1`) come back in their YAML spelling.
  pub fn version(&self) -> Option<String> {
    match &self.0 {
      Value::Mapping(mapping) => mapping.get("version").and_then(scalar_text),
      other => scalar_text(other),
    }
  }

  /// Entry refers to a local component instead of a registry version.
  pub fn is_path(&self) -> bool {
    matches!(&self.0, Value::Mapping(m) if m.contains_key("path"))
  }
}

impl Manifest {
  /// Manifest written when none exists yet.
  pub fn with_default_dependency() -> Self {
    let (name, version) = crate::consts::DEFAULT_DEPENDENCY;
    let mut manifest = Self::default();
    manifest
      .dependencies
      .insert(name.to_string(), DependencySpec(Value::from(version)));
    manifest
  }

  pub fn contains(&self, name: &str) -> bool {
    self.dependencies.contains_key(name)
  }

  pub fn version_of(&self, name: &str) -> Option<String> {
    self.dependencies.get(name).and_then(DependencySpec::version)
  }

  /// Insert a dependency unless one with the same name exists.
  ///
  /// Returns `true` if the manifest changed.
  pub fn add(&mut self, name: &str, version: &str) -> bool {
    if self.dependencies.contains_key(name) {
      return false;
    }
    self
      .dependencies
      .insert(name.to_string(), DependencySpec::with_version(version));
    true
  }

  /// Returns `true` if the dependency was present.
  pub fn remove(&mut self, name: &str) -> bool {
    self.dependencies.remove(name).is_some()
  }
}
