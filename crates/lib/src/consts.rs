//! Shared file names and defaults.

/// Prefix printed in front of every change log line.
pub const CHANGE_LOG_PREFIX: &str = "[ComponentManager]";

/// Dependency manifest consumed by the IDF component manager.
pub const MANIFEST_FILENAME: &str = "idf_component.yml";

/// Suffix appended to the manifest path for its one-time backup.
pub const MANIFEST_BACKUP_SUFFIX: &str = "orig";

/// Dependency written into a freshly created manifest.
pub const DEFAULT_DEPENDENCY: (&str, &str) = ("idf", ">=5.1");

/// Version constraint used when an added component names none.
pub const WILDCARD_VERSION: &str = "*";

/// Generated build recipe inside the per-MCU SDK directory.
pub const RECIPE_FILENAME: &str = "pioarduino-build.py";

/// Include tree inside the per-MCU SDK directory.
pub const INCLUDE_DIR: &str = "include";

/// Per-library metadata file in the framework's `libraries/` tree.
pub const LIBRARY_PROPERTIES: &str = "library.properties";

pub const FRAMEWORK_PACKAGE: &str = "framework-arduinoespressif32";
pub const FRAMEWORK_LIBS_PACKAGE: &str = "framework-arduinoespressif32-libs";

pub const DEFAULT_MCU: &str = "esp32";

/// Entries of `custom_component_add` this short or shorter are ignored.
pub const MIN_COMPONENT_ENTRY_LEN: usize = 4;

/// A recipe edit removing more than this share of lines is rejected.
pub const MAX_REMOVAL_RATIO: f64 = 0.5;
