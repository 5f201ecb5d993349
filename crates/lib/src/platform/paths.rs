//! PlatformIO directory layout.
//!
//! Every function here only computes paths; none of them touch the disk.

use crate::consts::{FRAMEWORK_LIBS_PACKAGE, FRAMEWORK_PACKAGE};
use std::path::{Path, PathBuf};

/// Environment variable overriding the PlatformIO core directory.
pub const CORE_DIR_ENV: &str = "PLATFORMIO_CORE_DIR";

/// Returns the user's home directory
#[cfg(windows)]
pub fn home_dir() -> PathBuf {
  let userprofile = std::env::var("USERPROFILE").expect("USERPROFILE not set");
  PathBuf::from(userprofile)
}

/// Returns the user's home directory
#[cfg(not(windows))]
pub fn home_dir() -> PathBuf {
  let home = std::env::var("HOME").expect("HOME not set");
  PathBuf::from(home)
}

/// Returns the PlatformIO core directory (`$PLATFORMIO_CORE_DIR` or `~/.platformio`)
pub fn core_dir() -> PathBuf {
  std::env::var_os(CORE_DIR_ENV)
    .filter(|v| !v.is_empty())
    .map(PathBuf::from)
    .unwrap_or_else(|| home_dir().join(".platformio"))
}

pub fn packages_dir() -> PathBuf {
  core_dir().join("packages")
}

/// Arduino framework package inside `packages`.
pub fn framework_dir(packages: &Path) -> PathBuf {
  packages.join(FRAMEWORK_PACKAGE)
}

/// Root of the vendored SDK package; holds one directory per MCU and,
/// after a custom build, a top-level `sdkconfig`.
pub fn framework_libs_root(packages: &Path) -> PathBuf {
  packages.join(FRAMEWORK_LIBS_PACKAGE)
}

/// Vendored SDK directory of one MCU.
pub fn framework_libs_dir(packages: &Path, mcu: &str) -> PathBuf {
  framework_libs_root(packages).join(mcu.to_lowercase())
}
