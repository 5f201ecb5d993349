//! Custom sdkconfig bookkeeping.
//!
//! A project may ask for a custom SDK configuration (`custom_sdkconfig` in
//! the environment or `espidf.custom_sdkconfig` on the board). Building one
//! replaces the vendored SDK libraries, so the framework has to be
//! reinstalled whenever the requested configuration differs from the one
//! last built. The last build is identified by a fingerprint stored as the
//! first line of the project's `sdkconfig.defaults`.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use serde::Serialize;
use md5::{Digest, Md5};
use thiserror::Error;
use tracing::{debug, warn};

/// File in the project directory carrying the fingerprint marker.
pub const DEFAULTS_FILENAME: &str = "sdkconfig.defaults";

/// File in the SDK package root that exists once a custom build happened.
pub const SDKCONFIG_FILENAME: &str = "sdkconfig";

pub const MARKER_PREFIX: &str = "# TASMOTA__";

/// Flags selecting a single-core build.
pub const UNICORE_FLAGS: &[&str] = &["CORE32SOLO1", "CONFIG_FREERTOS_UNICORE=y"];

/// This MCU has no prebuilt libraries and always compiles them.
const ALWAYS_COMPILE_MCU: &str = "esp32c2";

#[derive(Debug, Error)]
pub enum SdkconfigError {
  #[error("failed to read '{path}'")]
  Read {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },
}

/// First 16 hex characters of the MD5 over the trimmed options and MCU.
///
/// Matches the markers the platform's own build scripts write, so an
/// existing `sdkconfig.defaults` is recognised without a reinstall.
pub fn fingerprint(custom_options: &str, mcu: &str) -> String {
  let mut hasher = Md5::new();
  hasher.update(custom_options.trim().as_bytes());
  hasher.update(mcu.as_bytes());
  let mut digest = hex::encode(hasher.finalize());
  digest.truncate(16);
  digest
}

pub fn marker_line(custom_options: &str, mcu: &str) -> String {
  format!("{}{}", MARKER_PREFIX, fingerprint(custom_options, mcu))
}

/// Read the first line of `path`; `None` if the file is empty.
pub fn read_first_line(path: &Path) -> Result<Option<String>, SdkconfigError> {
  let file = File::open(path).map_err(|e| SdkconfigError::Read {
    path: path.to_path_buf(),
    source: e,
  })?;
  let mut line = String::new();
  let read = BufReader::new(file)
    .read_line(&mut line)
    .map_err(|e| SdkconfigError::Read {
      path: path.to_path_buf(),
      source: e,
    })?;
  Ok((read > 0).then_some(line))
}

/// Whether the current configuration matches the last custom build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MatchState {
  pub matching: bool,
  /// The defaults file starts with a fingerprint marker.
  pub marker_present: bool,
}

/// What the build has to do before compiling the sketch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RebuildPlan {
  pub custom_sdkconfig: bool,
  pub unicore: bool,
  pub reinstall_framework: bool,
  pub compile_libs: bool,
}

/// Everything the rebuild decision depends on.
#[derive(Debug, Clone)]
pub struct SdkconfigContext {
  pub project_dir: PathBuf,
  pub mcu: String,
  /// `custom_sdkconfig` of the environment, if set.
  pub custom_options: Option<String>,
  /// Board level `espidf.custom_sdkconfig`.
  pub board_sdkconfig: String,
  /// Board `build.extra_flags`.
  pub extra_flags: String,
  /// A custom sdkconfig has already been built into the SDK package.
  pub custom_present: bool,
  /// Arduino is built as an IDF component, which disables custom builds.
  pub hybrid_framework: bool,
}

impl SdkconfigContext {
  pub fn new(project_dir: impl Into<PathBuf>, mcu: &str) -> Self {
    Self {
      project_dir: project_dir.into(),
      mcu: mcu.to_lowercase(),
      custom_options: None,
      board_sdkconfig: String::new(),
      extra_flags: String::new(),
      custom_present: false,
      hybrid_framework: false,
    }
  }

  /// Probe the SDK package root for a previously built sdkconfig.
  pub fn with_libs_root(mut self, libs_root: &Path) -> Self {
    self.custom_present = libs_root.join(SDKCONFIG_FILENAME).exists();
    self
  }

  /// Record the frameworks of the environment.
  pub fn with_frameworks<S: AsRef<str>>(mut self, frameworks: &[S]) -> Self {
    let has = |name: &str| frameworks.iter().any(|f| f.as_ref() == name);
    self.hybrid_framework = has("arduino") && has("espidf");
    self
  }

  fn options(&self) -> &str {
    self.custom_options.as_deref().unwrap_or("")
  }

  pub fn defaults_path(&self) -> PathBuf {
    self.project_dir.join(DEFAULTS_FILENAME)
  }

  /// Custom sdkconfig requested by the environment or the board.
  pub fn custom_requested(&self) -> bool {
    (self.custom_options.is_some() || self.board_sdkconfig.chars().count() > 2) && !self.hybrid_framework
  }

  pub fn has_unicore_flags(&self) -> bool {
    let flags = self.extra_flags.replace("-D", " ");
    UNICORE_FLAGS
      .iter()
      .any(|flag| flags.contains(flag) || self.options().contains(flag) || self.board_sdkconfig.contains(flag))
  }

  /// Compare the defaults marker against the requested configuration.
  pub fn matches_custom_sdkconfig(&self) -> MatchState {
    let mut state = MatchState {
      matching: false,
      marker_present: false,
    };

    if !self.custom_present {
      state.matching = true;
      return state;
    }

    let path = self.defaults_path();
    if !path.exists() || !self.custom_requested() {
      return state;
    }

    let line = match read_first_line(&path) {
      Ok(Some(line)) => line,
      Ok(None) => return state,
      Err(e) => {
        warn!(path = %path.display(), error = %e, "cannot read sdkconfig defaults");
        return state;
      }
    };

    if let Some(stored) = line.strip_prefix(MARKER_PREFIX) {
      state.marker_present = true;
      state.matching = stored.trim() == fingerprint(self.options(), &self.mcu);
    }
    state
  }

  /// The installed framework no longer fits the requested configuration.
  pub fn reinstall_required(&self) -> bool {
    let requested = self.custom_requested();
    if !requested && self.custom_present {
      return true;
    }
    requested && !self.matches_custom_sdkconfig().matching
  }

  /// The SDK libraries must be compiled from source for this build.
  pub fn compile_required(&self) -> bool {
    self.mcu == ALWAYS_COMPILE_MCU || (self.custom_requested() && !self.custom_present)
  }

  pub fn plan(&self) -> RebuildPlan {
    let custom_sdkconfig = self.custom_requested();
    let reinstall_framework = self.reinstall_required();
    // A reinstall wipes the custom build, so compiling follows it.
    let compile_libs = self.compile_required() || (reinstall_framework && custom_sdkconfig);
    let plan = RebuildPlan {
      custom_sdkconfig,
      unicore: custom_sdkconfig && self.has_unicore_flags(),
      reinstall_framework,
      compile_libs,
    };
    debug!(?plan, mcu = %self.mcu, "sdkconfig plan");
    plan
  }
}
