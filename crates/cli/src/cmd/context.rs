//! Resolution of the project, environment and framework directories shared
//! by the project commands.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use tracing::debug;

use espcomp_lib::consts::{DEFAULT_MCU, MAX_REMOVAL_RATIO, MIN_COMPONENT_ENTRY_LEN};
use espcomp_lib::platform::paths;
use espcomp_lib::project::{PROJECT_FILENAME, ProjectConfig};
use espcomp_lib::session::{ComponentManager, ComponentOptions, Limits, SessionPaths};

#[derive(Debug, Args)]
pub struct ProjectArgs {
  /// Project directory containing platformio.ini
  #[arg(short = 'd', long, env = "ESPCOMP_PROJECT_DIR", default_value = ".")]
  pub project_dir: PathBuf,

  /// Build environment (default: first of default_envs)
  #[arg(short, long, env = "PIOENV")]
  pub environment: Option<String>,

  /// PlatformIO packages directory (default: $PLATFORMIO_CORE_DIR/packages)
  #[arg(long, env = "ESPCOMP_PACKAGES_DIR")]
  pub packages_dir: Option<PathBuf>,

  /// Arduino framework directory
  #[arg(long, env = "ESPCOMP_FRAMEWORK_DIR")]
  pub framework_dir: Option<PathBuf>,

  /// Per-MCU SDK directory holding the build recipe
  #[arg(long, env = "ESPCOMP_LIBS_DIR")]
  pub libs_dir: Option<PathBuf>,

  /// Target MCU (default: board_build.mcu, else esp32)
  #[arg(long)]
  pub mcu: Option<String>,

  /// Largest share of recipe lines a single edit may remove
  #[arg(long, default_value_t = MAX_REMOVAL_RATIO)]
  pub max_removal_ratio: f64,

  /// Skip custom_component_add entries this short or shorter
  #[arg(long, default_value_t = MIN_COMPONENT_ENTRY_LEN)]
  pub min_entry_len: usize,
}

/// Everything a command needs to know about the selected environment.
#[derive(Debug)]
pub struct ProjectContext {
  pub project_dir: PathBuf,
  pub env_name: String,
  pub mcu: String,
  pub paths: SessionPaths,
  pub libs_root: PathBuf,
  pub options: ComponentOptions,
  pub limits: Limits,
  pub wants_addition: bool,
  pub wants_removal: bool,
  pub custom_sdkconfig: Option<String>,
  pub frameworks: Vec<String>,
}

impl ProjectArgs {
  pub fn load(&self) -> Result<ProjectContext> {
    let ini = self.project_dir.join(PROJECT_FILENAME);
    let config = ProjectConfig::load(&ini).with_context(|| format!("Failed to load {}", ini.display()))?;
    let env = config
      .env(self.environment.as_deref())
      .with_context(|| format!("Cannot select a build environment from {}", ini.display()))?;

    let mcu = self
      .mcu
      .as_deref()
      .or(env.mcu())
      .unwrap_or(DEFAULT_MCU)
      .to_lowercase();

    let packages_dir = || self.packages_dir.clone().unwrap_or_else(paths::packages_dir);
    let framework_dir = self
      .framework_dir
      .clone()
      .unwrap_or_else(|| paths::framework_dir(&packages_dir()));
    let libs_dir = self
      .libs_dir
      .clone()
      .unwrap_or_else(|| paths::framework_libs_dir(&packages_dir(), &mcu));
    let libs_root = libs_dir
      .parent()
      .map(Path::to_path_buf)
      .unwrap_or_else(|| paths::framework_libs_root(&packages_dir()));

    let context = ProjectContext {
      project_dir: self.project_dir.clone(),
      env_name: env.name().to_string(),
      paths: SessionPaths {
        framework_dir,
        libs_dir,
        project_src_dir: config.src_dir(&self.project_dir),
      },
      libs_root,
      options: env.component_options(),
      limits: Limits {
        min_component_entry_len: self.min_entry_len,
        max_removal_ratio: self.max_removal_ratio,
      },
      wants_addition: env.wants_addition(),
      wants_removal: env.wants_removal(),
      custom_sdkconfig: env.custom_sdkconfig().map(str::to_string),
      frameworks: env.frameworks(),
      mcu,
    };
    debug!(env = %context.env_name, mcu = %context.mcu, libs = %context.paths.libs_dir.display(), "project resolved");
    Ok(context)
  }
}

impl ProjectContext {
  pub fn manager(&self) -> ComponentManager {
    ComponentManager::new(self.paths.clone(), &self.mcu, self.options.clone(), self.limits)
  }
}
