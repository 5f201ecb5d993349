mod cmd;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use cmd::ProjectArgs;
use output::{OutputFormat, print_error};

/// espcomp - ESP32 Arduino framework component manager
#[derive(Parser)]
#[command(name = "espcomp")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable verbose output
  #[arg(short, long, global = true)]
  verbose: bool,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Apply custom_component_add/remove and lib_ignore of an environment
  Apply {
    #[command(flatten)]
    project: ProjectArgs,
  },

  /// Strip include entries of the environment's lib_ignore libraries
  Ignore {
    #[command(flatten)]
    project: ProjectArgs,
  },

  /// Put the original build recipe back (post-build)
  Restore {
    #[command(flatten)]
    project: ProjectArgs,
  },

  /// Show the include directory a library name maps to
  Map {
    /// Library names as written in lib_ignore
    #[arg(required = true)]
    names: Vec<String>,

    /// Arduino framework directory
    #[arg(long, env = "ESPCOMP_FRAMEWORK_DIR")]
    framework_dir: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    output: OutputFormat,
  },

  /// List SDK components the project sources appear to use
  Analyze {
    #[command(flatten)]
    project: ProjectArgs,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    output: OutputFormat,
  },

  /// Decide whether the framework must be reinstalled or recompiled
  Sdkconfig {
    #[command(flatten)]
    project: ProjectArgs,

    /// Board level espidf.custom_sdkconfig
    #[arg(long, env = "ESPCOMP_BOARD_SDKCONFIG", default_value = "")]
    board_sdkconfig: String,

    /// Board build.extra_flags
    #[arg(long, env = "ESPCOMP_EXTRA_FLAGS", default_value = "", allow_hyphen_values = true)]
    extra_flags: String,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    output: OutputFormat,
  },
}

fn main() -> ExitCode {
  let cli = Cli::parse();

  let default_level = if cli.verbose { "debug" } else { "warn" };
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
    .with_writer(std::io::stderr)
    .without_time()
    .init();

  match run(cli.command) {
    Ok(()) => ExitCode::SUCCESS,
    Err(e) => {
      print_error(&format!("{:#}", e));
      ExitCode::FAILURE
    }
  }
}

fn run(command: Commands) -> Result<()> {
  match command {
    Commands::Apply { project } => cmd::cmd_apply(&project),
    Commands::Ignore { project } => cmd::cmd_ignore(&project),
    Commands::Restore { project } => cmd::cmd_restore(&project),
    Commands::Map {
      names,
      framework_dir,
      output,
    } => cmd::cmd_map(&names, framework_dir, output),
    Commands::Analyze { project, output } => cmd::cmd_analyze(&project, output),
    Commands::Sdkconfig {
      project,
      board_sdkconfig,
      extra_flags,
      output,
    } => cmd::cmd_sdkconfig(&project, board_sdkconfig, extra_flags, output),
  }
}
