//! Implementation of the `espcomp analyze` command.

use anyhow::Result;

use espcomp_lib::analyze::ProjectAnalyzer;

use super::ProjectArgs;
use crate::output::{OutputFormat, print_info, print_json, print_success, symbols};

pub fn cmd_analyze(args: &ProjectArgs, output: OutputFormat) -> Result<()> {
  let context = args.load()?;
  let analyzer = ProjectAnalyzer::new(&context.paths.project_src_dir, context.options.lib_deps.clone());
  let used = analyzer.used_components();

  if output.is_json() {
    let json = serde_json::json!({
      "env": context.env_name,
      "src_dir": context.paths.project_src_dir,
      "components": used,
    });
    return print_json(&json);
  }

  if used.is_empty() {
    print_info(&format!(
      "No SDK component usage detected in {}",
      context.paths.project_src_dir.display()
    ));
    return Ok(());
  }

  print_success(&format!("Components used by env:{}", context.env_name));
  for component in used {
    println!("  {} {}", symbols::INFO, component);
  }
  Ok(())
}
