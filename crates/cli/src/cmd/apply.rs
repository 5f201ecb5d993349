//! Implementation of the `espcomp apply` command.
//!
//! Runs a full component session for one environment: manifest edits,
//! include cleanup for removed components, then `lib_ignore`.

use anyhow::Result;
use tracing::info;

use super::ProjectArgs;
use crate::output::{pluralize, print_info, print_success, print_warning};

pub fn cmd_apply(args: &ProjectArgs) -> Result<()> {
  let context = args.load()?;

  if !context.wants_removal && !context.wants_addition {
    print_info(&format!("No component settings in env:{}", context.env_name));
    return Ok(());
  }

  let mut manager = context.manager();
  if !manager.patcher().recipe_path().exists() {
    print_warning(&format!(
      "Build recipe not found at {}",
      manager.patcher().recipe_path().display()
    ));
  }

  manager.handle_component_settings(context.wants_addition, context.wants_removal);

  let changes = manager.log().count();
  info!(env = %context.env_name, changes, "component session finished");
  print_success(&format!("env:{}: {}", context.env_name, pluralize(changes, "change")));
  Ok(())
}
