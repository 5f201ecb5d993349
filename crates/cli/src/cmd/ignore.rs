//! Implementation of the `espcomp ignore` command.

use anyhow::Result;

use super::ProjectArgs;
use crate::output::{pluralize, print_info, print_stat, print_success};

pub fn cmd_ignore(args: &ProjectArgs) -> Result<()> {
  let context = args.load()?;

  if context.options.lib_ignore.is_empty() {
    print_info(&format!("No lib_ignore entries in env:{}", context.env_name));
    return Ok(());
  }

  let mut manager = context.manager();
  manager.handle_lib_ignore();

  let ignored = manager.ignored_libs();
  print_success(&format!("Ignored {}", pluralize(ignored.len(), "library include")));
  for name in ignored {
    print_stat("include", name);
  }
  Ok(())
}
