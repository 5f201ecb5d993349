//! Implementation of the `espcomp restore` command, the post-build hook
//! putting the pristine build recipe back.

use anyhow::Result;

use super::ProjectArgs;
use crate::output::{print_info, print_success};

pub fn cmd_restore(args: &ProjectArgs) -> Result<()> {
  let context = args.load()?;
  let mut manager = context.manager();

  if !manager.patcher().has_backup() {
    print_info(&format!("No build recipe backup for {}", context.mcu));
    return Ok(());
  }

  manager.restore();
  print_success(&format!("Restored build recipe for {}", context.mcu));
  Ok(())
}
