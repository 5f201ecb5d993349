//! Implementation of the `espcomp sdkconfig` command.
//!
//! Reports whether the custom sdkconfig of an environment requires a
//! framework reinstall or a library compile before building.

use anyhow::Result;

use espcomp_lib::sdkconfig::{SdkconfigContext, fingerprint};

use super::ProjectArgs;
use crate::output::{OutputFormat, print_json, print_stat, print_success};

pub fn cmd_sdkconfig(
  args: &ProjectArgs,
  board_sdkconfig: String,
  extra_flags: String,
  output: OutputFormat,
) -> Result<()> {
  let context = args.load()?;

  let mut sdkconfig = SdkconfigContext::new(&context.project_dir, &context.mcu)
    .with_libs_root(&context.libs_root)
    .with_frameworks(&context.frameworks);
  sdkconfig.custom_options = context.custom_sdkconfig.clone();
  sdkconfig.board_sdkconfig = board_sdkconfig;
  sdkconfig.extra_flags = extra_flags;

  let state = sdkconfig.matches_custom_sdkconfig();
  let plan = sdkconfig.plan();
  let hash = context
    .custom_sdkconfig
    .as_deref()
    .map(|options| fingerprint(options, &context.mcu));

  if output.is_json() {
    let json = serde_json::json!({
      "env": context.env_name,
      "mcu": context.mcu,
      "fingerprint": hash,
      "match": state,
      "plan": plan,
    });
    return print_json(&json);
  }

  print_success(&format!("sdkconfig for env:{} ({})", context.env_name, context.mcu));
  if let Some(hash) = &hash {
    print_stat("Fingerprint", hash);
  }
  print_stat("Custom sdkconfig", &plan.custom_sdkconfig.to_string());
  print_stat("Matches last build", &state.matching.to_string());
  print_stat("Unicore", &plan.unicore.to_string());
  print_stat("Reinstall framework", &plan.reinstall_framework.to_string());
  print_stat("Compile libraries", &plan.compile_libs.to_string());
  Ok(())
}
