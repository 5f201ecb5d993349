//! Implementation of the `espcomp map` command.

use std::path::PathBuf;

use anyhow::Result;
use serde::Serialize;

use espcomp_lib::mapper::LibraryMapper;
use espcomp_lib::platform::paths;

use crate::output::{OutputFormat, print_json, symbols};

#[derive(Debug, Serialize)]
struct Mapping<'a> {
  name: &'a str,
  include: String,
}

pub fn cmd_map(names: &[String], framework_dir: Option<PathBuf>, output: OutputFormat) -> Result<()> {
  let framework_dir = framework_dir.unwrap_or_else(|| paths::framework_dir(&paths::packages_dir()));
  let mapper = LibraryMapper::new(framework_dir);

  let mappings: Vec<Mapping> = names
    .iter()
    .map(|name| Mapping {
      name,
      include: mapper.to_include_name(name),
    })
    .collect();

  if output.is_json() {
    return print_json(&mappings);
  }

  for mapping in &mappings {
    println!("{} {} {}", mapping.name, symbols::ARROW, mapping.include);
  }
  Ok(())
}
