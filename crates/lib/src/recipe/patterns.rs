//! Regular expressions matching include registrations in the build recipe.
//!
//! The recipe is generated Python, so the same include directory can show up
//! in several textual shapes. Each pattern consumes whole lines including the
//! trailing newline.

use std::sync::OnceLock;

use regex::Regex;

/// Which family of registrations to strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternSet {
  /// Every known shape of an include path mentioning the library.
  IgnoredLibrary,
  /// Only `CPPPATH` entries pointing into a removed component.
  RemovedComponent,
}

pub fn include_patterns(name: &str, set: PatternSet) -> Result<Vec<Regex>, regex::Error> {
  let n = regex::escape(name);

  let mut sources = vec![
    format!(r#".*join\([^,]*,\s*"include",\s*"{n}"[^)]*\),?\n"#),
    format!(r#".*"include/{n}"[^,\n]*,?\n"#),
    format!(r#".*"[^"]*include[^"]*{n}[^"]*"[^,\n]*,?\n"#),
  ];

  if set == PatternSet::IgnoredLibrary {
    sources.extend([
      format!(r#".*"[^"]*/{n}/include[^"]*"[^,\n]*,?\n"#),
      format!(r#".*"[^"]*{n}[^"]*include[^"]*"[^,\n]*,?\n"#),
      format!(r#".*join\([^)]*"include"[^)]*"{n}"[^)]*\),?\n"#),
      format!(r#".*"{n}/include"[^,\n]*,?\n"#),
      format!(r#"[ \t]*"[^"]*/{n}/[^"]*",?\n"#),
    ]);
  }

  sources.iter().map(|s| Regex::new(s)).collect()
}

/// Collapses runs of blank lines left behind by removals.
pub fn blank_lines() -> &'static Regex {
  static RE: OnceLock<Regex> = OnceLock::new();
  RE.get_or_init(|| Regex::new(r"\n\s*\n").expect("static regex"))
}

/// Trailing comma before a closing bracket.
pub fn dangling_comma() -> &'static Regex {
  static RE: OnceLock<Regex> = OnceLock::new();
  RE.get_or_init(|| Regex::new(r",\s*\n\s*\]").expect("static regex"))
}
