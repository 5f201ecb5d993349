//! Human-readable audit trail of every mutation performed in a session.
//!
//! Entries are printed to stdout as they are recorded so they show up in the
//! build output next to the compiler lines. The trail is never persisted.

use tracing::debug;

use crate::consts::CHANGE_LOG_PREFIX;

/// Ordered, append-only list of change messages.
#[derive(Debug, Clone)]
pub struct ChangeLog {
  entries: Vec<String>,
  echo: bool,
}

impl Default for ChangeLog {
  fn default() -> Self {
    Self::new()
  }
}

impl ChangeLog {
  /// Create a change log that echoes every entry to stdout.
  pub fn new() -> Self {
    Self {
      entries: Vec::new(),
      echo: true,
    }
  }

  /// Create a change log that only records entries.
  pub fn quiet() -> Self {
    Self {
      entries: Vec::new(),
      echo: false,
    }
  }

  /// Record a message and print it immediately.
  pub fn log(&mut self, message: impl Into<String>) {
    let message = message.into();
    debug!(change = %message, "component change");
    if self.echo {
      println!("{} {}", CHANGE_LOG_PREFIX, message);
    }
    self.entries.push(message);
  }

  pub fn count(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  pub fn entries(&self) -> &[String] {
    &self.entries
  }

  /// Whether any recorded entry contains `needle`.
  pub fn contains(&self, needle: &str) -> bool {
    self.entries.iter().any(|e| e.contains(needle))
  }
}
