//! Recipe backup and post-build restore.

use espcomp_lib::session::{ComponentOptions, SessionState};

use super::common::{Fixture, RECIPE, ignore};

#[test]
fn restore_returns_pristine_recipe() {
  let fixture = Fixture::new();
  let mut manager = fixture.manager(ignore(&["BLE", "esp_camera"]));
  manager.handle_component_settings(false, true);
  assert_ne!(fixture.recipe(), RECIPE);

  manager.restore();

  assert_eq!(fixture.recipe(), RECIPE);
  assert!(!manager.patcher().has_backup());
  assert!(manager.log().contains("Restored original pioarduino-build.py from backup"));
  assert_eq!(manager.state(), SessionState::Cleaned);
}

#[test]
fn backup_is_taken_once_per_mcu() {
  let fixture = Fixture::new();
  let mut manager = fixture.manager(ignore(&["BLE"]));
  manager.handle_lib_ignore();
  assert!(manager.patcher().has_backup());

  // A later session must not back up the already edited recipe.
  let mut manager = fixture.manager(ignore(&["esp_camera"]));
  manager.handle_lib_ignore();
  assert!(!manager.log().contains("Created backup"));

  manager.restore();
  assert_eq!(fixture.recipe(), RECIPE);
}

#[test]
fn restore_without_backup_is_a_no_op() {
  let fixture = Fixture::new();
  let mut manager = fixture.manager(ComponentOptions::default());

  manager.restore();

  assert_eq!(fixture.recipe(), RECIPE);
  assert!(manager.log().is_empty());
  assert_eq!(manager.state(), SessionState::Idle);
}
