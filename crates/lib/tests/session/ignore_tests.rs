//! `lib_ignore` handling.

use espcomp_lib::session::SessionState;

use super::common::{Fixture, ignore};

#[test]
fn strips_ignored_library_includes() {
  let fixture = Fixture::new();
  let mut manager = fixture.manager(ignore(&["BLE"]));

  manager.handle_lib_ignore();

  let recipe = fixture.recipe();
  assert!(!recipe.contains(r#""include", "bt""#));
  assert!(recipe.contains(r#""include", "esp_wifi""#));
  assert!(manager.log().contains("Removed 1 include entries for library 'bt'"));
  assert!(manager.log().contains("Processed 1 ignored libraries"));
  assert_eq!(manager.state(), SessionState::LibsIgnored);
}

#[test]
fn critical_components_survive() {
  let fixture = Fixture::new();
  let mut manager = fixture.manager(ignore(&["esp_timer", "esp_camera"]));

  manager.handle_lib_ignore();

  let recipe = fixture.recipe();
  assert!(recipe.contains(r#""include", "esp_timer""#));
  assert!(!recipe.contains(r#""include", "esp32_camera""#));
  assert!(manager.ignored_libs().contains("esp32_camera"));
  assert!(!manager.ignored_libs().contains("esp_timer"));
  assert!(manager.log().contains("Processed 1 ignored libraries"));
}

#[test]
fn used_libraries_are_kept() {
  let fixture = Fixture::new();
  let mut manager = fixture.manager(ignore(&["WiFi"]));

  manager.handle_lib_ignore();

  assert!(fixture.recipe().contains(r#""include", "esp_wifi""#));
  assert!(
    manager
      .log()
      .contains("Skipping removal of library 'esp_wifi' - detected as used in project")
  );
}

#[test]
fn second_pass_changes_nothing() {
  let fixture = Fixture::new();
  let mut manager = fixture.manager(ignore(&["BLE"]));
  manager.handle_lib_ignore();
  let first = fixture.recipe();

  let mut manager = fixture.manager(ignore(&["BLE"]));
  manager.handle_lib_ignore();

  assert_eq!(fixture.recipe(), first);
  assert!(!manager.log().contains("Removed 1 include entries"));
}

#[test]
fn missing_recipe_is_not_an_error() {
  let fixture = Fixture::new();
  std::fs::remove_file(fixture.recipe_path()).unwrap();
  let mut manager = fixture.manager(ignore(&["BLE"]));

  manager.handle_lib_ignore();

  assert!(!fixture.recipe_path().exists());
  assert!(!manager.log().contains("Error"));
}

#[test]
fn camera_used_in_sketch_is_kept() {
  let fixture = Fixture::new();
  fixture.write_file(
    "project/src/camera.cpp",
    "#include \"esp_camera.h\"\nvoid start() { esp_camera_init(&config); }\n",
  );
  let mut manager = fixture.manager(ignore(&["esp_camera"]));

  manager.handle_lib_ignore();

  assert!(fixture.recipe().contains(r#""include", "esp32_camera""#));
  assert!(
    manager
      .log()
      .contains("Skipping removal of library 'esp32_camera' - detected as used in project")
  );
}

#[test]
fn entry_cleaning_to_nothing_strips_nothing_else() {
  let fixture = Fixture::new();
  let mut manager = fixture.manager(ignore(&["BLE", "lib"]));

  manager.handle_lib_ignore();

  let recipe = fixture.recipe();
  assert!(!recipe.contains(r#""include", "bt""#));
  for kept in ["freertos", "esp_timer", "lwip", "log", "nvs_flash", "driver", "esp_wifi"] {
    assert!(recipe.contains(&format!(r#""include", "{}""#, kept)), "{} was stripped", kept);
  }
  assert!(manager.log().contains("Processed 1 ignored libraries"));
}
