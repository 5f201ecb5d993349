//! `custom_component_add` / `custom_component_remove` handling.

use espcomp_lib::manifest::{Manifest, ManifestStore, backup_path};
use espcomp_lib::session::{ComponentOptions, SessionState};

use super::common::{Fixture, exists};

fn load(fixture: &Fixture) -> Manifest {
  ManifestStore::try_load(&fixture.framework_manifest()).unwrap()
}

#[test]
fn removes_component_and_its_includes() {
  let fixture = Fixture::new();
  let mut manager = fixture.manager(ComponentOptions {
    component_remove: Some("espressif/esp_hosted\n\n  ".to_string()),
    ..Default::default()
  });

  manager.handle_component_settings(false, true);

  let manifest = load(&fixture);
  assert!(!manifest.contains("espressif/esp_hosted"));
  assert!(manifest.contains("espressif/mdns"));
  assert!(!exists(&fixture.include_root().join("espressif__esp_hosted")));
  assert!(exists(&fixture.include_root().join("bt")));
  assert!(!fixture.recipe().contains("espressif__esp_hosted"));

  let log = manager.log();
  assert!(log.contains("Removed component: espressif/esp_hosted"));
  assert!(log.contains("Removed include directory:"));
  assert!(log.contains("Cleaned up CPPPATH entries for removed components"));
  assert!(log.contains("Session completed with"));
  assert!(manager.removed_components().contains("espressif__esp_hosted"));
}

#[test]
fn adds_components_and_skips_short_entries() {
  let fixture = Fixture::new();
  let mut manager = fixture.manager(ComponentOptions {
    component_add: Some("espressif/esp-dsp@^1.4\nabcd\nespressif/esp_insights".to_string()),
    ..Default::default()
  });

  manager.handle_component_settings(true, false);

  let manifest = load(&fixture);
  assert_eq!(manifest.version_of("espressif/esp-dsp").as_deref(), Some("^1.4"));
  assert_eq!(manifest.version_of("espressif/esp_insights").as_deref(), Some("*"));
  assert!(!manifest.contains("abcd"));
  assert!(
    manager
      .log()
      .contains("Added component: espressif/esp-dsp (version: ^1.4)")
  );
  assert_eq!(manager.state(), SessionState::ComponentsEdited);
}

#[test]
fn existing_component_is_not_overwritten() {
  let fixture = Fixture::new();
  let mut manager = fixture.manager(ComponentOptions {
    component_add: Some("espressif/mdns@9.9.9".to_string()),
    ..Default::default()
  });

  manager.handle_component_settings(true, false);

  assert_eq!(load(&fixture).version_of("espressif/mdns").as_deref(), Some("^1.4.0"));
  assert!(!manager.log().contains("Added component"));
}

#[test]
fn manifest_is_backed_up_once() {
  let fixture = Fixture::new();
  let options = ComponentOptions {
    component_remove: Some("espressif/mdns".to_string()),
    ..Default::default()
  };

  let mut manager = fixture.manager(options.clone());
  manager.handle_component_settings(false, true);
  let backup = backup_path(&fixture.framework_manifest());
  assert!(exists(&backup));
  let original = std::fs::read_to_string(&backup).unwrap();
  assert!(original.contains("espressif/mdns"));

  let mut manager = fixture.manager(options);
  manager.handle_component_settings(false, true);
  assert_eq!(std::fs::read_to_string(&backup).unwrap(), original);
  assert!(!manager.log().contains("Created backup:"));
}

#[test]
fn creates_project_manifest_when_none_exists() {
  let fixture = Fixture::new();
  std::fs::remove_file(fixture.framework_manifest()).unwrap();
  let mut manager = fixture.manager(ComponentOptions {
    component_add: Some("espressif/esp-dsp".to_string()),
    ..Default::default()
  });

  manager.handle_component_settings(true, false);

  let path = fixture.path("project/src/idf_component.yml");
  let manifest = ManifestStore::try_load(&path).unwrap();
  assert_eq!(manifest.version_of("idf").as_deref(), Some(">=5.1"));
  assert_eq!(manifest.version_of("espressif/esp-dsp").as_deref(), Some("*"));
  assert!(manager.log().contains("Created new component.yml file at"));
}

#[test]
fn malformed_manifest_is_replaced() {
  let fixture = Fixture::new();
  fixture.write_file("framework/idf_component.yml", "dependencies: [unclosed\n");
  let mut manager = fixture.manager(ComponentOptions {
    component_add: Some("espressif/esp-dsp".to_string()),
    ..Default::default()
  });

  manager.handle_component_settings(true, false);

  let manifest = load(&fixture);
  assert!(manifest.contains("espressif/esp-dsp"));
  assert!(!manifest.contains("idf"));
}

#[test]
fn five_character_entry_is_the_shortest_accepted() {
  let fixture = Fixture::new();
  let mut manager = fixture.manager(ComponentOptions {
    component_add: Some("abcd\nabcde".to_string()),
    ..Default::default()
  });

  manager.handle_component_settings(true, false);

  let manifest = load(&fixture);
  assert!(!manifest.contains("abcd"));
  assert_eq!(manifest.version_of("abcde").as_deref(), Some("*"));
}

#[test]
fn failed_manifest_save_is_logged_and_session_continues() {
  let fixture = Fixture::new();
  std::fs::create_dir(fixture.path("framework/idf_component.yml.tmp")).unwrap();
  let mut manager = fixture.manager(ComponentOptions {
    component_add: Some("espressif/esp-dsp".to_string()),
    lib_ignore: vec!["BLE".to_string()],
    ..Default::default()
  });

  manager.handle_component_settings(true, false);

  assert_eq!(
    std::fs::read_to_string(fixture.framework_manifest()).unwrap(),
    super::common::FRAMEWORK_MANIFEST
  );
  let log = manager.log();
  assert!(log.contains("Error saving component configuration"));
  assert!(!log.contains("Saved component configuration"));
  assert!(log.contains("Processed 1 ignored libraries"));
  assert!(!fixture.recipe().contains(r#""include", "bt""#));
}

#[test]
fn untouched_entries_keep_their_shape() {
  let fixture = Fixture::new();
  fixture.write_file(
    "framework/idf_component.yml",
    "dependencies:\n  idf: 5.1\n  espressif/mdns:\n  local_comp:\n    path: ../local_comp\n",
  );
  let mut manager = fixture.manager(ComponentOptions {
    component_add: Some("espressif/esp-dsp".to_string()),
    ..Default::default()
  });

  manager.handle_component_settings(true, false);

  let manifest = load(&fixture);
  assert_eq!(manifest.version_of("idf").as_deref(), Some("5.1"));
  assert!(manifest.contains("espressif/mdns"));
  assert!(manifest.dependencies["local_comp"].is_path());
  assert_eq!(manifest.version_of("local_comp"), None);
  assert_eq!(manifest.version_of("espressif/esp-dsp").as_deref(), Some("*"));
}
