//! Shared fixture for session tests.

use std::fs;
use std::path::{Path, PathBuf};

use espcomp_lib::changelog::ChangeLog;
use espcomp_lib::session::{ComponentManager, ComponentOptions, Limits, SessionPaths};
use tempfile::TempDir;

pub const RECIPE: &str = r#"Import("env")

from os.path import join

FRAMEWORK_SDK_DIR = env.PioPlatform().get_package_dir("framework-arduinoespressif32-libs")

env.Append(
    CPPPATH=[
        join(FRAMEWORK_SDK_DIR, "include", "newlib", "platform_include"),
        join(FRAMEWORK_SDK_DIR, "include", "freertos", "config", "include"),
        join(FRAMEWORK_SDK_DIR, "include", "esp_timer", "include"),
        join(FRAMEWORK_SDK_DIR, "include", "esp_wifi", "include"),
        join(FRAMEWORK_SDK_DIR, "include", "bt", "include", "esp32", "include"),
        join(FRAMEWORK_SDK_DIR, "include", "espressif__esp_hosted", "include"),
        join(FRAMEWORK_SDK_DIR, "include", "esp32_camera", "driver", "include"),
        join(FRAMEWORK_SDK_DIR, "include", "lwip", "include"),
        join(FRAMEWORK_SDK_DIR, "include", "log", "include"),
        join(FRAMEWORK_SDK_DIR, "include", "nvs_flash", "include"),
        join(FRAMEWORK_SDK_DIR, "include", "spi_flash", "include"),
        join(FRAMEWORK_SDK_DIR, "include", "driver", "include")
    ],

    LIBPATH=[
        join(FRAMEWORK_SDK_DIR, "lib"),
        join(FRAMEWORK_SDK_DIR, "ld")
    ],

    CPPDEFINES=[
        "ESP_PLATFORM",
        ("IDF_VER", '\\"v5.4\\"'),
        "ARDUINO_ARCH_ESP32"
    ]
)
"#;

pub const FRAMEWORK_MANIFEST: &str = r#"dependencies:
  idf: ">=5.1"
  espressif/esp_hosted:
    version: "^0.0.25"
    rules:
      - if: "target == esp32p4"
  espressif/mdns: "^1.4.0"
"#;

pub const SKETCH: &str = r#"#include <Arduino.h>
#include <WiFi.h>

void setup() { WiFi.begin("ssid", "pass"); }
void loop() {}
"#;

/// Isolated framework, SDK and project tree.
pub struct Fixture {
  pub temp: TempDir,
}

impl Fixture {
  pub fn new() -> Self {
    let fixture = Self {
      temp: TempDir::new().unwrap(),
    };
    fixture.write_file("libs/esp32/pioarduino-build.py", RECIPE);
    fixture.write_file("framework/idf_component.yml", FRAMEWORK_MANIFEST);
    fixture.write_file("project/src/main.cpp", SKETCH);
    for dir in ["espressif__esp_hosted", "bt", "esp_wifi"] {
      fs::create_dir_all(fixture.include_root().join(dir).join("include")).unwrap();
    }
    fixture
  }

  /// Write a file relative to the temp directory.
  pub fn write_file(&self, relative_path: &str, content: &str) {
    let path = self.temp.path().join(relative_path);
    if let Some(parent) = path.parent() {
      fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).unwrap();
  }

  pub fn path(&self, relative_path: &str) -> PathBuf {
    self.temp.path().join(relative_path)
  }

  pub fn libs_dir(&self) -> PathBuf {
    self.path("libs/esp32")
  }

  pub fn include_root(&self) -> PathBuf {
    self.libs_dir().join("include")
  }

  pub fn recipe_path(&self) -> PathBuf {
    self.libs_dir().join("pioarduino-build.py")
  }

  pub fn recipe(&self) -> String {
    fs::read_to_string(self.recipe_path()).unwrap()
  }

  pub fn framework_manifest(&self) -> PathBuf {
    self.path("framework/idf_component.yml")
  }

  pub fn paths(&self) -> SessionPaths {
    SessionPaths {
      framework_dir: self.path("framework"),
      libs_dir: self.libs_dir(),
      project_src_dir: self.path("project/src"),
    }
  }

  pub fn manager(&self, options: ComponentOptions) -> ComponentManager {
    ComponentManager::with_log(self.paths(), "esp32", options, Limits::default(), ChangeLog::quiet())
  }
}

pub fn exists(path: &Path) -> bool {
  path.exists()
}

pub fn ignore(entries: &[&str]) -> ComponentOptions {
  ComponentOptions {
    lib_ignore: entries.iter().map(|e| e.to_string()).collect(),
    ..Default::default()
  }
}
