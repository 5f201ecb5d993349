//! espcomp-lib: ESP32 Arduino component bookkeeping
//!
//! This crate adjusts a prebuilt Arduino-on-IDF framework to a project's
//! needs at build time:
//! - `manifest`: the component dependency manifest (`idf_component.yml`)
//! - `analyze`: which SDK components the project sources appear to use
//! - `mapper`: library names to include directory names
//! - `recipe`: edits of the generated build recipe, with backup/restore
//! - `session`: the orchestrator tying the above together
//! - `sdkconfig`: custom sdkconfig rebuild decisions

pub mod analyze;
pub mod changelog;
pub mod consts;
pub mod manifest;
pub mod mapper;
pub mod platform;
pub mod project;
pub mod recipe;
pub mod sdkconfig;
pub mod session;
pub mod util;
