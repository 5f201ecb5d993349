//! End-to-end component session tests over a fake framework tree.

mod common;
mod components_tests;
mod ignore_tests;
mod restore_tests;
