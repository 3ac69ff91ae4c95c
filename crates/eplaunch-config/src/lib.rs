//! # eplaunch-config
//!
//! Configuration system for the episode launcher. Reads `eplaunch.toml`, then
//! environment variables, in that precedence order. Also loads the external
//! YAML task catalog.

pub mod catalog;
pub mod loader;
pub mod schema;

pub use catalog::list_tasks;
pub use loader::ConfigLoader;
pub use schema::{BatchSource, ConfigWarning, LaunchConfig, WarningSeverity, expand_home};
