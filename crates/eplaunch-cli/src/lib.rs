//! # eplaunch-cli
//!
//! Command-line interface for the episode launcher.
//!
//! ## Commands
//!
//! - `eplaunch` / `eplaunch record` — Pick an operator, confirm, record an episode
//! - `eplaunch tasks` — List the task catalog
//! - `eplaunch operators` — List configured operators
//! - `eplaunch config` — Show the resolved configuration
//! - `eplaunch init` — Write a starter eplaunch.toml
//! - `eplaunch doctor` — Check config, catalog, save folder, and recorder

pub mod commands;
pub mod terminal;

pub use commands::Cli;
