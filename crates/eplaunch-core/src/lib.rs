//! # eplaunch-core
//!
//! Core types, traits, and errors for the episode launcher. Every other crate
//! in the workspace speaks in these terms: task catalogs, operators, run
//! metadata, and the prompt/process/clock seams the workflow is built on.

pub mod clock;
pub mod error;
pub mod process;
pub mod prompt;
pub mod types;

pub use clock::RunClock;
pub use error::{LaunchError, Result};
pub use process::{ProcessRunner, ProcessStatus, RecorderInvocation};
pub use prompt::PromptProvider;
pub use types::*;
