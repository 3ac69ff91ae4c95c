//! # eplaunch-runtime
//!
//! The launch workflow: load the task catalog, ask who is operating (and
//! optionally which task), confirm, write the episode metadata, then hand off
//! to the external recorder and report how it exited.

pub mod batch;
pub mod menu;
pub mod metadata;
pub mod system;
pub mod testing;
pub mod workflow;

pub use batch::BatchPolicy;
pub use system::{CommandRunner, SystemClock};
pub use workflow::{LaunchReport, LaunchWorkflow, WorkflowSettings};
