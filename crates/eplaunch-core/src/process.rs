use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::ffi::{OsStr, OsString};
use std::path::PathBuf;

/// A fully resolved recorder command line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecorderInvocation {
    pub program: String,
    pub args: Vec<OsString>,
    /// Working directory for the child (None = inherit).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub working_dir: Option<PathBuf>,
}

impl RecorderInvocation {
    /// Value following `flag` in the argument list, if present.
    pub fn flag_value(&self, flag: &str) -> Option<&OsStr> {
        self.args
            .iter()
            .position(|a| a == flag)
            .and_then(|i| self.args.get(i + 1))
            .map(OsString::as_os_str)
    }
}

/// Exit status of a finished child process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessStatus {
    /// Exit code, or None when the child was terminated by a signal.
    pub code: Option<i32>,
}

impl ProcessStatus {
    pub fn from_code(code: i32) -> Self {
        Self { code: Some(code) }
    }

    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Runs the external recorder and waits for it to exit.
#[async_trait]
pub trait ProcessRunner: Send + Sync {
    /// Spawn `invocation`, wait for completion, and report its status.
    /// Errors only when the process could not be started or awaited.
    async fn run(&self, invocation: &RecorderInvocation) -> crate::Result<ProcessStatus>;
}
