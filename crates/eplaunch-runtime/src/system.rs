//! Real clock and process runner used by the binary.

use async_trait::async_trait;
use chrono::Utc;
use std::process::Stdio;
use tracing::info;

use eplaunch_core::{
    LaunchError, ProcessRunner, ProcessStatus, RecorderInvocation, Result, RunClock, RunStamp,
};

/// Wall clock and the local machine's hostname.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl RunClock for SystemClock {
    fn now(&self) -> RunStamp {
        let now = Utc::now();
        let nanos = i128::from(now.timestamp()) * 1_000_000_000
            + i128::from(now.timestamp_subsec_nanos());
        RunStamp::from_epoch_nanos(nanos)
    }

    fn hostname(&self) -> String {
        std::process::Command::new("hostname")
            .output()
            .ok()
            .filter(|o| o.status.success())
            .and_then(|o| String::from_utf8(o.stdout).ok())
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .or_else(|| std::env::var("HOSTNAME").ok())
            .unwrap_or_else(|| "unknown".to_string())
    }
}

/// Spawns the recorder attached to this terminal and waits for it.
#[derive(Debug, Default, Clone, Copy)]
pub struct CommandRunner;

#[async_trait]
impl ProcessRunner for CommandRunner {
    async fn run(&self, invocation: &RecorderInvocation) -> Result<ProcessStatus> {
        let mut cmd = tokio::process::Command::new(&invocation.program);
        cmd.args(&invocation.args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());
        if let Some(ref dir) = invocation.working_dir {
            cmd.current_dir(dir);
        }

        info!(program = %invocation.program, args = ?invocation.args, "launching recorder");
        let status = cmd.status().await.map_err(|e| LaunchError::Recorder {
            program: invocation.program.clone(),
            reason: e.to_string(),
        })?;
        info!(code = ?status.code(), "recorder exited");
        Ok(ProcessStatus {
            code: status.code(),
        })
    }
}
