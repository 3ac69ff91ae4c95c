//! Deterministic stand-ins for the terminal, the recorder, and the clock.
//!
//! Each double records what it was asked to do so tests can assert on it.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use eplaunch_core::{
    LaunchError, ProcessRunner, ProcessStatus, PromptProvider, RecorderInvocation, Result,
    RunClock, RunStamp,
};

/// A prompt that answers from a fixed script of input lines.
///
/// # Example
/// ```
/// use eplaunch_runtime::testing::ScriptedPrompt;
/// let prompt = ScriptedPrompt::new(["2", "y"]);
/// assert!(prompt.shown().is_empty());
/// ```
#[derive(Debug, Default)]
pub struct ScriptedPrompt {
    inputs: VecDeque<String>,
    shown: Vec<String>,
    prompts: Vec<String>,
}

impl ScriptedPrompt {
    pub fn new<I, S>(inputs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            inputs: inputs.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    /// Every block passed to `show`, in order.
    pub fn shown(&self) -> &[String] {
        &self.shown
    }

    /// Every prompt passed to `read_line`, in order.
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    pub fn count_shown(&self, text: &str) -> usize {
        self.shown.iter().filter(|s| s.as_str() == text).count()
    }

    /// Lines the workflow never read.
    pub fn remaining(&self) -> usize {
        self.inputs.len()
    }
}

impl PromptProvider for ScriptedPrompt {
    fn show(&mut self, text: &str) -> Result<()> {
        self.shown.push(text.to_string());
        Ok(())
    }

    fn read_line(&mut self, prompt: &str) -> Result<String> {
        self.prompts.push(prompt.to_string());
        self.inputs
            .pop_front()
            .ok_or_else(|| LaunchError::Interrupted("scripted input exhausted".into()))
    }
}

#[derive(Debug, Clone, Copy)]
enum RunnerBehavior {
    Exit(Option<i32>),
    SpawnFailure,
}

/// A process runner that records invocations instead of spawning anything.
#[derive(Clone)]
pub struct RecordingRunner {
    calls: Arc<Mutex<Vec<RecorderInvocation>>>,
    behavior: RunnerBehavior,
}

impl Default for RecordingRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingRunner {
    /// Runner whose recorder always exits 0.
    pub fn new() -> Self {
        Self {
            calls: Arc::new(Mutex::new(vec![])),
            behavior: RunnerBehavior::Exit(Some(0)),
        }
    }

    pub fn with_exit_code(mut self, code: i32) -> Self {
        self.behavior = RunnerBehavior::Exit(Some(code));
        self
    }

    /// Simulate a recorder killed by a signal.
    pub fn killed(mut self) -> Self {
        self.behavior = RunnerBehavior::Exit(None);
        self
    }

    /// Simulate a recorder that cannot be started.
    pub fn failing_to_spawn(mut self) -> Self {
        self.behavior = RunnerBehavior::SpawnFailure;
        self
    }

    pub fn calls(&self) -> Vec<RecorderInvocation> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProcessRunner for RecordingRunner {
    async fn run(&self, invocation: &RecorderInvocation) -> Result<ProcessStatus> {
        self.calls.lock().unwrap().push(invocation.clone());
        match self.behavior {
            RunnerBehavior::Exit(code) => Ok(ProcessStatus { code }),
            RunnerBehavior::SpawnFailure => Err(LaunchError::Recorder {
                program: invocation.program.clone(),
                reason: "No such file or directory (os error 2)".into(),
            }),
        }
    }
}

/// A clock frozen at one stamp on one host.
pub struct FixedClock {
    stamp: RunStamp,
    host: String,
    reads: AtomicUsize,
}

impl FixedClock {
    pub fn new(stamp: impl Into<String>, host: impl Into<String>) -> Self {
        Self {
            stamp: RunStamp::new(stamp),
            host: host.into(),
            reads: AtomicUsize::new(0),
        }
    }

    /// How many times `now()` was called.
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

impl RunClock for FixedClock {
    fn now(&self) -> RunStamp {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.stamp.clone()
    }

    fn hostname(&self) -> String {
        self.host.clone()
    }
}
