use serde::{Deserialize, Serialize};
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

/// Ordered task names, taken from the top-level keys of the catalog file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskCatalog {
    tasks: Vec<String>,
}

impl TaskCatalog {
    pub fn new(tasks: Vec<String>) -> Self {
        Self { tasks }
    }

    pub fn tasks(&self) -> &[String] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

/// Operators allowed to run a recording session, in menu order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperatorList {
    names: Vec<String>,
}

impl OperatorList {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Identifier grouping one recording attempt.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BatchId(String);

impl BatchId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Nanosecond Unix timestamp shared by every artifact of one run.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RunStamp(String);

impl RunStamp {
    pub fn new(stamp: impl Into<String>) -> Self {
        Self(stamp.into())
    }

    pub fn from_epoch_nanos(nanos: i128) -> Self {
        Self(nanos.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RunStamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Output locations derived from the save folder, batch id, and run stamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub metadata: PathBuf,
    pub recording: PathBuf,
}

impl ArtifactPaths {
    pub fn new(save_folder: &Path, batch_id: &BatchId, stamp: &RunStamp) -> Self {
        Self {
            metadata: save_folder.join(format!("batch_{batch_id}__{stamp}__episode.json")),
            recording: save_folder.join(format!("batch_{batch_id}__{stamp}.hdf5")),
        }
    }
}

/// Per-episode metadata record. Field order is the on-disk key order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunMetadata {
    pub operator: String,
    pub batch_id: String,
    pub timestamp: String,
    pub task_name: String,
    pub host_name: String,
}

impl RunMetadata {
    /// Render as a single-line JSON object with `": "` and `", "` separators.
    pub fn to_json_line(&self) -> crate::Result<String> {
        let mut buf = Vec::with_capacity(128);
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, InlineFormatter);
        self.serialize(&mut ser)?;
        // serde_json only ever emits UTF-8.
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}

/// Compact JSON with a space after every `:` and `,`.
struct InlineFormatter;

impl serde_json::ser::Formatter for InlineFormatter {
    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first { Ok(()) } else { writer.write_all(b", ") }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }

    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first { Ok(()) } else { writer.write_all(b", ") }
    }
}

/// Steps of one launch. `Aborted`, `Done`, and `RecorderFailed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowState {
    Start,
    CatalogLoaded,
    OperatorSelected,
    TaskSelected,
    Confirmed,
    Aborted,
    MetadataWritten,
    RecordingLaunched,
    Done,
    RecorderFailed,
}

impl WorkflowState {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            WorkflowState::Aborted | WorkflowState::Done | WorkflowState::RecorderFailed
        )
    }
}

impl fmt::Display for WorkflowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WorkflowState::Start => "start",
            WorkflowState::CatalogLoaded => "catalog_loaded",
            WorkflowState::OperatorSelected => "operator_selected",
            WorkflowState::TaskSelected => "task_selected",
            WorkflowState::Confirmed => "confirmed",
            WorkflowState::Aborted => "aborted",
            WorkflowState::MetadataWritten => "metadata_written",
            WorkflowState::RecordingLaunched => "recording_launched",
            WorkflowState::Done => "done",
            WorkflowState::RecorderFailed => "recorder_failed",
        };
        f.write_str(name)
    }
}

/// How a launch ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Declined at the confirmation prompt. Nothing was written or launched.
    Aborted,
    /// The recorder exited successfully.
    Completed {
        metadata: RunMetadata,
        paths: ArtifactPaths,
    },
    /// The recorder exited non-zero (`code`) or was killed (`None`).
    RecorderFailed {
        metadata: RunMetadata,
        paths: ArtifactPaths,
        code: Option<i32>,
    },
}

impl RunOutcome {
    /// Process exit status the launcher should report.
    pub fn exit_code(&self) -> i32 {
        match self {
            RunOutcome::Aborted | RunOutcome::Completed { .. } => 0,
            RunOutcome::RecorderFailed { code, .. } => match code {
                Some(0) | None => 1,
                Some(c) => *c,
            },
        }
    }
}
