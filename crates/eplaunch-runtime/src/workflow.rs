use std::ffi::OsString;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use eplaunch_config::{LaunchConfig, list_tasks};
use eplaunch_core::{
    ArtifactPaths, BatchId, LaunchError, OperatorList, ProcessRunner, PromptProvider,
    RecorderInvocation, Result, RunClock, RunOutcome, WorkflowState,
};

use crate::batch::BatchPolicy;
use crate::menu::{ABORTED, confirm, prompt_select};
use crate::metadata::{build_metadata, write_metadata};

pub const COMPLETED: &str = "Recording completed.";

/// Everything a launch needs to know up front.
#[derive(Debug, Clone)]
pub struct WorkflowSettings {
    pub catalog_path: PathBuf,
    pub operators: OperatorList,
    pub select_task: bool,
    pub placeholder_task: String,
    pub batch: BatchPolicy,
    pub save_folder: PathBuf,
    pub per_operator_folder: bool,
    pub recorder_program: String,
    pub recorder_args: Vec<String>,
    pub working_dir: Option<PathBuf>,
}

impl WorkflowSettings {
    pub fn from_config(config: &LaunchConfig) -> Self {
        Self {
            catalog_path: config.catalog.resolved_path(),
            operators: config.operators.to_list(),
            select_task: config.catalog.select_task,
            placeholder_task: config.catalog.placeholder_task.clone(),
            batch: BatchPolicy::from_config(config),
            save_folder: config.recording.save_folder_path(),
            per_operator_folder: config.recording.per_operator_folder,
            recorder_program: config.recording.program.clone(),
            recorder_args: config.recording.args.clone(),
            working_dir: config.recording.working_dir.clone(),
        }
    }

    /// Folder the artifacts for `operator` land in.
    pub fn folder_for(&self, operator: &str) -> PathBuf {
        if self.per_operator_folder {
            self.save_folder.join(operator)
        } else {
            self.save_folder.clone()
        }
    }

    /// Recorder command line for one batch.
    pub fn recorder_invocation(&self, batch_id: &BatchId, paths: &ArtifactPaths) -> RecorderInvocation {
        let mut args: Vec<OsString> = self.recorder_args.iter().map(OsString::from).collect();
        args.push("--batch_id".into());
        args.push(batch_id.as_str().into());
        args.push("--recording_path".into());
        args.push(paths.recording.clone().into_os_string());
        RecorderInvocation {
            program: self.recorder_program.clone(),
            args,
            working_dir: self.working_dir.clone(),
        }
    }
}

/// Outcome plus the states the launch passed through.
#[derive(Debug, Clone)]
pub struct LaunchReport {
    pub outcome: RunOutcome,
    pub states: Vec<WorkflowState>,
}

impl LaunchReport {
    pub fn final_state(&self) -> Option<WorkflowState> {
        self.states.last().copied()
    }
}

/// The episode launch: pick an operator (and task), confirm, write metadata,
/// run the recorder.
pub struct LaunchWorkflow {
    settings: WorkflowSettings,
    clock: Arc<dyn RunClock>,
    runner: Arc<dyn ProcessRunner>,
}

impl LaunchWorkflow {
    pub fn new(
        settings: WorkflowSettings,
        clock: Arc<dyn RunClock>,
        runner: Arc<dyn ProcessRunner>,
    ) -> Self {
        Self {
            settings,
            clock,
            runner,
        }
    }

    /// Run one launch to a terminal state.
    ///
    /// The timestamp is taken before anything else, so it marks when the
    /// launch started rather than when it was confirmed.
    pub async fn run(&self, prompt: &mut dyn PromptProvider) -> Result<LaunchReport> {
        let stamp = self.clock.now();
        let mut states = vec![WorkflowState::Start];
        info!(timestamp = %stamp, "episode launch started");

        let catalog = list_tasks(&self.settings.catalog_path)?;
        advance(&mut states, WorkflowState::CatalogLoaded);
        if self.settings.select_task && catalog.is_empty() {
            return Err(LaunchError::Catalog {
                path: self.settings.catalog_path.display().to_string(),
                reason: "no tasks to select from".into(),
            });
        }
        if self.settings.operators.is_empty() {
            return Err(LaunchError::ConfigValidation {
                field: "operators.names".into(),
                reason: "no operators configured".into(),
            });
        }

        let operator = prompt_select(prompt, "Select operator", self.settings.operators.names())?
            .to_string();
        advance(&mut states, WorkflowState::OperatorSelected);

        let task_name = if self.settings.select_task {
            let task = prompt_select(prompt, "Select task", catalog.tasks())?.to_string();
            advance(&mut states, WorkflowState::TaskSelected);
            task
        } else {
            self.settings.placeholder_task.clone()
        };

        let summary = format!("Selected task: {task_name}\nSelected operator: {operator}");
        if !confirm(prompt, &summary)? {
            prompt.show(ABORTED)?;
            advance(&mut states, WorkflowState::Aborted);
            info!("launch aborted at confirmation");
            return Ok(LaunchReport {
                outcome: RunOutcome::Aborted,
                states,
            });
        }
        advance(&mut states, WorkflowState::Confirmed);

        let folder = self.settings.folder_for(&operator);
        let batch_id = self.settings.batch.resolve(&folder).await?;
        let host_name = self.clock.hostname();
        let metadata = build_metadata(&operator, &task_name, &batch_id, &stamp, &host_name);
        let paths = ArtifactPaths::new(&folder, &batch_id, &stamp);
        write_metadata(&folder, &metadata).await?;
        advance(&mut states, WorkflowState::MetadataWritten);

        let invocation = self.settings.recorder_invocation(&batch_id, &paths);
        let status = self.runner.run(&invocation).await?;
        advance(&mut states, WorkflowState::RecordingLaunched);

        let outcome = if status.success() {
            prompt.show(COMPLETED)?;
            advance(&mut states, WorkflowState::Done);
            RunOutcome::Completed { metadata, paths }
        } else {
            match status.code {
                Some(code) => error!(code, "recorder exited with a failure status"),
                None => error!("recorder was terminated by a signal"),
            }
            advance(&mut states, WorkflowState::RecorderFailed);
            RunOutcome::RecorderFailed {
                metadata,
                paths,
                code: status.code,
            }
        };
        Ok(LaunchReport { outcome, states })
    }
}

fn advance(states: &mut Vec<WorkflowState>, next: WorkflowState) {
    match states.last() {
        Some(prev) if prev.is_terminal() => {
            warn!(%prev, %next, "transition after terminal state");
        }
        Some(prev) => debug!(%prev, %next, "workflow transition"),
        None => {}
    }
    states.push(next);
}
