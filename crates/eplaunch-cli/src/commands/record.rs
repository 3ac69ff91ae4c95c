use console::style;
use std::sync::Arc;
use tracing::info;

use eplaunch_config::LaunchConfig;
use eplaunch_core::{Result, RunOutcome};
use eplaunch_runtime::{CommandRunner, LaunchWorkflow, SystemClock, WorkflowSettings};

use crate::terminal::TerminalPrompt;

/// Run one interactive episode launch on this terminal.
pub(super) async fn cmd_record(config: LaunchConfig) -> Result<i32> {
    let settings = WorkflowSettings::from_config(&config);
    info!(
        catalog = %settings.catalog_path.display(),
        save_folder = %settings.save_folder.display(),
        recorder = %settings.recorder_program,
        "starting episode launch"
    );

    let workflow = LaunchWorkflow::new(settings, Arc::new(SystemClock), Arc::new(CommandRunner));
    let mut prompt = TerminalPrompt::new();

    println!("{}", style("Episode launch").bold());
    let report = workflow.run(&mut prompt).await?;

    match &report.outcome {
        RunOutcome::Aborted | RunOutcome::Completed { .. } => {}
        RunOutcome::RecorderFailed { paths, code, .. } => {
            let status = code.map_or_else(|| "a signal".to_string(), |c| format!("status {c}"));
            eprintln!(
                "{} Recorder exited with {status}; metadata kept at {}",
                style("⚠️").yellow(),
                paths.metadata.display()
            );
        }
    }
    Ok(report.outcome.exit_code())
}
