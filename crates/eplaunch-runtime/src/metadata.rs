//! Episode metadata record and its on-disk file.

use std::path::{Path, PathBuf};
use tracing::info;

use eplaunch_core::{ArtifactPaths, BatchId, Result, RunMetadata, RunStamp};

/// Assemble the metadata record for one run.
pub fn build_metadata(
    operator: &str,
    task_name: &str,
    batch_id: &BatchId,
    stamp: &RunStamp,
    host_name: &str,
) -> RunMetadata {
    RunMetadata {
        operator: operator.to_string(),
        batch_id: batch_id.to_string(),
        timestamp: stamp.to_string(),
        task_name: task_name.to_string(),
        host_name: host_name.to_string(),
    }
}

/// Write `metadata` as one JSON line under `save_folder`, creating the folder
/// if needed. Returns the file written.
pub async fn write_metadata(save_folder: &Path, metadata: &RunMetadata) -> Result<PathBuf> {
    tokio::fs::create_dir_all(save_folder).await?;
    let paths = ArtifactPaths::new(
        save_folder,
        &BatchId::new(metadata.batch_id.as_str()),
        &RunStamp::new(metadata.timestamp.as_str()),
    );
    let mut line = metadata.to_json_line()?;
    line.push('\n');
    tokio::fs::write(&paths.metadata, line).await?;
    info!(path = %paths.metadata.display(), "episode metadata written");
    Ok(paths.metadata)
}
