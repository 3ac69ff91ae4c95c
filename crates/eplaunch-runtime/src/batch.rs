//! Batch id resolution.

use std::path::Path;
use tracing::debug;

use eplaunch_config::{BatchSource, LaunchConfig};
use eplaunch_core::{BatchId, Result};

/// Where the batch id for a run comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchPolicy {
    /// The same id every run.
    Fixed(BatchId),
    /// One past the highest numeric batch found in the save folder.
    Next,
}

impl BatchPolicy {
    pub fn from_config(config: &LaunchConfig) -> Self {
        match config.batch.source {
            BatchSource::Fixed => BatchPolicy::Fixed(BatchId::new(config.batch.id.trim())),
            BatchSource::Next => BatchPolicy::Next,
        }
    }

    /// Resolve the id for a run writing into `folder`. Only reads the folder.
    pub async fn resolve(&self, folder: &Path) -> Result<BatchId> {
        match self {
            BatchPolicy::Fixed(id) => Ok(id.clone()),
            BatchPolicy::Next => next_batch_id(folder).await,
        }
    }
}

/// Scan `folder` for `batch_<n>__<stamp>__episode.json` and return `max(n) + 1`.
pub async fn next_batch_id(folder: &Path) -> Result<BatchId> {
    if !tokio::fs::metadata(folder).await.is_ok_and(|m| m.is_dir()) {
        return Ok(BatchId::new("1"));
    }
    let mut highest = 0u64;
    let mut entries = tokio::fs::read_dir(folder).await?;
    while let Some(entry) = entries.next_entry().await? {
        if let Some(n) = entry.file_name().to_str().and_then(batch_number) {
            highest = highest.max(n);
        }
    }
    let next = highest.saturating_add(1);
    debug!(folder = %folder.display(), next, "next batch id");
    Ok(BatchId::new(next.to_string()))
}

/// Numeric batch id of a metadata file name, if it has one.
fn batch_number(file_name: &str) -> Option<u64> {
    let rest = file_name
        .strip_prefix("batch_")?
        .strip_suffix("__episode.json")?;
    let (id, _stamp) = rest.split_once("__")?;
    id.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_number_parsing() {
        assert_eq!(batch_number("batch_1__170__episode.json"), Some(1));
        assert_eq!(batch_number("batch_42__170__episode.json"), Some(42));
        assert_eq!(batch_number("batch_1__170.hdf5"), None);
        assert_eq!(batch_number("batch_pilot__170__episode.json"), None);
        assert_eq!(batch_number("notes.txt"), None);
    }

    #[tokio::test]
    async fn test_fixed_policy_ignores_folder() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("batch_9__1__episode.json"), "{}").unwrap();
        let policy = BatchPolicy::Fixed(BatchId::new("1"));
        assert_eq!(policy.resolve(dir.path()).await.unwrap(), BatchId::new("1"));
    }

    #[tokio::test]
    async fn test_next_in_missing_folder_starts_at_one() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("not_yet");
        assert_eq!(next_batch_id(&missing).await.unwrap(), BatchId::new("1"));
        assert!(!missing.exists());
    }

    #[tokio::test]
    async fn test_next_skips_past_highest() {
        let dir = tempfile::tempdir().unwrap();
        for name in [
            "batch_1__100__episode.json",
            "batch_3__200__episode.json",
            "batch_3__200.hdf5",
            "batch_7__300.hdf5",
            "batch_x__400__episode.json",
        ] {
            std::fs::write(dir.path().join(name), "").unwrap();
        }
        assert_eq!(next_batch_id(dir.path()).await.unwrap(), BatchId::new("4"));
    }

    #[test]
    fn test_policy_from_config() {
        let mut config = LaunchConfig::default();
        config.batch.id = " 5 ".into();
        assert_eq!(
            BatchPolicy::from_config(&config),
            BatchPolicy::Fixed(BatchId::new("5"))
        );
        config.batch.source = BatchSource::Next;
        assert_eq!(BatchPolicy::from_config(&config), BatchPolicy::Next);
    }
}
