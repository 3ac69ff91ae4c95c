use thiserror::Error;

/// Unified error type for the episode launcher.
#[derive(Error, Debug)]
pub enum LaunchError {
    // ── Config errors ──────────────────────────────────────────
    #[error("config error: {0}")]
    Config(String),

    #[error("config validation failed: {field}: {reason}")]
    ConfigValidation { field: String, reason: String },

    // ── Task catalog errors ────────────────────────────────────
    #[error("task catalog {path}: {reason}")]
    Catalog { path: String, reason: String },

    // ── Interaction errors ─────────────────────────────────────
    #[error("input closed: {0}")]
    Interrupted(String),

    // ── Recorder errors ────────────────────────────────────────
    #[error("recorder failed to start: {program}: {reason}")]
    Recorder { program: String, reason: String },

    // ── Generic wrappers ───────────────────────────────────────
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl LaunchError {
    /// True for errors raised before any prompt because the setup is unusable.
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            LaunchError::Config(_) | LaunchError::ConfigValidation { .. } | LaunchError::Catalog { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, LaunchError>;
