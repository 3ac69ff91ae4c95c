use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use eplaunch_core::OperatorList;

/// Root configuration — maps to `eplaunch.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LaunchConfig {
    pub catalog: CatalogConfig,
    pub operators: OperatorsConfig,
    pub batch: BatchConfig,
    pub recording: RecordingConfig,
    pub logging: LoggingConfig,
}

// ── Catalog ────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// YAML mapping whose top-level keys are the task names.
    pub path: PathBuf,
    /// Show the task menu. When off, `placeholder_task` is recorded instead.
    pub select_task: bool,
    /// Task name recorded when task selection is off.
    pub placeholder_task: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("configs/scene_tasks.yaml"),
            select_task: false,
            placeholder_task: String::new(),
        }
    }
}

impl CatalogConfig {
    /// Catalog path with a leading `~` expanded.
    pub fn resolved_path(&self) -> PathBuf {
        expand_home(&self.path.to_string_lossy())
    }
}

// ── Operators ──────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OperatorsConfig {
    /// Operator names in menu order.
    pub names: Vec<String>,
}

impl Default for OperatorsConfig {
    fn default() -> Self {
        Self {
            names: vec!["Deyu".into(), "Shine".into(), "Kris".into()],
        }
    }
}

impl OperatorsConfig {
    pub fn to_list(&self) -> OperatorList {
        OperatorList::new(self.names.iter().cloned())
    }
}

// ── Batch ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BatchSource {
    /// Always use `batch.id`.
    Fixed,
    /// One past the highest numeric batch already in the save folder.
    Next,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    pub source: BatchSource,
    /// Batch id used when `source = "fixed"`.
    pub id: String,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            source: BatchSource::Fixed,
            id: "1".into(),
        }
    }
}

// ── Recording ──────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordingConfig {
    /// Output directory for metadata and recordings. `~` expands to home.
    pub save_folder: String,
    /// Nest outputs under `<save_folder>/<operator>`.
    pub per_operator_folder: bool,
    /// Recorder executable.
    pub program: String,
    /// Arguments placed before `--batch_id` and `--recording_path`.
    pub args: Vec<String>,
    /// Working directory for the recorder (unset = inherit).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub working_dir: Option<PathBuf>,
}

impl Default for RecordingConfig {
    fn default() -> Self {
        Self {
            save_folder: "~/tmp_data".into(),
            per_operator_folder: false,
            program: "python".into(),
            args: vec!["record_episode.py".into()],
            working_dir: None,
        }
    }
}

impl RecordingConfig {
    /// Save folder with a leading `~` expanded.
    pub fn save_folder_path(&self) -> PathBuf {
        expand_home(&self.save_folder)
    }
}

// ── Logging ────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// "pretty", "compact", or "json".
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".into(),
            format: "pretty".into(),
        }
    }
}

/// Expand a leading `~` or `~/` to the user's home directory.
pub fn expand_home(raw: &str) -> PathBuf {
    let home = || dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    if raw == "~" {
        home()
    } else if let Some(rest) = raw.strip_prefix("~/") {
        home().join(rest)
    } else {
        Path::new(raw).to_path_buf()
    }
}

/// True when `name` joined onto a folder stays a direct child of it.
fn is_plain_folder_name(name: &str) -> bool {
    name != "." && name != ".." && !name.contains(['/', '\\'])
}

// ── Validation ─────────────────────────────────────────────────

/// A single config validation issue.
#[derive(Debug)]
pub struct ConfigWarning {
    pub field: String,
    pub message: String,
    pub severity: WarningSeverity,
    pub hint: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningSeverity {
    Error,
    Warning,
    Info,
}

impl std::fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let icon = match self.severity {
            WarningSeverity::Error => "❌",
            WarningSeverity::Warning => "⚠️ ",
            WarningSeverity::Info => "💡",
        };
        write!(f, "{} {}: {}", icon, self.field, self.message)?;
        if let Some(ref h) = self.hint {
            write!(f, "\n   ↳ {}", h)?;
        }
        Ok(())
    }
}

impl LaunchConfig {
    /// Validate the config and return a list of warnings/errors.
    /// Returns `Err` with all messages joined if any severity is Error.
    pub fn validate(&self) -> Result<Vec<ConfigWarning>, String> {
        let mut warnings = Vec::new();

        // ── Operators ───
        if self.operators.names.is_empty() {
            warnings.push(ConfigWarning {
                field: "operators.names".into(),
                message: "no operators configured".into(),
                severity: WarningSeverity::Error,
                hint: Some("Add at least one name, e.g. names = [\"Deyu\", \"Shine\"]".into()),
            });
        }
        for (i, name) in self.operators.names.iter().enumerate() {
            if name.trim().is_empty() {
                warnings.push(ConfigWarning {
                    field: format!("operators.names[{i}]"),
                    message: "operator name is blank".into(),
                    severity: WarningSeverity::Error,
                    hint: None,
                });
            } else if !is_plain_folder_name(name) {
                warnings.push(ConfigWarning {
                    field: format!("operators.names[{i}]"),
                    message: format!("operator '{name}' is not a plain folder name"),
                    severity: WarningSeverity::Error,
                    hint: Some("Names may not contain '/' or '\\' or be '.' or '..'".into()),
                });
            } else if self.operators.names[..i].contains(name) {
                warnings.push(ConfigWarning {
                    field: format!("operators.names[{i}]"),
                    message: format!("duplicate operator '{name}'"),
                    severity: WarningSeverity::Warning,
                    hint: Some("Duplicates show up twice in the menu".into()),
                });
            }
        }

        // ── Catalog ───
        if self.catalog.path.as_os_str().is_empty() {
            warnings.push(ConfigWarning {
                field: "catalog.path".into(),
                message: "catalog path is empty".into(),
                severity: WarningSeverity::Error,
                hint: Some("Point it at the YAML file listing scene tasks".into()),
            });
        }
        if !self.catalog.select_task && self.catalog.placeholder_task.is_empty() {
            warnings.push(ConfigWarning {
                field: "catalog.select_task".into(),
                message: "task selection is off; episodes are recorded with an empty task_name".into(),
                severity: WarningSeverity::Info,
                hint: Some("Set select_task = true or a placeholder_task".into()),
            });
        }

        // ── Batch ───
        if self.batch.source == BatchSource::Fixed && self.batch.id.trim().is_empty() {
            warnings.push(ConfigWarning {
                field: "batch.id".into(),
                message: "fixed batch id is empty".into(),
                severity: WarningSeverity::Error,
                hint: Some("Set e.g. id = \"1\" or use source = \"next\"".into()),
            });
        }

        // ── Recording ───
        if self.recording.program.trim().is_empty() {
            warnings.push(ConfigWarning {
                field: "recording.program".into(),
                message: "recorder program is empty".into(),
                severity: WarningSeverity::Error,
                hint: Some("Set e.g. program = \"python\"".into()),
            });
        }
        if self.recording.save_folder.trim().is_empty() {
            warnings.push(ConfigWarning {
                field: "recording.save_folder".into(),
                message: "save folder is empty".into(),
                severity: WarningSeverity::Error,
                hint: Some("Default is ~/tmp_data".into()),
            });
        }

        // ── Logging format ───
        let valid_formats = ["pretty", "json", "compact"];
        if !valid_formats.contains(&self.logging.format.as_str()) {
            warnings.push(ConfigWarning {
                field: "logging.format".into(),
                message: format!("unknown log format '{}'", self.logging.format),
                severity: WarningSeverity::Warning,
                hint: Some(format!("Valid values: {}", valid_formats.join(", "))),
            });
        }

        // ── Logging level ───
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            warnings.push(ConfigWarning {
                field: "logging.level".into(),
                message: format!("unknown log level '{}'", self.logging.level),
                severity: WarningSeverity::Warning,
                hint: Some(format!("Valid values: {}", valid_levels.join(", "))),
            });
        }

        // Check for hard errors
        let errors: Vec<String> = warnings
            .iter()
            .filter(|w| w.severity == WarningSeverity::Error)
            .map(|w| format!("{}: {}", w.field, w.message))
            .collect();

        if !errors.is_empty() {
            return Err(format!("Configuration errors:\n  • {}", errors.join("\n  • ")));
        }

        Ok(warnings)
    }
}
