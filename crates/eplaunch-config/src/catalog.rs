//! Task catalog loading.
//!
//! The catalog is an external YAML mapping of scene name to task definition.
//! Only the top-level keys are read; the definitions belong to the recorder.

use serde_yaml::Value;
use std::path::Path;
use tracing::{debug, info};

use eplaunch_core::{LaunchError, Result, TaskCatalog};

/// Read `path` and return its top-level keys in file order.
pub fn list_tasks(path: &Path) -> Result<TaskCatalog> {
    let raw = std::fs::read_to_string(path).map_err(|e| catalog_error(path, e.to_string()))?;
    let catalog = parse_tasks(&raw).map_err(|reason| catalog_error(path, reason))?;
    info!(path = %path.display(), tasks = catalog.len(), "task catalog loaded");
    Ok(catalog)
}

/// Parse catalog text. An empty document is an empty catalog.
pub fn parse_tasks(raw: &str) -> std::result::Result<TaskCatalog, String> {
    let doc: Value = serde_yaml::from_str(raw).map_err(|e| e.to_string())?;
    let mapping = match doc {
        Value::Mapping(m) => m,
        Value::Null => return Ok(TaskCatalog::default()),
        other => {
            return Err(format!(
                "expected a mapping of task names, found {}",
                kind_of(&other)
            ));
        }
    };

    let mut tasks = Vec::with_capacity(mapping.len());
    for key in mapping.keys() {
        let name = match key {
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            other => return Err(format!("unsupported task key of type {}", kind_of(other))),
        };
        debug!(task = %name, "catalog entry");
        tasks.push(name);
    }
    Ok(TaskCatalog::new(tasks))
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}

fn catalog_error(path: &Path, reason: String) -> LaunchError {
    LaunchError::Catalog {
        path: path.display().to_string(),
        reason,
    }
}
