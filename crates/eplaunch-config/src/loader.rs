use std::path::{Path, PathBuf};
use tracing::{info, warn};

use eplaunch_core::{LaunchError, Result};

use crate::schema::{LaunchConfig, WarningSeverity};

/// Loads the launcher configuration.
pub struct ConfigLoader {
    config: LaunchConfig,
    config_path: PathBuf,
}

impl ConfigLoader {
    /// Resolve the config path: explicit path > EPLAUNCH_CONFIG env > ~/.eplaunch/eplaunch.toml
    ///
    /// The flag is true when the path was supplied by the user (flag or env)
    /// rather than being the default location.
    pub fn resolve_path<F>(explicit: Option<&Path>, env: F) -> (PathBuf, bool)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(p) = explicit {
            return (p.to_path_buf(), true);
        }
        if let Some(p) = env("EPLAUNCH_CONFIG").filter(|p| !p.is_empty()) {
            return (PathBuf::from(p), true);
        }
        (Self::default_dir().join("eplaunch.toml"), false)
    }

    /// `~/.eplaunch`, where `init` writes the starter config.
    pub fn default_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".eplaunch")
    }

    /// Load the config from disk, falling back to defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_env(path, |key| std::env::var(key).ok())
    }

    /// Like [`ConfigLoader::load`], reading overrides through `env`.
    pub fn load_with_env<F>(path: Option<&Path>, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let (config_path, user_supplied) = Self::resolve_path(path, &env);
        let config = if config_path.exists() {
            info!(?config_path, "loading configuration");
            let raw = std::fs::read_to_string(&config_path)?;
            Self::parse(&raw, &config_path)?
        } else if user_supplied {
            return Err(LaunchError::Config(format!(
                "config file not found: {}",
                config_path.display()
            )));
        } else {
            info!(?config_path, "config file not found, using defaults");
            LaunchConfig::default()
        };

        let config = Self::apply_env_overrides(config, env);

        // Validate config — log warnings, fail on errors
        match config.validate() {
            Ok(warnings) => {
                for w in &warnings {
                    if w.severity == WarningSeverity::Info {
                        info!("{}", w);
                    } else {
                        warn!("{}", w);
                    }
                }
            }
            Err(e) => {
                return Err(LaunchError::Config(e));
            }
        }

        Ok(Self {
            config,
            config_path,
        })
    }

    /// Parse TOML text; `origin` only labels the error message.
    pub fn parse(raw: &str, origin: &Path) -> Result<LaunchConfig> {
        toml::from_str::<LaunchConfig>(raw).map_err(|e| {
            LaunchError::Config(format!("failed to parse {}: {}", origin.display(), e))
        })
    }

    /// Get a snapshot of the loaded config.
    pub fn get(&self) -> LaunchConfig {
        self.config.clone()
    }

    /// Path the config was (or would have been) read from.
    pub fn path(&self) -> &Path {
        &self.config_path
    }

    /// Apply env var overrides (EPLAUNCH_CATALOG, EPLAUNCH_SAVE_FOLDER, etc.)
    fn apply_env_overrides<F>(mut config: LaunchConfig, env: F) -> LaunchConfig
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = env("EPLAUNCH_CATALOG") {
            config.catalog.path = PathBuf::from(v);
        }
        if let Some(v) = env("EPLAUNCH_SAVE_FOLDER") {
            config.recording.save_folder = v;
        }
        if let Some(v) = env("EPLAUNCH_RECORDER") {
            config.recording.program = v;
        }
        if let Some(v) = env("EPLAUNCH_LOG_LEVEL") {
            config.logging.level = v;
        }
        config
    }
}
