use std::path::{Path, PathBuf};

use eplaunch_config::ConfigLoader;

const STARTER_CONFIG: &str = r#"# Episode launcher configuration

[catalog]
path = "configs/scene_tasks.yaml"   # YAML mapping; top-level keys are task names
select_task = false
# placeholder_task = ""             # task_name recorded when select_task = false

[operators]
names = ["Deyu", "Shine", "Kris"]

[batch]
source = "fixed"                    # "fixed" or "next"
id = "1"

[recording]
save_folder = "~/tmp_data"
# per_operator_folder = false
program = "python"
args = ["record_episode.py"]
# working_dir = "/path/to/recorder"

[logging]
level = "warn"
# format = "pretty"                 # pretty, compact, json
"#;

/// Initialize a new eplaunch configuration with sensible defaults.
pub(super) fn cmd_init(local: bool) -> eplaunch_core::Result<()> {
    let dir = if local {
        std::env::current_dir()?
    } else {
        ConfigLoader::default_dir()
    };
    let config_path = write_starter(&dir)?;
    match config_path {
        Some(path) => {
            println!("✅ Created {}", path.display());
            println!("   Edit the operator list and recorder, then run: eplaunch");
        }
        None => {
            println!("⚠️  {} already exists", dir.join("eplaunch.toml").display());
        }
    }
    Ok(())
}

/// Write the starter config into `dir`. Returns None if one is already there.
fn write_starter(dir: &Path) -> eplaunch_core::Result<Option<PathBuf>> {
    std::fs::create_dir_all(dir)?;
    let config_path = dir.join("eplaunch.toml");
    if config_path.exists() {
        return Ok(None);
    }
    std::fs::write(&config_path, STARTER_CONFIG)?;
    Ok(Some(config_path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starter_config_parses() {
        let config = ConfigLoader::parse(STARTER_CONFIG, Path::new("eplaunch.toml")).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.operators.names, ["Deyu", "Shine", "Kris"]);
    }

    #[test]
    fn test_write_starter_never_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let first = write_starter(dir.path()).unwrap();
        assert_eq!(first, Some(dir.path().join("eplaunch.toml")));

        std::fs::write(dir.path().join("eplaunch.toml"), "# mine").unwrap();
        assert_eq!(write_starter(dir.path()).unwrap(), None);
        assert_eq!(
            std::fs::read_to_string(dir.path().join("eplaunch.toml")).unwrap(),
            "# mine"
        );
    }
}
