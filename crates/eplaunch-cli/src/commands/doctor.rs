use std::path::{Path, PathBuf};

use eplaunch_config::{LaunchConfig, WarningSeverity, list_tasks};
use eplaunch_core::Result;

/// Audit the setup without writing anything. Exit code 1 if a check failed.
pub(super) fn cmd_doctor(config: &LaunchConfig, config_path: &Path) -> Result<i32> {
    println!("🩺 eplaunch doctor");
    println!("   config: {}", config_path.display());
    println!();

    let mut failed = 0;
    let mut warned = 0;

    // Loading already rejected hard errors; show the rest.
    for w in config.validate().unwrap_or_default() {
        println!("  {w}");
        if w.severity == WarningSeverity::Warning {
            warned += 1;
        }
    }

    let catalog_path = config.catalog.resolved_path();
    match list_tasks(&catalog_path) {
        Ok(catalog) if catalog.is_empty() && config.catalog.select_task => {
            println!("  ❌ catalog: {} has no tasks to select", catalog_path.display());
            failed += 1;
        }
        Ok(catalog) => println!("  ✅ catalog: {} tasks in {}", catalog.len(), catalog_path.display()),
        Err(e) => {
            println!("  ❌ catalog: {e}");
            failed += 1;
        }
    }

    let save_folder = config.recording.save_folder_path();
    if save_folder.is_dir() {
        println!("  ✅ save folder: {}", save_folder.display());
    } else if save_folder.exists() {
        println!("  ❌ save folder: {} is not a directory", save_folder.display());
        failed += 1;
    } else {
        println!("  💡 save folder: {} will be created on first launch", save_folder.display());
    }

    let program = &config.recording.program;
    match find_program(program, std::env::var_os("PATH").as_deref()) {
        Some(path) => println!("  ✅ recorder: {}", path.display()),
        None => {
            println!("  ❌ recorder: '{program}' not found on PATH");
            failed += 1;
        }
    }

    println!();
    println!("  {failed} failed, {warned} warnings");
    Ok(if failed == 0 { 0 } else { 1 })
}

/// Locate `program` the way a shell would: as a path if it has a separator,
/// otherwise by searching `path_var`.
fn find_program(program: &str, path_var: Option<&std::ffi::OsStr>) -> Option<PathBuf> {
    if program.contains(std::path::MAIN_SEPARATOR) {
        let p = PathBuf::from(program);
        return p.is_file().then_some(p);
    }
    std::env::split_paths(path_var?)
        .map(|dir| dir.join(program))
        .find(|candidate| candidate.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_program_on_path() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("recorder"), "").unwrap();
        let path_var = std::env::join_paths([dir.path()]).unwrap();

        assert_eq!(
            find_program("recorder", Some(path_var.as_os_str())),
            Some(dir.path().join("recorder"))
        );
        assert_eq!(find_program("missing", Some(path_var.as_os_str())), None);
        assert_eq!(find_program("recorder", None), None);
    }

    #[test]
    fn test_find_program_by_path() {
        let dir = tempfile::tempdir().unwrap();
        let exe = dir.path().join("rec.sh");
        std::fs::write(&exe, "").unwrap();
        let as_str = exe.to_string_lossy().into_owned();
        assert_eq!(find_program(&as_str, None), Some(exe));
    }
}
