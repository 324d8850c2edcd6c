use std::process::Command;

use thiserror::Error;

use crate::config::{LauncherConfig, REQUIREMENTS_FILE};

#[derive(Debug, Error)]
pub enum RequirementsError {
    #[error("Error while installing requirements, extension might not work!")]
    Spawn(#[source] std::io::Error),
}

/// `pip install -r requirements.txt` when the manifest exists, otherwise nothing.
///
/// pip's exit status is only logged: a partially satisfied manifest still
/// lets the extension start.
pub fn fix_requirements(config: &LauncherConfig) -> Result<(), RequirementsError> {
    if !config.work_dir.join(REQUIREMENTS_FILE).is_file() {
        tracing::debug!("no {REQUIREMENTS_FILE}, skipping dependency install");
        return Ok(());
    }

    tracing::info!("installing {REQUIREMENTS_FILE}");
    let status = Command::new(&config.package_manager)
        .args(["install", "-r", REQUIREMENTS_FILE])
        .current_dir(&config.launcher_dir)
        .status()
        .map_err(RequirementsError::Spawn)?;
    if !status.success() {
        tracing::warn!(code = ?status.code(), "pip exited unsuccessfully");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::{Path, PathBuf};
    use tempfile::tempdir;

    fn config(work: &Path, pip: PathBuf) -> LauncherConfig {
        let mut config = LauncherConfig::new(work.to_path_buf(), work.to_path_buf());
        config.package_manager = pip;
        config
    }

    #[test]
    fn absent_manifest_is_noop() {
        let dir = tempdir().unwrap();
        // pip would fail to spawn if it were called
        let config = config(dir.path(), "/nonexistent/pip".into());
        fix_requirements(&config).unwrap();
    }

    #[test]
    fn spawn_failure_is_fatal() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join(REQUIREMENTS_FILE), "requests\n").unwrap();
        let config = config(dir.path(), "/nonexistent/pip".into());
        let err = fix_requirements(&config).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Error while installing requirements, extension might not work!"
        );
    }

    #[cfg(unix)]
    #[test]
    fn runs_pip_in_launcher_dir_and_ignores_status() {
        use crate::testutil::write_script;

        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join(REQUIREMENTS_FILE), "requests\n").unwrap();
        let log = dir.path().join("pip.log");
        let pip = write_script(
            dir.path(),
            "pip",
            &format!("echo \"$(pwd) $*\" > '{}'\nexit 1", log.display()),
        );
        let config = config(dir.path(), pip);

        fix_requirements(&config).unwrap();

        let recorded = std::fs::read_to_string(&log).unwrap();
        assert!(recorded.trim_end().ends_with("install -r requirements.txt"), "{recorded}");
        let cwd = recorded.split(' ').next().unwrap();
        assert_eq!(
            std::fs::canonicalize(cwd).unwrap(),
            std::fs::canonicalize(dir.path()).unwrap()
        );
    }
}
