use std::path::{Path, PathBuf};
use thiserror::Error;

pub const CACHE_DIR_NAME: &str = "setupCache";
pub const REQUIREMENTS_FILE: &str = "requirements.txt";
pub const ERROR_LOG_FILE: &str = "error.txt";
pub const PYTHON_FTP_URL: &str = "https://www.python.org/ftp/python";

#[derive(Debug, Clone)]
pub struct LauncherConfig {
    pub work_dir: PathBuf,       // process cwd: requirements.txt, error.txt, setupCache/
    pub launcher_dir: PathBuf,   // directory of the running executable; cwd of every child
    pub extension_name: String,  // name of launcher_dir's parent, shown in dialog headers
    pub cache_dir: PathBuf,      // work_dir/setupCache
    pub interpreter: PathBuf,    // "python" on PATH
    pub package_manager: PathBuf, // "pip" on PATH
    pub installer_base_url: String, // python.org release tree
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not determine the launcher location")]
    SelfLocation(#[source] std::io::Error),
    #[error("could not determine the working directory")]
    WorkDir(#[source] std::io::Error),
}

pub fn launcher_config() -> Result<LauncherConfig, ConfigError> {
    let work_dir = std::env::current_dir().map_err(ConfigError::WorkDir)?;
    let exe = std::env::current_exe().map_err(ConfigError::SelfLocation)?;
    let launcher_dir = exe
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| work_dir.clone());
    Ok(LauncherConfig::new(work_dir, launcher_dir))
}

impl LauncherConfig {
    pub fn new(work_dir: PathBuf, launcher_dir: PathBuf) -> Self {
        let extension_name = extension_name(&launcher_dir);
        LauncherConfig {
            cache_dir: work_dir.join(CACHE_DIR_NAME),
            work_dir,
            launcher_dir,
            extension_name,
            interpreter: PathBuf::from("python"),
            package_manager: PathBuf::from("pip"),
            installer_base_url: PYTHON_FTP_URL.to_string(),
        }
    }
}

/// The extension lives one level above the launcher's own directory.
fn extension_name(launcher_dir: &Path) -> String {
    launcher_dir
        .parent()
        .and_then(Path::file_name)
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "extension".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_dir_under_work_dir() {
        let config = LauncherConfig::new("/tmp/work".into(), "/opt/ext/MyExt/bin".into());
        assert_eq!(config.cache_dir, PathBuf::from("/tmp/work/setupCache"));
    }

    #[test]
    fn extension_name_is_launcher_grandparent() {
        let config = LauncherConfig::new("/tmp/work".into(), "/opt/ext/MyExt/bin".into());
        assert_eq!(config.extension_name, "MyExt");
    }

    #[test]
    fn extension_name_falls_back_at_root() {
        let config = LauncherConfig::new("/tmp/work".into(), "/".into());
        assert_eq!(config.extension_name, "extension");
    }

    #[test]
    fn defaults_to_python_and_pip() {
        let config = LauncherConfig::new("/a".into(), "/b/c".into());
        assert_eq!(config.interpreter, PathBuf::from("python"));
        assert_eq!(config.package_manager, PathBuf::from("pip"));
        assert_eq!(config.installer_base_url, "https://www.python.org/ftp/python");
    }

    #[test]
    fn config_errors_name_what_failed() {
        let err = ConfigError::WorkDir(std::io::Error::other("gone"));
        assert_eq!(err.to_string(), "could not determine the working directory");
        let err = ConfigError::SelfLocation(std::io::Error::other("gone"));
        assert_eq!(err.to_string(), "could not determine the launcher location");
    }

    #[test]
    fn launcher_config_resolves_current_process() {
        let config = launcher_config().unwrap();
        let exe = std::env::current_exe().unwrap();
        assert_eq!(Some(config.launcher_dir.as_path()), exe.parent());
        assert_eq!(config.work_dir, std::env::current_dir().unwrap());
    }
}
