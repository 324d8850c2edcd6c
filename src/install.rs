use std::fs::File;
use std::path::PathBuf;
use std::process::Command;
use std::time::Duration;

use thiserror::Error;

use crate::cache::CacheDir;
use crate::config::LauncherConfig;
use crate::platform::Platform;
use crate::prompt::{DialogText, PromptError, Prompter};

const REJECTED: &str = "Python installation rejected, extension wont be able to run!";
const CANCELLED: &str = "Setup cancelled, extension will most likely not launch!";

#[derive(Debug, Error)]
pub enum InstallError {
    #[error("Unsupported Operating System")]
    UnsupportedPlatform,
    #[error("{0}")]
    ConsentDenied(&'static str),
    #[error("Error while installing Python")]
    Download(#[source] reqwest::Error),
    #[error("Error while installing Python")]
    Io(#[source] std::io::Error),
    #[error("Error while requesting Python installation")]
    RequestFailure(#[source] PromptError),
}

/// Get Python `version` (or newer) onto the machine, asking the user first.
///
/// Windows and macOS download the official python.org installer into the
/// cache and run it to completion. Linux distributions differ too much to
/// automate, so the user is asked to do it by hand and their OK is trusted.
pub fn ensure_interpreter(
    platform: Platform,
    config: &LauncherConfig,
    prompter: &dyn Prompter,
    version: &str,
) -> Result<(), InstallError> {
    tracing::info!(%platform, version, "Python missing or outdated");
    match platform {
        Platform::Windows => install_on_windows(config, prompter, version),
        Platform::MacOS => install_on_mac(config, prompter, version),
        Platform::Linux => install_on_linux(config, prompter, version),
        Platform::Unsupported => Err(InstallError::UnsupportedPlatform),
    }
}

fn install_dialog(version: &str) -> DialogText {
    DialogText::new(
        format!("Install/Update Python {version}"),
        "Python not found or newer version required",
        "Do you want to install/update Python?\nExtension will be launched once installation is completed",
    )
}

fn ask(prompter: &dyn Prompter, dialog: &DialogText, denied: &'static str) -> Result<(), InstallError> {
    if prompter.confirm(dialog).map_err(InstallError::RequestFailure)? {
        Ok(())
    } else {
        Err(InstallError::ConsentDenied(denied))
    }
}

pub fn windows_installer_url(base: &str, version: &str) -> String {
    format!("{base}/{version}/python-{version}-amd64.exe")
}

pub fn mac_installer_url(base: &str, version: &str) -> String {
    format!("{base}/{version}/python-{version}-macosx10.6.pkg")
}

fn install_on_windows(
    config: &LauncherConfig,
    prompter: &dyn Prompter,
    version: &str,
) -> Result<(), InstallError> {
    ask(prompter, &install_dialog(version), REJECTED)?;

    let cache = CacheDir::new(&config.cache_dir);
    let installer = download_cache_file(
        &cache,
        &windows_installer_url(&config.installer_base_url, version),
        "pythonInstaller.exe",
    )?;
    let mut cmd = Command::new(&installer);
    cmd.args(["/quiet", "PrependPath=1"]).current_dir(&config.launcher_dir);
    run_installer(&mut cmd)
}

fn install_on_mac(
    config: &LauncherConfig,
    prompter: &dyn Prompter,
    version: &str,
) -> Result<(), InstallError> {
    ask(prompter, &install_dialog(version), REJECTED)?;

    let cache = CacheDir::new(&config.cache_dir);
    let package = download_cache_file(
        &cache,
        &mac_installer_url(&config.installer_base_url, version),
        "pythonInstaller.pkg",
    )?;
    let mut cmd = Command::new("installer");
    cmd.arg("-pkg")
        .arg(&package)
        .args(["-target", "CurrentUserHomeDirectory"])
        .current_dir(&config.launcher_dir);
    run_installer(&mut cmd)
}

fn install_on_linux(
    config: &LauncherConfig,
    prompter: &dyn Prompter,
    version: &str,
) -> Result<(), InstallError> {
    let dialog = DialogText::new(
        format!("Install/Update Python {version}"),
        format!("{} requires Python to be installed/updated!", config.extension_name),
        format!(
            "Use your local package manager to update python to a version of {version} or higher, afterwards click OK\n\
             (If you click OK before installing/updating, the extension will not run this time)"
        ),
    );
    ask(prompter, &dialog, CANCELLED)
}

/// Stream `url` into the cache as `file_name`. No timeout: a stalled
/// download blocks until the user gives up.
fn download_cache_file(cache: &CacheDir, url: &str, file_name: &str) -> Result<PathBuf, InstallError> {
    let dest = cache.file_path(file_name).map_err(InstallError::Io)?;
    tracing::info!(url, dest = %dest.display(), "downloading installer");

    let client = reqwest::blocking::Client::builder()
        .user_agent(format!("pyext-launcher/{}", env!("CARGO_PKG_VERSION")))
        .timeout(None::<Duration>)
        .build()
        .map_err(InstallError::Download)?;

    let mut response = client
        .get(url)
        .send()
        .and_then(|r| r.error_for_status())
        .map_err(InstallError::Download)?;

    let mut file = File::create(&dest).map_err(InstallError::Io)?;
    let bytes = response.copy_to(&mut file).map_err(InstallError::Download)?;
    tracing::debug!(bytes, "download complete");
    Ok(dest)
}

fn run_installer(cmd: &mut Command) -> Result<(), InstallError> {
    let status = cmd.status().map_err(InstallError::Io)?;
    if !status.success() {
        tracing::warn!(code = ?status.code(), "Python installer exited unsuccessfully");
    }
    Ok(())
}
