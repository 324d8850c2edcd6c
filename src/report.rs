use std::path::Path;

use crate::config::ERROR_LOG_FILE;
use crate::prompt::{DialogText, Prompter};

pub const ERROR_TITLE: &str = "Error while setting up python extension!";

/// Overwrite `error.txt` in `work_dir` with the full error chain.
pub fn write_error_log(work_dir: &Path, err: &anyhow::Error) -> std::io::Result<()> {
    std::fs::write(work_dir.join(ERROR_LOG_FILE), format!("{err:?}\n"))
}

pub fn error_dialog(extension_name: &str, err: &anyhow::Error) -> DialogText {
    DialogText::new(
        ERROR_TITLE,
        format!("Error in setup of {extension_name}"),
        err.to_string(),
    )
}

/// Record a fatal setup error and block until the user dismisses the alert.
/// Failures while reporting are logged; there is nobody left to tell.
pub fn report_fatal(work_dir: &Path, extension_name: &str, prompter: &dyn Prompter, err: &anyhow::Error) {
    tracing::error!("{err:#}");
    if let Err(e) = write_error_log(work_dir, err) {
        tracing::warn!("could not write {ERROR_LOG_FILE}: {e}");
    }
    if let Err(e) = prompter.alert(&error_dialog(extension_name, err)) {
        tracing::warn!("could not show error dialog: {e}");
    }
}
