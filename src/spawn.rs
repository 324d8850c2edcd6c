use std::process::{Child, Command};

use crate::args::Invocation;
use crate::config::LauncherConfig;

/// Arguments handed to the interpreter: the script, then the forwarded flags.
pub fn extension_args(invocation: &Invocation) -> Vec<String> {
    let mut args = vec![
        invocation.script_path.clone(),
        "-p".to_string(),
        invocation.port.clone(),
    ];
    if let Some(file) = &invocation.data_file {
        args.extend(["-f".to_string(), file.clone()]);
    }
    if let Some(cookie) = &invocation.auth_token {
        args.extend(["-c".to_string(), cookie.clone()]);
    }
    args
}

/// Start the extension and return without waiting on it.
///
/// The child inherits stdio and outlives the launcher.
pub fn spawn_extension(config: &LauncherConfig, invocation: &Invocation) -> std::io::Result<Child> {
    let child = Command::new(&config.interpreter)
        .args(extension_args(invocation))
        .current_dir(&config.launcher_dir)
        .spawn()?;
    tracing::info!(pid = child.id(), script = %invocation.script_path, "extension ran");
    Ok(child)
}
