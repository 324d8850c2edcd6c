// main.rs — orchestration only.
// Each setup step lives in its own module; this file wires them in order and
// turns any failure into error.txt plus a modal alert.
mod args;
mod cache;
mod config;
mod install;
mod logging;
mod platform;
mod prompt;
mod report;
mod requirements;
mod spawn;
#[cfg_attr(target_os = "macos", allow(dead_code))]
mod ui;
mod version;

#[cfg(test)]
mod testutil;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;

use args::parse_invocation;
use cache::CacheDir;
use config::{launcher_config, LauncherConfig};
use install::ensure_interpreter;
use platform::Platform;
use prompt::{select_prompter, Prompter};
use report::report_fatal;
use requirements::fix_requirements;
use spawn::spawn_extension;
use version::{is_newer_or_equal, probe_interpreter, InterpreterStatus};

fn main() -> ExitCode {
    logging::init_tracing();
    logging::install_panic_hook();

    let argv: Vec<String> = std::env::args().skip(1).collect();
    let prompter = select_prompter();

    let config = match launcher_config() {
        Ok(config) => config,
        Err(e) => {
            let work_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
            report_fatal(&work_dir, "extension", prompter.as_ref(), &e.into());
            return ExitCode::FAILURE;
        }
    };

    match run_setup(&config, prompter.as_ref(), Platform::current(), &argv) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report_fatal(&config.work_dir, &config.extension_name, prompter.as_ref(), &e);
            ExitCode::FAILURE
        }
    }
}

/// Probe, install if needed, fix requirements, start the extension, clean up.
/// Any error stops the run before the extension is started.
fn run_setup(
    config: &LauncherConfig,
    prompter: &dyn Prompter,
    platform: Platform,
    argv: &[String],
) -> anyhow::Result<()> {
    let invocation = parse_invocation(argv)?;

    let up_to_date = match probe_interpreter(&config.interpreter) {
        InterpreterStatus::Present(version) => {
            tracing::info!(%version, required = %invocation.min_version, "found Python");
            is_newer_or_equal(&version, &invocation.min_version)?
        }
        InterpreterStatus::Absent => false,
    };
    if !up_to_date {
        ensure_interpreter(platform, config, prompter, &invocation.min_version)?;
    }

    fix_requirements(config)?;
    tracing::info!("Requirements fixed");

    spawn_extension(config, &invocation).context("Error while launching the extension")?;

    let cache = CacheDir::new(&config.cache_dir);
    match cache.clear() {
        Ok(()) => tracing::info!("cache cleared"),
        Err(e) => tracing::warn!("could not remove {}: {e}", cache.path().display()),
    }
    Ok(())
}
