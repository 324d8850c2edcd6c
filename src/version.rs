use std::cmp::Ordering;
use std::path::Path;
use std::process::Command;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InterpreterStatus {
    Absent,
    Present(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum VersionError {
    #[error("invalid version component {component:?} in {version:?}")]
    InvalidComponent { version: String, component: String },
}

/// Run `<interpreter> --version` and read back what it reports.
///
/// Anything on stderr counts as a broken install, even when stdout also
/// carries a version: old builds print the version to stderr and those are
/// reinstalled deliberately.
pub fn probe_interpreter(interpreter: &Path) -> InterpreterStatus {
    let output = match Command::new(interpreter).arg("--version").output() {
        Ok(output) => output,
        Err(e) => {
            tracing::debug!(interpreter = %interpreter.display(), "probe failed: {e}");
            return InterpreterStatus::Absent;
        }
    };

    let stderr = String::from_utf8_lossy(&output.stderr);
    if stderr.lines().any(|l| !l.is_empty()) {
        tracing::debug!("interpreter wrote to stderr: {}", stderr.trim());
        return InterpreterStatus::Absent;
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    match stdout.lines().next().map(parse_version_line) {
        Some(version) if !version.is_empty() => InterpreterStatus::Present(version),
        _ => InterpreterStatus::Absent,
    }
}

fn parse_version_line(line: &str) -> String {
    let line = line.trim();
    line.strip_prefix("Python ").unwrap_or(line).trim().to_string()
}

/// Componentwise numeric comparison of dotted versions.
///
/// The first differing component decides. When one side runs out of
/// components the shared prefix is considered sufficient, so `3.2` satisfies
/// `3.2.0` and `3.2.0` satisfies `3.2`. Trailing dots are ignored (`3.2.`
/// reads as `3.2`); empty components elsewhere are an error.
pub fn is_newer_or_equal(actual: &str, required: &str) -> Result<bool, VersionError> {
    let actual = components(actual)?;
    let required = components(required)?;

    for (a, r) in actual.iter().zip(required.iter()) {
        match a.cmp(r) {
            Ordering::Greater => return Ok(true),
            Ordering::Less => return Ok(false),
            Ordering::Equal => {}
        }
    }
    Ok(true)
}

fn components(version: &str) -> Result<Vec<u64>, VersionError> {
    let version = version.trim();
    version
        .trim_end_matches('.')
        .split('.')
        .map(|c| {
            c.parse::<u64>().map_err(|_| VersionError::InvalidComponent {
                version: version.to_string(),
                component: c.to_string(),
            })
        })
        .collect()
}
