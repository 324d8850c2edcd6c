use thiserror::Error;

pub const EXTENSION_FLAG: &[&str] = &["--extension", "-e"];
pub const MIN_VERSION_FLAG: &[&str] = &["--min-version", "-v"];
pub const PORT_FLAG: &[&str] = &["--port", "-p"];
pub const COOKIE_FLAG: &[&str] = &["--auth-token", "-c"];
pub const FILE_FLAG: &[&str] = &["--filename", "-f"];

/// Arguments the plugin host passed to the launcher. Built once, never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub script_path: String,
    pub min_version: String,
    pub port: String,
    pub auth_token: Option<String>,
    pub data_file: Option<String>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ArgsError {
    #[error("{0}")]
    Missing(&'static str),
}

/// Value following the first occurrence of any alias, matched case-insensitively.
/// A flag in the last position has no value and is ignored.
pub fn flag_value<'a>(argv: &'a [String], aliases: &[&str]) -> Option<&'a str> {
    argv.windows(2)
        .find(|pair| aliases.iter().any(|a| pair[0].eq_ignore_ascii_case(a)))
        .map(|pair| pair[1].as_str())
}

pub fn parse_invocation(argv: &[String]) -> Result<Invocation, ArgsError> {
    let script_path = flag_value(argv, EXTENSION_FLAG).ok_or(ArgsError::Missing(
        "Python extension file must be defined in the run args (-e script.py)",
    ))?;
    let min_version = flag_value(argv, MIN_VERSION_FLAG).ok_or(ArgsError::Missing(
        "Minimum python version has to be defined in the run args (-v 3.2.0)",
    ))?;
    let port = flag_value(argv, PORT_FLAG).ok_or(ArgsError::Missing(
        "G-Earth extension port must be defined in run args (-p 9092)",
    ))?;

    Ok(Invocation {
        script_path: script_path.to_string(),
        min_version: min_version.to_string(),
        port: port.to_string(),
        auth_token: flag_value(argv, COOKIE_FLAG).map(str::to_string),
        data_file: flag_value(argv, FILE_FLAG).map(str::to_string),
    })
}
