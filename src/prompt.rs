use std::io::{self, BufRead, Write};

use thiserror::Error;

use crate::ui::UiError;

/// Text of a modal dialog: window title, bold header line, body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogText {
    pub title: String,
    pub header: String,
    pub content: String,
}

impl DialogText {
    pub fn new(
        title: impl Into<String>,
        header: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        DialogText {
            title: title.into(),
            header: header.into(),
            content: content.into(),
        }
    }

    fn description(&self) -> String {
        format!("{}\n\n{}", self.header, self.content)
    }
}

#[derive(Debug, Error)]
pub enum PromptError {
    #[error(transparent)]
    Ui(#[from] UiError),
    #[error("terminal prompt failed: {0}")]
    Terminal(#[from] io::Error),
}

/// Blocking user interaction. Both calls return only once the user has
/// dismissed the dialog.
pub trait Prompter {
    /// `true` only when the user explicitly accepts.
    fn confirm(&self, dialog: &DialogText) -> Result<bool, PromptError>;
    fn alert(&self, dialog: &DialogText) -> Result<(), PromptError>;
}

/// Native message boxes via `rfd`.
pub struct NativePrompter;

impl NativePrompter {
    fn show(dialog: &DialogText, level: rfd::MessageLevel, buttons: rfd::MessageButtons) -> rfd::MessageDialogResult {
        rfd::MessageDialog::new()
            .set_level(level)
            .set_title(dialog.title.as_str())
            .set_description(dialog.description().as_str())
            .set_buttons(buttons)
            .show()
    }

    // AppKit only allows dialogs from the main thread.
    #[cfg(target_os = "macos")]
    fn run<T, F>(f: F) -> Result<T, PromptError>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        Ok(f())
    }

    #[cfg(not(target_os = "macos"))]
    fn run<T, F>(f: F) -> Result<T, PromptError>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        Ok(crate::ui::run_on_ui(f)?)
    }
}

impl Prompter for NativePrompter {
    fn confirm(&self, dialog: &DialogText) -> Result<bool, PromptError> {
        let dialog = dialog.clone();
        let result = Self::run(move || {
            Self::show(&dialog, rfd::MessageLevel::Warning, rfd::MessageButtons::OkCancel)
        })?;
        Ok(matches!(
            result,
            rfd::MessageDialogResult::Ok | rfd::MessageDialogResult::Yes
        ))
    }

    fn alert(&self, dialog: &DialogText) -> Result<(), PromptError> {
        let dialog = dialog.clone();
        Self::run(move || {
            Self::show(&dialog, rfd::MessageLevel::Error, rfd::MessageButtons::Ok);
        })
    }
}

/// Fallback for hosts without a display: stderr for output, stdin for answers.
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn confirm(&self, dialog: &DialogText) -> Result<bool, PromptError> {
        Ok(confirm_on(&mut io::stdin().lock(), &mut io::stderr(), dialog)?)
    }

    fn alert(&self, dialog: &DialogText) -> Result<(), PromptError> {
        Ok(alert_on(&mut io::stderr(), dialog)?)
    }
}

fn write_dialog(output: &mut impl Write, dialog: &DialogText) -> io::Result<()> {
    writeln!(output, "== {} ==", dialog.title)?;
    writeln!(output, "{}", dialog.header)?;
    writeln!(output, "{}", dialog.content)
}

fn confirm_on(input: &mut impl BufRead, output: &mut impl Write, dialog: &DialogText) -> io::Result<bool> {
    write_dialog(output, dialog)?;
    write!(output, "Continue? [ok/cancel] ")?;
    output.flush()?;

    let mut answer = String::new();
    if input.read_line(&mut answer)? == 0 {
        return Ok(false);
    }
    let answer = answer.trim().to_ascii_lowercase();
    Ok(matches!(answer.as_str(), "y" | "yes" | "ok"))
}

fn alert_on(output: &mut impl Write, dialog: &DialogText) -> io::Result<()> {
    write_dialog(output, dialog)?;
    output.flush()
}

/// Native dialogs where a desktop is guaranteed, otherwise only when a display
/// and the `zenity` message backend are both available.
pub fn select_prompter() -> Box<dyn Prompter> {
    if cfg!(any(windows, target_os = "macos")) || unix_desktop_available() {
        Box::new(NativePrompter)
    } else {
        tracing::debug!("no desktop session, prompting on the terminal");
        Box::new(TerminalPrompter)
    }
}

fn unix_desktop_available() -> bool {
    let has_display = ["DISPLAY", "WAYLAND_DISPLAY"]
        .iter()
        .any(|var| std::env::var_os(var).is_some_and(|v| !v.is_empty()));
    has_display && which::which("zenity").is_ok()
}
