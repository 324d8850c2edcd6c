// Shared test doubles.
use std::cell::RefCell;

use crate::prompt::{DialogText, PromptError, Prompter};
use crate::ui::UiError;

/// Answers every consent request the same way and records what was shown.
/// `failing()` behaves like a UI that cannot display anything.
pub struct ScriptedPrompter {
    answer: Option<bool>,
    seen: RefCell<Vec<DialogText>>,
    alerts: RefCell<Vec<DialogText>>,
}

impl ScriptedPrompter {
    pub fn answering(answer: bool) -> Self {
        ScriptedPrompter {
            answer: Some(answer),
            seen: RefCell::new(Vec::new()),
            alerts: RefCell::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        ScriptedPrompter {
            answer: None,
            seen: RefCell::new(Vec::new()),
            alerts: RefCell::new(Vec::new()),
        }
    }

    pub fn seen(&self) -> Vec<DialogText> {
        self.seen.borrow().clone()
    }

    pub fn alerts(&self) -> Vec<DialogText> {
        self.alerts.borrow().clone()
    }
}

impl Prompter for ScriptedPrompter {
    fn confirm(&self, dialog: &DialogText) -> Result<bool, PromptError> {
        self.seen.borrow_mut().push(dialog.clone());
        self.answer.ok_or(PromptError::Ui(UiError::Closed))
    }

    fn alert(&self, dialog: &DialogText) -> Result<(), PromptError> {
        self.alerts.borrow_mut().push(dialog.clone());
        match self.answer {
            Some(_) => Ok(()),
            None => Err(PromptError::Ui(UiError::Closed)),
        }
    }
}

/// Write an executable `/bin/sh` script named `name` into `dir`.
#[cfg(unix)]
pub fn write_script(dir: &std::path::Path, name: &str, body: &str) -> std::path::PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}

/// Answer a single HTTP request on a loopback port with `status` and `body`.
/// Returns the base URL and a handle yielding the request line that was served.
pub fn serve_once(status: &str, body: &[u8]) -> (String, std::thread::JoinHandle<String>) {
    use std::io::{BufRead, BufReader, Write};

    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}", listener.local_addr().unwrap());
    let mut response = format!(
        "HTTP/1.1 {status}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        body.len()
    )
    .into_bytes();
    response.extend_from_slice(body);

    let server = std::thread::spawn(move || {
        let (stream, _) = listener.accept().unwrap();
        let mut reader = BufReader::new(stream);
        let mut request_line = String::new();
        reader.read_line(&mut request_line).unwrap();
        // drain headers up to the blank line
        loop {
            let mut line = String::new();
            if reader.read_line(&mut line).unwrap() <= 2 {
                break;
            }
        }
        reader.get_mut().write_all(&response).unwrap();
        request_line.trim_end().to_string()
    });
    (url, server)
}
