use std::sync::{mpsc, Mutex};
use std::thread;

use thiserror::Error;

type Job = Box<dyn FnOnce() + Send>;

/// Job queue of the dialog thread, started on first use.
static UI_THREAD: Mutex<Option<mpsc::Sender<Job>>> = Mutex::new(None);

#[derive(Debug, Error)]
pub enum UiError {
    #[error("could not start the UI thread: {0}")]
    Spawn(#[source] std::io::Error),
    #[error("UI thread stopped before completing the request")]
    Closed,
}

fn ui_sender() -> Result<mpsc::Sender<Job>, UiError> {
    let mut slot = UI_THREAD.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    if let Some(tx) = slot.as_ref() {
        return Ok(tx.clone());
    }

    let (tx, rx) = mpsc::channel::<Job>();
    thread::Builder::new()
        .name("ui".to_string())
        .spawn(move || {
            for job in rx {
                job();
            }
        })
        .map_err(UiError::Spawn)?;
    tracing::debug!("UI thread started");

    *slot = Some(tx.clone());
    Ok(tx)
}

/// Run `f` on the UI thread and block until it returns.
///
/// Jobs run one at a time in submission order. A job that panics takes the
/// thread down; that request and every later one fail with `Closed`.
pub fn run_on_ui<T, F>(f: F) -> Result<T, UiError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    let (done_tx, done_rx) = mpsc::sync_channel(1);
    let job: Job = Box::new(move || {
        let _ = done_tx.send(f());
    });
    ui_sender()?.send(job).map_err(|_| UiError::Closed)?;
    done_rx.recv().map_err(|_| UiError::Closed)
}
