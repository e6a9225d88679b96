use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread;
use std::time::Duration;

/// A one-shot background timer with a single owning handle.
///
/// The callback runs after `delay` unless the handle is dropped (or
/// [`cancel`](Self::cancel)led) first. Dropping the handle does not block on
/// the timer thread; a cancelled timer simply never fires.
#[derive(Debug)]
pub struct ScheduledTask {
    cancel: Sender<()>,
}

impl ScheduledTask {
    /// Arm a timer that runs `f` after `delay`.
    pub fn spawn<F>(delay: Duration, f: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        let (cancel, armed) = mpsc::channel::<()>();
        thread::spawn(move || {
            // Timeout means nobody cancelled within the delay; any message
            // or a dropped handle cancels the shot.
            if let Err(RecvTimeoutError::Timeout) = armed.recv_timeout(delay) {
                f();
            }
        });
        Self { cancel }
    }

    /// Cancel the timer; the callback will not run.
    pub fn cancel(self) {
        let _ = self.cancel.send(());
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/timer.rs"]
mod tests;
