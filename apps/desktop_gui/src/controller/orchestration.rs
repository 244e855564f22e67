//! Command orchestration helpers between the UI thread and the backend worker.

use std::time::Duration;

use crossbeam_channel::{SendTimeoutError, Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;

/// How long an alert may wait for room in a full UI queue.
pub const ALERT_SEND_TIMEOUT: Duration = Duration::from_secs(5);

pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
    status: &mut String,
) {
    match cmd_tx.try_send(cmd) {
        Ok(()) => tracing::debug!(command = cmd.name(), "queued ui->backend command"),
        Err(TrySendError::Full(_)) => {
            *status = "UI command queue is full; please retry".to_string();
        }
        Err(TrySendError::Disconnected(_)) => {
            *status = "Backend worker is not running; check the engine address and restart"
                .to_string();
        }
    }
}

/// Hands a backend event to the UI. Returns `false` once the UI is gone.
///
/// A full queue drops status lines but makes alerts wait up to
/// [`ALERT_SEND_TIMEOUT`]; the wait blocks the calling thread.
pub fn forward_ui_event(ui_tx: &Sender<UiEvent>, event: UiEvent) -> bool {
    match ui_tx.try_send(event) {
        Ok(()) => true,
        Err(TrySendError::Disconnected(_)) => false,
        Err(TrySendError::Full(event)) if event.is_blocking() => {
            match ui_tx.send_timeout(event, ALERT_SEND_TIMEOUT) {
                Ok(()) => true,
                Err(SendTimeoutError::Timeout(event)) => {
                    tracing::warn!(?event, "ui event queue stayed full; alert dropped");
                    true
                }
                Err(SendTimeoutError::Disconnected(_)) => false,
            }
        }
        Err(TrySendError::Full(event)) => {
            tracing::warn!(?event, "ui event queue full; status update dropped");
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::bounded;
    use std::thread;

    #[test]
    fn queues_command_without_touching_status() {
        let (tx, rx) = bounded(1);
        let mut status = "idle".to_string();
        dispatch_backend_command(&tx, BackendCommand::RefreshBenchmark, &mut status);
        assert_eq!(rx.try_recv(), Ok(BackendCommand::RefreshBenchmark));
        assert_eq!(status, "idle");
    }

    #[test]
    fn reports_full_queue() {
        let (tx, _rx) = bounded(1);
        let mut status = String::new();
        dispatch_backend_command(&tx, BackendCommand::SubmitProcess, &mut status);
        dispatch_backend_command(&tx, BackendCommand::SubmitProcess, &mut status);
        assert!(status.contains("full"), "{status}");
    }

    #[test]
    fn reports_disconnected_worker() {
        let (tx, rx) = bounded(1);
        drop(rx);
        let mut status = String::new();
        dispatch_backend_command(&tx, BackendCommand::SubmitProcess, &mut status);
        assert!(status.contains("not running"), "{status}");
    }

    #[test]
    fn full_queue_drops_status_lines() {
        let (tx, rx) = bounded(1);
        assert!(forward_ui_event(&tx, UiEvent::Info("first".to_string())));
        assert!(forward_ui_event(&tx, UiEvent::Info("second".to_string())));

        assert_eq!(rx.try_recv(), Ok(UiEvent::Info("first".to_string())));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn alerts_wait_for_room_in_a_full_queue() {
        let (tx, rx) = bounded(1);
        assert!(forward_ui_event(&tx, UiEvent::Info("busy".to_string())));

        let drain = thread::spawn(move || {
            thread::sleep(Duration::from_millis(50));
            let first = rx.recv().expect("status line");
            let second = rx.recv().expect("alert");
            (first, second)
        });
        assert!(forward_ui_event(&tx, UiEvent::Alert("Backend Error".to_string())));

        let (first, second) = drain.join().expect("drain thread");
        assert_eq!(first, UiEvent::Info("busy".to_string()));
        assert_eq!(second, UiEvent::Alert("Backend Error".to_string()));
    }

    #[test]
    fn reports_when_the_ui_is_gone() {
        let (tx, rx) = bounded(1);
        drop(rx);
        assert!(!forward_ui_event(&tx, UiEvent::Alert("Backend Error".to_string())));
        assert!(!forward_ui_event(&tx, UiEvent::Info("late".to_string())));
    }
}
