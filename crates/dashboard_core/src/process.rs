use std::sync::Arc;

use parking_lot::Mutex;
use shared::{domain::RequestId, protocol::ProcessOutput};
use tokio::{sync::broadcast, task::JoinHandle};
use tracing::{debug, info, warn};

use crate::{
    error::DashboardError, request_slot::RequestSlot, transport::DashboardBackend,
    view_state::ProcessWriter, DashboardEvent,
};

/// Text of the blocking alert shown for any process failure.
pub const BACKEND_ERROR_ALERT: &str = "Backend Error";

/// Owns the "submit digits, get a result" lifecycle.
pub struct ProcessController {
    backend: Arc<dyn DashboardBackend>,
    writer: Arc<ProcessWriter>,
    events: broadcast::Sender<DashboardEvent>,
    slot: Arc<Mutex<RequestSlot>>,
}

impl ProcessController {
    pub(crate) fn new(
        backend: Arc<dyn DashboardBackend>,
        writer: ProcessWriter,
        events: broadcast::Sender<DashboardEvent>,
    ) -> Self {
        Self {
            backend,
            writer: Arc::new(writer),
            events,
            slot: Arc::new(Mutex::new(RequestSlot::default())),
        }
    }

    /// Sends `digits` to the engine on the current Tokio runtime.
    ///
    /// A request still in flight is aborted and never touches the view, so
    /// the final state always belongs to the last submission.
    pub fn submit(&self, digits: Vec<i64>) -> JoinHandle<()> {
        let mut slot = self.slot.lock();
        let (request_id, superseded) = slot.begin();
        if let Some(previous) = superseded {
            debug!(request_id = %previous, superseded_by = %request_id, "process request superseded");
            let _ = self
                .events
                .send(DashboardEvent::ProcessSuperseded { request_id: previous });
        }

        self.writer.set_loading(true);
        info!(%request_id, digits = digits.len(), "submitting process request");
        let _ = self.events.send(DashboardEvent::ProcessStarted {
            request_id,
            digits: digits.len(),
        });

        let backend = Arc::clone(&self.backend);
        let writer = Arc::clone(&self.writer);
        let events = self.events.clone();
        let task_slot = Arc::clone(&self.slot);
        let task = tokio::spawn(async move {
            let outcome = backend.process(&digits).await;
            apply_outcome(&task_slot, &writer, &events, request_id, outcome);
        });
        slot.attach(request_id, task.abort_handle());
        task
    }

    /// Aborts the in-flight request. The last result stays in place and the
    /// loading flag is cleared unless the view is already closed.
    pub fn cancel(&self) -> Option<RequestId> {
        let mut slot = self.slot.lock();
        let cancelled = slot.cancel()?;
        if !self.writer.is_closed() {
            self.writer.set_loading(false);
        }
        debug!(request_id = %cancelled, "process request cancelled");
        Some(cancelled)
    }

    pub fn in_flight(&self) -> Option<RequestId> {
        self.slot.lock().in_flight()
    }
}

fn apply_outcome(
    slot: &Mutex<RequestSlot>,
    writer: &ProcessWriter,
    events: &broadcast::Sender<DashboardEvent>,
    request_id: RequestId,
    outcome: Result<ProcessOutput, DashboardError>,
) {
    let mut slot = slot.lock();
    if !slot.finish(request_id) {
        debug!(%request_id, "discarding stale process response");
        return;
    }
    if writer.is_closed() {
        debug!(%request_id, "view closed; discarding process response");
        return;
    }

    match outcome {
        Ok(result) => {
            writer.complete(result);
            info!(%request_id, "process request completed");
            let _ = events.send(DashboardEvent::ProcessCompleted { request_id });
        }
        Err(err) => {
            warn!(%request_id, status = ?err.status(), "process request failed: {err}");
            writer.set_loading(false);
            let _ = events.send(DashboardEvent::Alert {
                request_id,
                message: BACKEND_ERROR_ALERT.to_string(),
            });
        }
    }
}
