use std::sync::Arc;

use parking_lot::Mutex;
use shared::{domain::RequestId, protocol::BenchmarkRecord};
use tokio::{sync::broadcast, task::JoinHandle};
use tracing::{debug, info, warn};

use crate::{
    error::DashboardError, request_slot::RequestSlot, transport::DashboardBackend,
    view_state::BenchmarkWriter, DashboardEvent,
};

/// Owns the benchmark series lifecycle. Failures only reach the log.
pub struct BenchmarkController {
    backend: Arc<dyn DashboardBackend>,
    writer: Arc<BenchmarkWriter>,
    events: broadcast::Sender<DashboardEvent>,
    slot: Arc<Mutex<RequestSlot>>,
}

impl BenchmarkController {
    pub(crate) fn new(
        backend: Arc<dyn DashboardBackend>,
        writer: BenchmarkWriter,
        events: broadcast::Sender<DashboardEvent>,
    ) -> Self {
        Self {
            backend,
            writer: Arc::new(writer),
            events,
            slot: Arc::new(Mutex::new(RequestSlot::default())),
        }
    }

    pub fn fetch(&self) -> JoinHandle<()> {
        let mut slot = self.slot.lock();
        let (request_id, superseded) = slot.begin();
        if let Some(previous) = superseded {
            debug!(request_id = %previous, superseded_by = %request_id, "benchmark fetch superseded");
        }
        debug!(%request_id, "fetching benchmark series");

        let backend = Arc::clone(&self.backend);
        let writer = Arc::clone(&self.writer);
        let events = self.events.clone();
        let task_slot = Arc::clone(&self.slot);
        let task = tokio::spawn(async move {
            let outcome = backend.benchmark().await;
            apply_outcome(&task_slot, &writer, &events, request_id, outcome);
        });
        slot.attach(request_id, task.abort_handle());
        task
    }

    pub fn cancel(&self) -> Option<RequestId> {
        self.slot.lock().cancel()
    }

    pub fn in_flight(&self) -> Option<RequestId> {
        self.slot.lock().in_flight()
    }
}

fn apply_outcome(
    slot: &Mutex<RequestSlot>,
    writer: &BenchmarkWriter,
    events: &broadcast::Sender<DashboardEvent>,
    request_id: RequestId,
    outcome: Result<Vec<BenchmarkRecord>, DashboardError>,
) {
    let mut slot = slot.lock();
    if !slot.finish(request_id) {
        debug!(%request_id, "discarding stale benchmark response");
        return;
    }
    if writer.is_closed() {
        debug!(%request_id, "view closed; discarding benchmark response");
        return;
    }

    match outcome {
        Ok(records) => {
            let count = records.len();
            writer.replace_series(records);
            info!(%request_id, records = count, "benchmark series replaced");
            let _ = events.send(DashboardEvent::BenchmarkUpdated {
                request_id,
                records: count,
            });
        }
        Err(err) => warn!(%request_id, status = ?err.status(), "benchmark failed: {err}"),
    }
}
