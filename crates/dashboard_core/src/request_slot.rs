use shared::domain::RequestId;
use tokio::task::AbortHandle;

/// Tracks the single in-flight request a controller allows.
///
/// Opening a request aborts the previous one; a completing task may only apply
/// its outcome if [`RequestSlot::finish`] still recognises its id.
#[derive(Debug, Default)]
pub(crate) struct RequestSlot {
    last_id: u64,
    current: Option<InFlight>,
}

#[derive(Debug)]
struct InFlight {
    id: RequestId,
    abort: Option<AbortHandle>,
}

impl RequestSlot {
    /// Returns the new request id and the id it superseded, if any.
    pub(crate) fn begin(&mut self) -> (RequestId, Option<RequestId>) {
        let superseded = self.cancel();
        self.last_id += 1;
        let id = RequestId(self.last_id);
        self.current = Some(InFlight { id, abort: None });
        (id, superseded)
    }

    pub(crate) fn attach(&mut self, id: RequestId, abort: AbortHandle) {
        match self.current.as_mut() {
            Some(in_flight) if in_flight.id == id => in_flight.abort = Some(abort),
            _ => abort.abort(),
        }
    }

    /// Clears the slot if `id` is the current request.
    pub(crate) fn finish(&mut self, id: RequestId) -> bool {
        match &self.current {
            Some(in_flight) if in_flight.id == id => {
                self.current = None;
                true
            }
            _ => false,
        }
    }

    pub(crate) fn cancel(&mut self) -> Option<RequestId> {
        let in_flight = self.current.take()?;
        if let Some(abort) = in_flight.abort {
            abort.abort();
        }
        Some(in_flight.id)
    }

    pub(crate) fn in_flight(&self) -> Option<RequestId> {
        self.current.as_ref().map(|in_flight| in_flight.id)
    }
}
