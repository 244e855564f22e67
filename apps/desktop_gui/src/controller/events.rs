//! Events flowing from the backend worker to the UI thread.

use dashboard_core::DashboardEvent;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    Info(String),
    /// Blocking notification; the UI stays disabled until it is dismissed.
    Alert(String),
    BackendUnavailable(String),
}

impl UiEvent {
    /// Events the user must see; never dropped just because the queue is busy.
    pub fn is_blocking(&self) -> bool {
        matches!(self, UiEvent::Alert(_))
    }

    pub fn from_dashboard(event: DashboardEvent) -> Self {
        match event {
            DashboardEvent::ProcessStarted { digits, .. } => {
                UiEvent::Info(format!("Processing {digits} digits..."))
            }
            DashboardEvent::ProcessCompleted { request_id } => {
                UiEvent::Info(format!("Request #{request_id} completed"))
            }
            DashboardEvent::ProcessSuperseded { request_id } => {
                UiEvent::Info(format!("Request #{request_id} superseded by a newer submit"))
            }
            DashboardEvent::Alert { message, .. } => UiEvent::Alert(message),
            DashboardEvent::BenchmarkUpdated { records, .. } => {
                UiEvent::Info(format!("Benchmark refreshed ({records} input sizes)"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::domain::RequestId;

    #[test]
    fn alerts_keep_their_message() {
        let event = UiEvent::from_dashboard(DashboardEvent::Alert {
            request_id: RequestId(3),
            message: "Backend Error".to_string(),
        });
        assert_eq!(event, UiEvent::Alert("Backend Error".to_string()));
        assert!(event.is_blocking());
        assert!(!UiEvent::Info("idle".to_string()).is_blocking());
    }

    #[test]
    fn progress_events_become_status_lines() {
        assert_eq!(
            UiEvent::from_dashboard(DashboardEvent::ProcessStarted {
                request_id: RequestId(1),
                digits: 3,
            }),
            UiEvent::Info("Processing 3 digits...".to_string())
        );
        assert_eq!(
            UiEvent::from_dashboard(DashboardEvent::BenchmarkUpdated {
                request_id: RequestId(2),
                records: 6,
            }),
            UiEvent::Info("Benchmark refreshed (6 input sizes)".to_string())
        );
    }
}
