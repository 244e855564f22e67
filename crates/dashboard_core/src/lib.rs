//! Client-side core of the Vedabyte engine dashboard.
//!
//! Front ends own a [`Dashboard`], bind their widgets to [`ViewState`]
//! snapshots and react to [`DashboardEvent`]s; everything that talks to the
//! engine service goes through a [`DashboardBackend`].

use std::sync::Arc;

use shared::domain::RequestId;
use tokio::{sync::broadcast, task::JoinHandle};
use tracing::info;

pub mod benchmark;
pub mod chart;
pub mod config;
pub mod error;
pub mod input;
pub mod process;
mod request_slot;
pub mod transport;
pub mod view_state;

pub use benchmark::BenchmarkController;
pub use chart::{to_chart_spec, ChartSpec};
pub use config::{load_settings, load_settings_from, Settings};
pub use error::DashboardError;
pub use input::parse_digits;
pub use process::{ProcessController, BACKEND_ERROR_ALERT};
pub use transport::{DashboardBackend, HttpBackend};
pub use view_state::{ViewSnapshot, ViewState};

const EVENT_CHANNEL_CAPACITY: usize = 256;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardEvent {
    ProcessStarted { request_id: RequestId, digits: usize },
    ProcessCompleted { request_id: RequestId },
    ProcessSuperseded { request_id: RequestId },
    /// A process request failed; front ends show `message` as a blocking alert.
    Alert { request_id: RequestId, message: String },
    BenchmarkUpdated { request_id: RequestId, records: usize },
}

pub struct Dashboard {
    view: ViewState,
    process: ProcessController,
    benchmark: BenchmarkController,
    events: broadcast::Sender<DashboardEvent>,
    fetch_benchmark_on_start: bool,
}

impl Dashboard {
    pub fn new(backend: Arc<dyn DashboardBackend>) -> Self {
        Self::with_view(backend, ViewState::new())
    }

    /// Binds the controllers to an existing view, e.g. one a UI thread
    /// already holds a handle to.
    pub fn with_view(backend: Arc<dyn DashboardBackend>, view: ViewState) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            process: ProcessController::new(
                Arc::clone(&backend),
                view.process_writer(),
                events.clone(),
            ),
            benchmark: BenchmarkController::new(backend, view.benchmark_writer(), events.clone()),
            view,
            events,
            fetch_benchmark_on_start: Settings::default().fetch_benchmark_on_start,
        }
    }

    pub fn from_settings(settings: &Settings, view: ViewState) -> Result<Self, DashboardError> {
        let backend = HttpBackend::from_settings(settings)?;
        info!(backend_url = %backend.base_url(), "dashboard backend configured");
        Ok(Self::with_view(Arc::new(backend), view)
            .fetch_benchmark_on_start(settings.fetch_benchmark_on_start))
    }

    pub fn fetch_benchmark_on_start(mut self, enabled: bool) -> Self {
        self.fetch_benchmark_on_start = enabled;
        self
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn snapshot(&self) -> ViewSnapshot {
        self.view.snapshot()
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<DashboardEvent> {
        self.events.subscribe()
    }

    pub fn process(&self) -> &ProcessController {
        &self.process
    }

    pub fn benchmark(&self) -> &BenchmarkController {
        &self.benchmark
    }

    pub fn set_input(&self, text: impl Into<String>) {
        self.view.set_raw_input(text);
    }

    /// Parses the current input field and submits it.
    pub fn submit_input(&self) -> JoinHandle<()> {
        self.submit_process(parse_digits(&self.view.raw_input()))
    }

    pub fn submit_process(&self, digits: Vec<i64>) -> JoinHandle<()> {
        self.process.submit(digits)
    }

    pub fn fetch_benchmark(&self) -> JoinHandle<()> {
        self.benchmark.fetch()
    }

    /// Startup hook: loads the benchmark series when configured to.
    pub fn mount(&self) -> Option<JoinHandle<()>> {
        self.fetch_benchmark_on_start
            .then(|| self.benchmark.fetch())
    }

    pub fn chart_spec(&self) -> ChartSpec {
        to_chart_spec(&self.view.snapshot().benchmark)
    }

    /// Tears the view down. In-flight requests are aborted and any response
    /// that still completes is discarded.
    pub fn shutdown(&self) {
        self.view.close();
        let process = self.process.cancel();
        let benchmark = self.benchmark.cancel();
        info!(
            aborted_process = ?process,
            aborted_benchmark = ?benchmark,
            "dashboard shut down"
        );
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
