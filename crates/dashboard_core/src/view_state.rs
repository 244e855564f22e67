//! The reactive store every front end renders from.
//!
//! Each field has one writer: the view owns the raw input, the process
//! controller owns the loading flag and result, the benchmark controller owns
//! the series. Writers are capabilities only this crate can mint.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use shared::protocol::{BenchmarkRecord, ProcessOutput};

use crate::input::parse_digits;

pub const SUBMIT_LABEL: &str = "Run Preprocessor";
pub const SUBMIT_BUSY_LABEL: &str = "Processing...";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewSnapshot {
    pub raw_input: String,
    pub loading: bool,
    pub result: Option<ProcessOutput>,
    pub benchmark: Vec<BenchmarkRecord>,
    pub benchmark_refreshed_at: Option<DateTime<Utc>>,
}

impl ViewSnapshot {
    pub fn digits(&self) -> Vec<i64> {
        parse_digits(&self.raw_input)
    }

    pub fn can_submit(&self) -> bool {
        !self.loading
    }

    pub fn submit_label(&self) -> &'static str {
        if self.loading {
            SUBMIT_BUSY_LABEL
        } else {
            SUBMIT_LABEL
        }
    }

    /// Serialized result for the output panel; `None` hides the panel.
    pub fn result_text(&self) -> Option<String> {
        self.result.as_ref().map(ProcessOutput::to_json_string)
    }
}

#[derive(Debug, Default)]
struct ViewInner {
    fields: RwLock<ViewSnapshot>,
    closed: AtomicBool,
}

#[derive(Debug, Clone, Default)]
pub struct ViewState {
    inner: Arc<ViewInner>,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> ViewSnapshot {
        self.inner.fields.read().clone()
    }

    pub fn raw_input(&self) -> String {
        self.inner.fields.read().raw_input.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.inner.fields.read().loading
    }

    /// Input binding; called by the view on every edit.
    pub fn set_raw_input(&self, text: impl Into<String>) {
        self.inner.fields.write().raw_input = text.into();
    }

    /// Marks the view as torn down. Late responses are discarded from here on.
    pub fn close(&self) {
        self.inner.closed.store(true, Ordering::SeqCst);
    }

    pub fn is_closed(&self) -> bool {
        self.inner.closed.load(Ordering::SeqCst)
    }

    pub(crate) fn process_writer(&self) -> ProcessWriter {
        ProcessWriter { view: self.clone() }
    }

    pub(crate) fn benchmark_writer(&self) -> BenchmarkWriter {
        BenchmarkWriter { view: self.clone() }
    }
}

/// Write access to the loading flag and the last process result.
#[derive(Debug)]
pub(crate) struct ProcessWriter {
    view: ViewState,
}

impl ProcessWriter {
    pub(crate) fn set_loading(&self, loading: bool) {
        self.view.inner.fields.write().loading = loading;
    }

    pub(crate) fn complete(&self, result: ProcessOutput) {
        let mut fields = self.view.inner.fields.write();
        fields.result = Some(result);
        fields.loading = false;
    }

    pub(crate) fn is_closed(&self) -> bool {
        self.view.is_closed()
    }
}

/// Write access to the benchmark series.
#[derive(Debug)]
pub(crate) struct BenchmarkWriter {
    view: ViewState,
}

impl BenchmarkWriter {
    pub(crate) fn replace_series(&self, records: Vec<BenchmarkRecord>) {
        let mut fields = self.view.inner.fields.write();
        fields.benchmark = records;
        fields.benchmark_refreshed_at = Some(Utc::now());
    }

    pub(crate) fn is_closed(&self) -> bool {
        self.view.is_closed()
    }
}
