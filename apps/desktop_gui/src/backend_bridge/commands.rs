//! Backend commands queued from UI to backend worker.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendCommand {
    /// Parse the current input field and send it to the engine.
    SubmitProcess,
    RefreshBenchmark,
    Shutdown,
}

impl BackendCommand {
    pub fn name(self) -> &'static str {
        match self {
            BackendCommand::SubmitProcess => "submit_process",
            BackendCommand::RefreshBenchmark => "refresh_benchmark",
            BackendCommand::Shutdown => "shutdown",
        }
    }
}
