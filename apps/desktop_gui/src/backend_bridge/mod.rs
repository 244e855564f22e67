//! Backend bridge: command queue from the UI thread into the Tokio worker.

pub mod commands;
pub mod runtime;
