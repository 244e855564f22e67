//! UI layer: app shell and the benchmark chart painter.

pub mod app;
pub mod chart;

pub use app::DashboardApp;
