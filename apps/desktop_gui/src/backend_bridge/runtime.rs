//! Runtime bridge between UI command queue and backend event intake.

use std::thread;

use crossbeam_channel::{Receiver, Sender};
use dashboard_core::{Dashboard, Settings, ViewState};
use tokio::sync::broadcast::error::RecvError;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::controller::orchestration::forward_ui_event;

/// Starts the backend worker thread. It owns the Tokio runtime and the
/// [`Dashboard`]; the UI thread only reads `view` and sends commands.
pub fn launch(
    settings: Settings,
    view: ViewState,
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                tracing::error!("failed to build backend runtime: {err}");
                let _ = ui_tx.try_send(UiEvent::BackendUnavailable(format!(
                    "backend worker startup failure: {err}"
                )));
                return;
            }
        };

        runtime.block_on(async move {
            let dashboard = match Dashboard::from_settings(&settings, view) {
                Ok(dashboard) => dashboard,
                Err(err) => {
                    tracing::error!("failed to configure engine backend: {err}");
                    let _ = ui_tx.try_send(UiEvent::BackendUnavailable(err.to_string()));
                    return;
                }
            };

            let mut events = dashboard.subscribe_events();
            let forward_tx = ui_tx.clone();
            let forwarder = tokio::spawn(async move {
                loop {
                    match events.recv().await {
                        Ok(event) => {
                            let event = UiEvent::from_dashboard(event);
                            let delivered = if event.is_blocking() {
                                tokio::task::block_in_place(|| {
                                    forward_ui_event(&forward_tx, event)
                                })
                            } else {
                                forward_ui_event(&forward_tx, event)
                            };
                            if !delivered {
                                break;
                            }
                        }
                        Err(RecvError::Lagged(skipped)) => {
                            tracing::warn!(skipped, "ui event forwarder lagged");
                        }
                        Err(RecvError::Closed) => break,
                    }
                }
            });

            let _ = ui_tx.try_send(UiEvent::Info(format!(
                "Engine backend: {}",
                settings.backend_url
            )));
            let _ = dashboard.mount();

            while let Ok(cmd) = cmd_rx.recv() {
                tracing::debug!(command = cmd.name(), "backend command received");
                match cmd {
                    BackendCommand::SubmitProcess => {
                        let _ = dashboard.submit_input();
                    }
                    BackendCommand::RefreshBenchmark => {
                        let _ = dashboard.fetch_benchmark();
                    }
                    BackendCommand::Shutdown => break,
                }
            }

            dashboard.shutdown();
            forwarder.abort();
        });
    })
}
