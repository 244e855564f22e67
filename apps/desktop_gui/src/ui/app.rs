use std::{collections::VecDeque, time::Duration};

use crossbeam_channel::{Receiver, Sender};
use dashboard_core::{to_chart_spec, ViewSnapshot, ViewState};
use eframe::egui;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::controller::orchestration::dispatch_backend_command;
use crate::ui::chart::benchmark_chart;

pub const APP_TITLE: &str = "Vedabyte Engine Dashboard";
const INPUT_HINT: &str = "Enter digits (e.g. 12, 45, 7)";
const CHART_HEIGHT: f32 = 300.0;
const ACCENT: egui::Color32 = egui::Color32::from_rgb(0xFF, 0xD7, 0x00);

pub struct DashboardApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    view: ViewState,
    backend_url: String,
    status: String,
    alerts: VecDeque<String>,
    backend_available: bool,
}

impl DashboardApp {
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        view: ViewState,
        backend_url: String,
    ) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            view,
            backend_url,
            status: "Starting backend worker...".to_string(),
            alerts: VecDeque::new(),
            backend_available: true,
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::Info(message) => self.status = message,
                UiEvent::Alert(message) => {
                    self.status = message.clone();
                    self.alerts.push_back(message);
                }
                UiEvent::BackendUnavailable(message) => {
                    self.backend_available = false;
                    self.status = message;
                }
            }
        }
    }

    fn queue(&mut self, cmd: BackendCommand) {
        dispatch_backend_command(&self.cmd_tx, cmd, &mut self.status);
    }

    fn show_input_card(&mut self, ui: &mut egui::Ui, snapshot: &ViewSnapshot) {
        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.horizontal(|ui| {
                let mut raw_input = snapshot.raw_input.clone();
                let edit = ui.add(
                    egui::TextEdit::singleline(&mut raw_input)
                        .hint_text(INPUT_HINT)
                        .desired_width((ui.available_width() - 160.0).max(120.0)),
                );
                if edit.changed() {
                    self.view.set_raw_input(raw_input);
                }

                let submit_enabled = snapshot.can_submit() && self.backend_available;
                let button = ui.add_enabled(
                    submit_enabled,
                    egui::Button::new(snapshot.submit_label()),
                );
                let enter_pressed =
                    edit.lost_focus() && ui.input(|input| input.key_pressed(egui::Key::Enter));
                if button.clicked() || (enter_pressed && submit_enabled) {
                    self.queue(BackendCommand::SubmitProcess);
                }
            });
        });
    }

    fn show_benchmark_card(&mut self, ui: &mut egui::Ui, snapshot: &ViewSnapshot) {
        let spec = to_chart_spec(&snapshot.benchmark);
        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.heading(spec.title);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let refresh = ui.add_enabled(
                        self.backend_available,
                        egui::Button::new(egui::RichText::new("Refresh Analysis").color(ACCENT)),
                    );
                    if refresh.clicked() {
                        self.queue(BackendCommand::RefreshBenchmark);
                    }
                    if let Some(refreshed_at) = snapshot.benchmark_refreshed_at {
                        ui.weak(format!(
                            "updated {}",
                            refreshed_at
                                .with_timezone(&chrono::Local)
                                .format("%H:%M:%S")
                        ));
                    }
                });
            });
            ui.add_space(12.0);
            benchmark_chart(ui, &spec, &snapshot.benchmark, CHART_HEIGHT);
        });
    }

    fn show_result_card(ui: &mut egui::Ui, snapshot: &ViewSnapshot) {
        let Some(text) = snapshot.result_text() else {
            return;
        };
        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.heading("Processed Output:");
            ui.add(egui::Label::new(egui::RichText::new(text).monospace()));
        });
    }

    fn show_alert(&mut self, ctx: &egui::Context) {
        let Some(message) = self.alerts.front().cloned() else {
            return;
        };

        let mut dismissed = false;
        egui::Window::new(message.as_str())
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .show(ctx, |ui| {
                ui.label("The engine could not process this input. Details are in the log.");
                ui.add_space(8.0);
                if ui.button("OK").clicked() {
                    dismissed = true;
                }
            });

        if dismissed {
            self.alerts.pop_front();
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();
        let snapshot = self.view.snapshot();

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.weak(&self.backend_url);
                ui.separator();
                ui.label(&self.status);
            });
        });

        let blocked = !self.alerts.is_empty();
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_enabled_ui(!blocked, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.heading(egui::RichText::new(APP_TITLE).color(ACCENT).strong());
                    });
                    ui.add_space(16.0);
                    self.show_input_card(ui, &snapshot);
                    ui.add_space(20.0);
                    self.show_benchmark_card(ui, &snapshot);
                    ui.add_space(20.0);
                    Self::show_result_card(ui, &snapshot);
                });
            });
        });

        self.show_alert(ctx);
        ctx.request_repaint_after(Duration::from_millis(100));
    }
}

impl Drop for DashboardApp {
    fn drop(&mut self) {
        let _ = self.cmd_tx.try_send(BackendCommand::Shutdown);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::bounded;

    fn app() -> (DashboardApp, Sender<UiEvent>, Receiver<BackendCommand>) {
        let (cmd_tx, cmd_rx) = bounded(8);
        let (ui_tx, ui_rx) = bounded(8);
        let app = DashboardApp::new(
            cmd_tx,
            ui_rx,
            ViewState::new(),
            "http://127.0.0.1:5000".to_string(),
        );
        (app, ui_tx, cmd_rx)
    }

    #[test]
    fn alerts_queue_until_dismissed() {
        let (mut app, ui_tx, _cmd_rx) = app();
        ui_tx
            .send(UiEvent::Alert("Backend Error".to_string()))
            .expect("send");
        ui_tx
            .send(UiEvent::Alert("Backend Error".to_string()))
            .expect("send");
        app.process_ui_events();

        assert_eq!(app.alerts.len(), 2);
        assert_eq!(app.status, "Backend Error");
    }

    #[test]
    fn unavailable_backend_disables_actions() {
        let (mut app, ui_tx, _cmd_rx) = app();
        ui_tx
            .send(UiEvent::BackendUnavailable("invalid backend url".to_string()))
            .expect("send");
        app.process_ui_events();

        assert!(!app.backend_available);
        assert_eq!(app.status, "invalid backend url");
    }

    #[test]
    fn dropping_the_app_shuts_the_backend_down() {
        let (app, _ui_tx, cmd_rx) = app();
        drop(app);
        assert_eq!(cmd_rx.try_recv(), Ok(BackendCommand::Shutdown));
    }
}
