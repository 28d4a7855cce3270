use eframe::egui::{self, Color32, RichText, Ui};

use crate::state::AppState;
use crate::ui::{panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct StudentAppealApp {
    pub state: AppState,
}

impl StudentAppealApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for StudentAppealApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: axis fields and filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: chart + table ----
        egui::CentralPanel::default().show(ctx, |ui| {
            central_panel(ui, &mut self.state);
        });
    }
}

fn central_panel(ui: &mut Ui, state: &mut AppState) {
    let view = match state.view() {
        None => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading("Please upload a CSV file to get started.  (File → Open…)");
            });
            return;
        }
        Some(Err(error)) => {
            ui.label(RichText::new(error.to_string()).color(Color32::RED).strong());
            return;
        }
        Some(Ok(view)) => view,
    };

    let reset_bounds = state.take_bounds_reset();
    let Some(dataset) = state.dataset() else {
        return;
    };
    plot::scatter_plot(ui, state, dataset, &view, reset_bounds);
    ui.separator();
    table::data_table(ui, dataset, &view.rows);
}
