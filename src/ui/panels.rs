use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::filter::{ALL, Selection};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – field choices and filters
// ---------------------------------------------------------------------------

/// Render the left "Filter Options" panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filter Options");
    ui.separator();

    let Some(dataset) = state.dataset() else {
        ui.label("No dataset loaded.");
        return;
    };

    // Clone what we need so we can mutate state inside the closures.
    let grades = dataset.grade_options.clone();
    let courses = dataset.course_options.clone();
    let x_options = state.config.x_options.clone();
    let y_options = state.config.y_options.clone();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            field_combo(ui, "X-Axis", &x_options, &mut state.fields.x);
            field_combo(ui, "Y-Axis", &y_options, &mut state.fields.y);
            ui.separator();

            ui.strong("Select Grade Level");
            selection_radios(ui, &grades, &mut state.filters.grade, |grade| {
                RichText::new(grade).color(state.colors.color_for(grade))
            });
            ui.separator();

            ui.strong("Select Desired Course");
            selection_radios(ui, &courses, &mut state.filters.course, |course| {
                RichText::new(course)
            });
        });
}

fn field_combo(ui: &mut Ui, label: &str, options: &[String], current: &mut String) {
    ui.strong(label);
    egui::ComboBox::from_id_salt(label)
        .selected_text(current.as_str())
        .show_ui(ui, |ui: &mut Ui| {
            for option in options {
                ui.selectable_value(current, option.clone(), option);
            }
        });
}

/// "All" followed by one radio button per option.
fn selection_radios(
    ui: &mut Ui,
    options: &[String],
    selection: &mut Selection,
    label: impl Fn(&str) -> RichText,
) {
    ui.radio_value(selection, Selection::All, ALL);
    for option in options {
        let text = if option.is_empty() {
            RichText::new("(blank)").italics()
        } else {
            label(option)
        };
        ui.radio_value(selection, Selection::Only(option.clone()), text);
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(path) = &state.source {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            ui.label(name);
        }

        if let Some(rows) = state.loaded_rows() {
            ui.label(format!("{rows} students loaded"));
        }

        if let Some(Ok(view)) = state.view() {
            ui.label(format!(
                "{} selected, {} plotted",
                view.summary.total(),
                view.plotted_points()
            ));
            if !state.filters.is_unfiltered() {
                ui.label(format!(
                    "(grade: {}, course: {})",
                    state.filters.grade.label(),
                    state.filters.course.label()
                ));
            }
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Upload student data")
        .add_filter("Supported files", &["csv", "tsv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("TSV", &["tsv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.open_path(&path);
    }
}
