use eframe::egui::{self, Ui};
use egui_plot::{Legend, MarkerShape, Plot, PlotPoints, Points};

use crate::data::preprocess::StudentDataset;
use crate::pipeline::DashboardView;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Scatter plot (central panel)
// ---------------------------------------------------------------------------

/// Render the title and the grade-coloured scatter plot.
///
/// With `reset_bounds` the plot forgets any zoom or drag and returns to the
/// fixed ranges of the current fields.
pub fn scatter_plot(
    ui: &mut Ui,
    state: &AppState,
    dataset: &StudentDataset,
    view: &DashboardView,
    reset_bounds: bool,
) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading(&view.title);
    });

    let x_label = view.x_label.as_str();
    let y_label = view.y_label.as_str();

    let mut plot = Plot::new("student_scatter")
        .legend(Legend::default())
        .x_axis_label(x_label)
        .y_axis_label(y_label)
        .height((ui.available_height() * 0.6).max(300.0))
        .set_margin_fraction(egui::Vec2::ZERO)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .label_formatter(|name, value| {
            if name.is_empty() {
                return format!("{x_label}: {:.0}\n{y_label}: {:.2}", value.x, value.y);
            }
            // Several students can share a point.
            let students: Vec<&str> = view
                .series
                .iter()
                .filter(|s| s.grade == name)
                .flat_map(|s| s.points.iter())
                .filter(|p| p.x == value.x && p.y == value.y)
                .map(|p| dataset.full_name(p.row))
                .collect();
            format!(
                "{}\nGrade Level: {name}\n{x_label}: {}\n{y_label}: {}",
                students.join("\n"),
                value.x,
                value.y
            )
        });

    // Fixed bounds from the full dataset; zero margin keeps them exact.
    if let Some(r) = view.limits.x {
        plot = plot.include_x(r.min).include_x(r.max);
    }
    if let Some(r) = view.limits.y {
        plot = plot.include_y(r.min).include_y(r.max);
    }
    if reset_bounds {
        plot = plot.reset();
    }

    plot.show(ui, |plot_ui| {
        for series in &view.series {
            let points: PlotPoints = series.points.iter().map(|p| [p.x, p.y]).collect();
            plot_ui.points(
                Points::new(points)
                    .name(&series.grade)
                    .color(state.colors.color_for(&series.grade))
                    .shape(MarkerShape::Circle)
                    .filled(true)
                    .radius(4.0),
            );
        }
    });
}
