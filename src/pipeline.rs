//! One full evaluation of the dashboard for the current controls.
//!
//! [`run`] is a pure function of the dataset, the filter selection, the
//! chosen fields and the configuration. The UI calls it on every frame; it
//! keeps no state between calls.

use crate::config::DashboardConfig;
use crate::data::filter::{FilterSelection, filtered_indices};
use crate::data::preprocess::{StudentDataset, missing_columns};
use crate::data::range::{AxisLimits, axis_limits};
use crate::data::summary::{GradeSummary, chart_title};
use crate::error::DashboardError;

/// The two plotted columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldChoice {
    pub x: String,
    pub y: String,
}

impl FieldChoice {
    pub fn from_config(config: &DashboardConfig) -> Self {
        Self {
            x: config.default_x.clone(),
            y: config.default_y.clone(),
        }
    }
}

/// A plotted student: coordinates plus the dataset row it came from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotPoint {
    pub x: f64,
    pub y: f64,
    pub row: usize,
}

/// All plotted points of one grade.
#[derive(Debug, Clone, PartialEq)]
pub struct GradeSeries {
    pub grade: String,
    pub points: Vec<PlotPoint>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    /// Computed over the whole dataset.
    pub limits: AxisLimits,
    /// Non-empty series in grade order. Rows missing either value are left out.
    pub series: Vec<GradeSeries>,
    /// Filtered row indices, shown in the table.
    pub rows: Vec<usize>,
    pub summary: GradeSummary,
}

impl DashboardView {
    pub fn plotted_points(&self) -> usize {
        self.series.iter().map(|s| s.points.len()).sum()
    }
}

pub fn run(
    dataset: &StudentDataset,
    filters: &FilterSelection,
    fields: &FieldChoice,
    config: &DashboardConfig,
) -> Result<DashboardView, DashboardError> {
    let missing = missing_columns(&dataset.table, [&fields.x, &fields.y]);
    if !missing.is_empty() {
        return Err(DashboardError::MissingColumns(missing));
    }

    let rows = filtered_indices(dataset, filters);
    let limits = axis_limits(
        dataset.records(),
        &fields.x,
        &fields.y,
        config.padding_x,
        config.padding_y,
    );

    let summary = GradeSummary::from_rows(dataset, &rows);
    let x_label = config.display_name(&fields.x).to_string();
    let y_label = config.display_name(&fields.y).to_string();
    let title = chart_title(
        &x_label,
        &y_label,
        summary.total(),
        &summary.breakdown(&config.grade_labels),
    );

    let mut series: Vec<GradeSeries> = dataset
        .grade_options
        .iter()
        .map(|grade| GradeSeries {
            grade: grade.clone(),
            points: Vec::new(),
        })
        .collect();
    for &row in &rows {
        let record = &dataset.records()[row];
        let (Some(x), Some(y)) = (record.get(&fields.x).as_f64(), record.get(&fields.y).as_f64())
        else {
            continue;
        };
        if let Some(s) = series.iter_mut().find(|s| s.grade == dataset.grade(row)) {
            s.points.push(PlotPoint { x, y, row });
        }
    }
    series.retain(|s| !s.points.is_empty());

    log::debug!(
        "Dashboard evaluated: {} of {} rows selected, {} plotted",
        rows.len(),
        dataset.len(),
        series.iter().map(|s| s.points.len()).sum::<usize>()
    );

    Ok(DashboardView {
        title,
        x_label,
        y_label,
        limits,
        series,
        rows,
        summary,
    })
}
