//! Dashboard configuration: field options, labels, colours and paddings.
//!
//! Every field has a default, so a config file only needs to name what it
//! overrides:
//!
//! ```json
//! { "padding_x": 30.0, "grade_colors": { "9": "#9467bd" } }
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::DashboardError;

/// Source column holding the course a student lacks the prerequisite for.
pub const PREREQUISITE_COLUMN: &str = "I do not meet the grade prerequisite for";
pub const FIRST_NAME: &str = "First Name";
pub const LAST_NAME: &str = "Last Name";
pub const GRADE_LEVEL: &str = "Grade Level";
/// Derived: copy of [`PREREQUISITE_COLUMN`] as text.
pub const CLASS_DESIRED: &str = "Class Desired";
/// Derived: `"{Last}, {First}"`.
pub const FULL_NAME: &str = "Full Name";

/// Human label for one grade value, e.g. `"9"` → `"freshmen"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeLabel {
    pub grade: String,
    pub label: String,
}

impl GradeLabel {
    fn new(grade: &str, label: &str) -> Self {
        Self {
            grade: grade.to_string(),
            label: label.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Native window title.
    pub window_title: String,
    /// Columns an uploaded file must contain.
    pub required_columns: Vec<String>,
    /// Choices for the X-Axis dropdown (test scores).
    pub x_options: Vec<String>,
    /// Choices for the Y-Axis dropdown (GPAs).
    pub y_options: Vec<String>,
    pub default_x: String,
    pub default_y: String,
    /// Column name → label used in the chart title and axes.
    pub display_names: BTreeMap<String, String>,
    /// Ordered grade labels used in the title breakdown.
    pub grade_labels: Vec<GradeLabel>,
    /// Grade → `#rrggbb` marker colour.
    pub grade_colors: BTreeMap<String, String>,
    /// Padding added on both sides of the x range.
    pub padding_x: f64,
    /// Padding added on both sides of the y range.
    pub padding_y: f64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        let x_options: Vec<String> = [
            "Math PSAT9F",
            "Math PSAT9S",
            "Math PSAT10F",
            "Math PSAT10S",
            "Math PSAT11F",
        ]
        .map(String::from)
        .to_vec();
        let y_options: Vec<String> = ["Cum GPA", "Fab 5 GPA"].map(String::from).to_vec();

        let mut required_columns: Vec<String> = [
            FIRST_NAME,
            LAST_NAME,
            GRADE_LEVEL,
            PREREQUISITE_COLUMN,
            "Department Notes",
        ]
        .map(String::from)
        .to_vec();
        required_columns.extend(y_options.iter().cloned());
        required_columns.extend(x_options.iter().cloned());

        let display_names = [
            ("Math PSAT9F", "PSAT 9 (Fall)"),
            ("Math PSAT9S", "PSAT 9 (Spring)"),
            ("Math PSAT10F", "PSAT 10 (Fall)"),
            ("Math PSAT10S", "PSAT 10 (Spring)"),
            ("Math PSAT11F", "PSAT 11 (Fall)"),
            ("Cum GPA", "Cumulative GPA"),
            ("Fab 5 GPA", "Fab 5 GPA"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let grade_colors = [
            ("9", "#1f77b4"),
            ("10", "#ff7f0e"),
            ("11", "#2ca02c"),
            ("12", "#d62728"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        Self {
            window_title: "Student Appeal Dashboard".to_string(),
            required_columns,
            default_x: x_options[0].clone(),
            default_y: y_options[1].clone(),
            x_options,
            y_options,
            display_names,
            grade_labels: vec![
                GradeLabel::new("9", "freshmen"),
                GradeLabel::new("10", "sophomores"),
                GradeLabel::new("11", "juniors"),
                GradeLabel::new("12", "seniors"),
            ],
            grade_colors,
            padding_x: 20.0,
            padding_y: 0.2,
        }
    }
}

impl DashboardConfig {
    /// Read a JSON config file, filling unspecified fields with defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config = Self::from_json(&text)
            .with_context(|| format!("loading config {}", path.display()))?;
        log::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text).context("parsing config JSON")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> std::result::Result<(), DashboardError> {
        let invalid = |msg: String| Err(DashboardError::InvalidConfig(msg));
        if self.x_options.is_empty() || self.y_options.is_empty() {
            return invalid("x_options and y_options must not be empty".into());
        }
        if !self.x_options.contains(&self.default_x) {
            return invalid(format!("default_x '{}' is not in x_options", self.default_x));
        }
        if !self.y_options.contains(&self.default_y) {
            return invalid(format!("default_y '{}' is not in y_options", self.default_y));
        }
        for (name, padding) in [("padding_x", self.padding_x), ("padding_y", self.padding_y)] {
            if !padding.is_finite() || padding < 0.0 {
                return invalid(format!("{name} must be a non-negative number, got {padding}"));
            }
        }
        Ok(())
    }

    /// Label for a column, falling back to the column name itself.
    pub fn display_name<'a>(&'a self, column: &'a str) -> &'a str {
        self.display_names
            .get(column)
            .map(String::as_str)
            .unwrap_or(column)
    }
}
