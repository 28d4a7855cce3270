//! Errors the dashboard shows to the user.
//!
//! Loading and parsing failures travel as `anyhow::Error`; this enum covers
//! the failures the dashboard itself detects.

use std::collections::BTreeSet;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DashboardError {
    /// The uploaded file lacks columns the dashboard needs.
    #[error("CSV is missing required columns: {{{}}}", join_columns(.0))]
    MissingColumns(BTreeSet<String>),

    /// A configuration file was readable but inconsistent.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

fn join_columns(columns: &BTreeSet<String>) -> String {
    columns.iter().map(String::as_str).collect::<Vec<_>>().join(", ")
}

impl DashboardError {
    /// Short machine-readable code, used in log lines.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::MissingColumns(_) => "MISSING_COLUMNS",
            Self::InvalidConfig(_) => "INVALID_CONFIG",
        }
    }
}
