use std::path::{Path, PathBuf};

use crate::color::GradeColors;
use crate::config::DashboardConfig;
use crate::data::filter::FilterSelection;
use crate::data::loader::load_file;
use crate::data::model::Table;
use crate::data::preprocess::{StudentDataset, preprocess};
use crate::error::DashboardError;
use crate::pipeline::{self, DashboardView, FieldChoice};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The most recently opened file, after validation.
#[derive(Debug, Clone)]
pub enum Upload {
    Ready(StudentDataset),
    /// The file parsed but failed validation; nothing is plotted.
    Invalid { rows: usize, error: DashboardError },
}

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: DashboardConfig,

    /// Opened file (None until the user opens one).
    pub upload: Option<Upload>,

    /// Path of the opened file, shown in the top bar.
    pub source: Option<PathBuf>,

    /// Plotted columns.
    pub fields: FieldChoice,

    /// Grade / course filter selections.
    pub filters: FilterSelection,

    /// Marker colours for the grades of the current dataset.
    pub colors: GradeColors,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Fields of the last rendered plot. `None` forces a bounds reset.
    plotted_fields: Option<FieldChoice>,
}

impl AppState {
    pub fn new(config: DashboardConfig) -> Self {
        Self {
            fields: FieldChoice::from_config(&config),
            filters: FilterSelection::default(),
            colors: GradeColors::default(),
            upload: None,
            source: None,
            status_message: None,
            plotted_fields: None,
            config,
        }
    }

    /// Load a file from disk and ingest it. On failure the previous upload is
    /// kept and the error becomes the status message.
    pub fn open_path(&mut self, path: &Path) {
        match load_file(path) {
            Ok(table) => {
                log::info!(
                    "Loaded {} rows with columns {:?} from {}",
                    table.len(),
                    table.columns,
                    path.display()
                );
                self.source = Some(path.to_path_buf());
                self.set_table(table);
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                self.report_error(format!("Error: {e:#}"));
            }
        }
    }

    /// Validate and ingest a newly loaded table; reset stale filters.
    pub fn set_table(&mut self, table: Table) {
        let rows = table.len();
        self.status_message = None;
        self.plotted_fields = None;
        if table.is_empty() {
            log::warn!("Opened file contains no student rows");
        }
        match preprocess(table, &self.config) {
            Ok(dataset) => {
                self.filters.retain_known(&dataset);
                self.colors = GradeColors::new(&self.config.grade_colors, &dataset.grade_options);
                self.upload = Some(Upload::Ready(dataset));
            }
            Err(error) => {
                log::warn!("Upload rejected [{}]: {error}", error.error_code());
                self.upload = Some(Upload::Invalid { rows, error });
            }
        }
    }

    /// Show an error in the status line, after any message already there.
    pub fn report_error(&mut self, message: String) {
        self.status_message = Some(match self.status_message.take() {
            Some(previous) => format!("{previous} | {message}"),
            None => message,
        });
    }

    /// Whether the plot must drop its zoom/drag state and return to the
    /// fixed bounds: true once after the axis fields change or a new file
    /// is ingested.
    pub fn take_bounds_reset(&mut self) -> bool {
        if self.plotted_fields.as_ref() == Some(&self.fields) {
            return false;
        }
        self.plotted_fields = Some(self.fields.clone());
        true
    }

    pub fn dataset(&self) -> Option<&StudentDataset> {
        match &self.upload {
            Some(Upload::Ready(ds)) => Some(ds),
            _ => None,
        }
    }

    /// Evaluate the dashboard for the current controls.
    ///
    /// `None` until a file has been opened.
    pub fn view(&self) -> Option<Result<DashboardView, DashboardError>> {
        match self.upload.as_ref()? {
            Upload::Ready(ds) => Some(pipeline::run(ds, &self.filters, &self.fields, &self.config)),
            Upload::Invalid { error, .. } => Some(Err(error.clone())),
        }
    }

    /// Row count of the opened file, valid or not.
    pub fn loaded_rows(&self) -> Option<usize> {
        match self.upload.as_ref()? {
            Upload::Ready(ds) => Some(ds.len()),
            Upload::Invalid { rows, .. } => Some(*rows),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::Selection;
    use crate::data::loader::read_delimited;
    use crate::data::preprocess::tests::students;

    #[test]
    fn test_new_state_is_empty() {
        let state = AppState::new(DashboardConfig::default());
        assert!(state.view().is_none());
        assert_eq!(state.fields.x, "Math PSAT9F");
        assert_eq!(state.fields.y, "Fab 5 GPA");
    }

    #[test]
    fn test_invalid_upload_renders_nothing() {
        let mut state = AppState::new(DashboardConfig::default());
        let table = read_delimited("First Name,Last Name\nAda,Lovelace\n".as_bytes(), b',').unwrap();
        state.set_table(table);

        assert!(state.dataset().is_none());
        assert_eq!(state.loaded_rows(), Some(1));
        match state.view() {
            Some(Err(DashboardError::MissingColumns(missing))) => {
                assert_eq!(missing.len(), 10);
                assert!(!missing.contains("First Name"));
            }
            other => panic!("expected missing columns, got {other:?}"),
        }
    }

    #[test]
    fn test_new_upload_resets_stale_filters() {
        let mut state = AppState::new(DashboardConfig::default());
        state.set_table(students("A,A,12,Physics,,3.0,3.0,500,,,,\n"));
        state.filters.grade = Selection::Only("12".into());
        state.filters.course = Selection::Only("Physics".into());

        state.set_table(students("B,B,9,Physics,,3.0,3.0,500,,,,\n"));
        assert_eq!(state.filters.grade, Selection::All);
        assert_eq!(state.filters.course, Selection::Only("Physics".into()));

        let view = state.view().unwrap().unwrap();
        assert_eq!(view.rows, vec![0]);
    }

    #[test]
    fn test_field_change_resets_plot_bounds_once() {
        let mut state = AppState::new(DashboardConfig::default());
        state.set_table(students("A,A,9,Physics,,3.0,3.0,500,,,,\n"));
        assert!(state.take_bounds_reset());
        assert!(!state.take_bounds_reset());

        state.fields.x = "Math PSAT10F".into();
        assert!(state.take_bounds_reset());
        assert!(!state.take_bounds_reset());

        state.fields.y = "Cum GPA".into();
        assert!(state.take_bounds_reset());

        state.set_table(students("B,B,10,Physics,,3.0,3.0,600,,,,\n"));
        assert!(state.take_bounds_reset());
        assert!(!state.take_bounds_reset());
    }

    #[test]
    fn test_report_error_keeps_earlier_message() {
        let mut state = AppState::new(DashboardConfig::default());
        state.report_error("Error: bad config".into());
        state.open_path(Path::new("/definitely/not/here/students.csv"));

        let status = state.status_message.unwrap();
        assert!(status.starts_with("Error: bad config | Error:"), "{status}");
    }

    #[test]
    fn test_failed_open_keeps_previous_upload() {
        let mut state = AppState::new(DashboardConfig::default());
        state.set_table(students("A,A,9,Physics,,3.0,3.0,500,,,,\n"));
        state.open_path(Path::new("/definitely/not/here/students.csv"));

        assert!(state.dataset().is_some());
        assert!(state.status_message.as_deref().unwrap_or("").starts_with("Error:"));
    }
}
