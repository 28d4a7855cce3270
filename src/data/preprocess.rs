use std::cmp::Ordering;
use std::collections::{BTreeSet, HashSet};

use crate::config::{
    CLASS_DESIRED, DashboardConfig, FIRST_NAME, FULL_NAME, GRADE_LEVEL, LAST_NAME,
    PREREQUISITE_COLUMN,
};
use crate::error::DashboardError;

use super::model::{CellValue, Record, Table};

// ---------------------------------------------------------------------------
// StudentDataset – a validated table with derived columns
// ---------------------------------------------------------------------------

/// An uploaded table that passed validation, with the derived columns
/// (`Grade Level` as text, `Class Desired`, `Full Name`) filled in.
#[derive(Debug, Clone, PartialEq)]
pub struct StudentDataset {
    pub table: Table,
    /// Sorted unique grade values, offered by the grade filter.
    pub grade_options: Vec<String>,
    /// Sorted unique desired courses, offered by the course filter.
    pub course_options: Vec<String>,
}

impl StudentDataset {
    pub fn records(&self) -> &[Record] {
        &self.table.records
    }

    pub fn columns(&self) -> &[String] {
        &self.table.columns
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Text of a derived categorical column for one row.
    pub fn text<'a>(&'a self, row: usize, column: &str) -> &'a str {
        match self.table.records[row].get(column) {
            CellValue::String(s) => s,
            _ => "",
        }
    }

    pub fn grade(&self, row: usize) -> &str {
        self.text(row, GRADE_LEVEL)
    }

    pub fn course(&self, row: usize) -> &str {
        self.text(row, CLASS_DESIRED)
    }

    pub fn full_name(&self, row: usize) -> &str {
        self.text(row, FULL_NAME)
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// The subset of `required` that `table` does not contain.
pub fn missing_columns<'a>(
    table: &Table,
    required: impl IntoIterator<Item = &'a String>,
) -> BTreeSet<String> {
    let present: HashSet<&str> = table.columns.iter().map(String::as_str).collect();
    required
        .into_iter()
        .filter(|col| !present.contains(col.as_str()))
        .cloned()
        .collect()
}

pub fn validate(table: &Table, config: &DashboardConfig) -> Result<(), DashboardError> {
    let missing = missing_columns(table, &config.required_columns);
    if missing.is_empty() {
        Ok(())
    } else {
        Err(DashboardError::MissingColumns(missing))
    }
}

// ---------------------------------------------------------------------------
// Derivation
// ---------------------------------------------------------------------------

/// Validate the uploaded table and derive the dashboard columns.
pub fn preprocess(mut table: Table, config: &DashboardConfig) -> Result<StudentDataset, DashboardError> {
    validate(&table, config)?;

    for record in &mut table.records {
        let grade = record.get(GRADE_LEVEL).to_text();
        let course = record.get(PREREQUISITE_COLUMN).to_text();
        let full_name = format!(
            "{}, {}",
            record.get(LAST_NAME).to_text(),
            record.get(FIRST_NAME).to_text()
        );
        record.set(GRADE_LEVEL, CellValue::String(grade));
        record.set(CLASS_DESIRED, CellValue::String(course));
        record.set(FULL_NAME, CellValue::String(full_name));
    }
    table.ensure_column(GRADE_LEVEL);
    table.ensure_column(CLASS_DESIRED);
    table.ensure_column(FULL_NAME);

    let grade_options = unique_sorted(&table, GRADE_LEVEL);
    let course_options = unique_sorted(&table, CLASS_DESIRED);

    Ok(StudentDataset {
        table,
        grade_options,
        course_options,
    })
}

fn unique_sorted(table: &Table, column: &str) -> Vec<String> {
    let unique: BTreeSet<String> = table
        .records
        .iter()
        .map(|r| r.get(column).to_text())
        .collect();
    let mut values: Vec<String> = unique.into_iter().collect();
    values.sort_by(|a, b| compare_labels(a, b));
    values
}

/// Numbers sort numerically (`9` before `10`), everything else lexically
/// after them.
fn compare_labels(a: &str, b: &str) -> Ordering {
    match (a.parse::<f64>(), b.parse::<f64>()) {
        (Ok(x), Ok(y)) => x.total_cmp(&y),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::data::loader::read_delimited;
    use pretty_assertions::assert_eq;

    pub(crate) const HEADER: &str = "First Name,Last Name,Grade Level,\
I do not meet the grade prerequisite for,Department Notes,Cum GPA,Fab 5 GPA,\
Math PSAT9F,Math PSAT9S,Math PSAT10F,Math PSAT10S,Math PSAT11F";

    /// Parse a CSV body under the full required header.
    pub(crate) fn students(body: &str) -> Table {
        read_delimited(format!("{HEADER}\n{body}").as_bytes(), b',').unwrap()
    }

    pub(crate) fn dataset(body: &str) -> StudentDataset {
        preprocess(students(body), &DashboardConfig::default()).unwrap()
    }

    #[test]
    fn test_reports_exactly_the_missing_columns() {
        let table = read_delimited(
            "First Name,Last Name,Grade Level,Cum GPA\nAda,Lovelace,9,3.9\n".as_bytes(),
            b',',
        )
        .unwrap();
        let err = preprocess(table, &DashboardConfig::default()).unwrap_err();

        let expected: BTreeSet<String> = [
            "I do not meet the grade prerequisite for",
            "Department Notes",
            "Fab 5 GPA",
            "Math PSAT9F",
            "Math PSAT9S",
            "Math PSAT10F",
            "Math PSAT10S",
            "Math PSAT11F",
        ]
        .map(String::from)
        .into();
        assert_eq!(err, DashboardError::MissingColumns(expected));
    }

    #[test]
    fn test_complete_header_validates() {
        let table = students("");
        assert!(validate(&table, &DashboardConfig::default()).is_ok());
    }

    #[test]
    fn test_derives_columns() {
        let ds = dataset(
            "Ada,Lovelace,9,Algebra 2,,3.9,3.8,560,570,,,\n\
             Alan,Turing,10.0,Geometry,note,3.1,3.0,500,510,520,,\n",
        );
        assert_eq!(ds.full_name(0), "Lovelace, Ada");
        assert_eq!(ds.grade(0), "9");
        assert_eq!(ds.grade(1), "10");
        assert_eq!(ds.course(1), "Geometry");
        assert_eq!(ds.columns().last().map(String::as_str), Some(FULL_NAME));
        assert_eq!(
            ds.columns().iter().filter(|c| *c == GRADE_LEVEL).count(),
            1,
            "Grade Level is replaced in place"
        );
    }

    #[test]
    fn test_filter_options_sorted() {
        let ds = dataset(
            "A,A,10,Physics,,,,,,,,\n\
             B,B,9,Calculus,,,,,,,,\n\
             C,C,12,Physics,,,,,,,,\n\
             D,D,9,,,,,,,,,\n",
        );
        assert_eq!(ds.grade_options, vec!["9", "10", "12"]);
        assert_eq!(ds.course_options, vec!["", "Calculus", "Physics"]);
    }

    #[test]
    fn test_padded_grade_cells_share_one_option() {
        use crate::data::filter::FilterSelection;
        use crate::pipeline::{self, FieldChoice};

        let config = DashboardConfig::default();
        let ds = dataset(
            "A,One,9,Physics,,3.1,3.0,500,,,,\n\
             B,Two, 9,Physics,,3.2,3.1,510,,,,\n",
        );
        assert_eq!(ds.grade_options, vec!["9"]);
        assert_eq!(ds.grade(1), "9");

        let view = pipeline::run(
            &ds,
            &FilterSelection::default(),
            &FieldChoice::from_config(&config),
            &config,
        )
        .unwrap();
        assert!(view.title.ends_with("2 freshmen)"), "{}", view.title);
    }

    #[test]
    fn test_compare_labels_numbers_first() {
        let mut labels = vec!["11", "unknown", "9", "10"];
        labels.sort_by(|a, b| compare_labels(a, b));
        assert_eq!(labels, vec!["9", "10", "11", "unknown"]);
    }
}
