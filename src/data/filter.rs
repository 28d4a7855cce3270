use super::preprocess::StudentDataset;

// ---------------------------------------------------------------------------
// Filter predicate: one optional equality match per categorical column
// ---------------------------------------------------------------------------

/// Label of the "no filter" choice.
pub const ALL: &str = "All";

/// One filter choice: the "All" sentinel or a single value to match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Selection {
    #[default]
    All,
    Only(String),
}

impl Selection {
    pub fn matches(&self, value: &str) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(wanted) => wanted == value,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Selection::All => ALL,
            Selection::Only(v) => v,
        }
    }

    /// Fall back to `All` when the selected value is not among `options`.
    /// Returns `true` if the selection was reset.
    fn reset_unless_in(&mut self, options: &[String]) -> bool {
        match self {
            Selection::Only(v) if !options.contains(v) => {
                *self = Selection::All;
                true
            }
            _ => false,
        }
    }
}

/// The grade-level and desired-course filters, combined with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSelection {
    pub grade: Selection,
    pub course: Selection,
}

impl FilterSelection {
    /// Drop selections that refer to values the dataset does not contain,
    /// e.g. after a different file was opened.
    pub fn retain_known(&mut self, dataset: &StudentDataset) {
        if self.grade.reset_unless_in(&dataset.grade_options) {
            log::debug!("Grade filter reset to {ALL}");
        }
        if self.course.reset_unless_in(&dataset.course_options) {
            log::debug!("Course filter reset to {ALL}");
        }
    }

    pub fn is_unfiltered(&self) -> bool {
        self.grade == Selection::All && self.course == Selection::All
    }
}

/// Return indices of rows that pass both filters, in dataset order.
pub fn filtered_indices(dataset: &StudentDataset, filters: &FilterSelection) -> Vec<usize> {
    (0..dataset.len())
        .filter(|&i| filters.grade.matches(dataset.grade(i)))
        .filter(|&i| filters.course.matches(dataset.course(i)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::preprocess::tests::dataset;

    fn sample() -> StudentDataset {
        dataset(
            "A,One,9,Physics,,3.1,3.0,500,,,,\n\
             B,Two,9,Calculus,,3.4,3.3,520,,,,\n\
             C,Three,10,Physics,,2.9,2.8,480,,,,\n\
             D,Four,11,Physics,,3.9,3.7,600,,,,\n\
             E,Five,10,Calculus,,3.0,3.2,510,,,,\n",
        )
    }

    #[test]
    fn test_all_keeps_every_row() {
        let ds = sample();
        let filters = FilterSelection::default();
        assert!(filters.is_unfiltered());
        assert_eq!(filtered_indices(&ds, &filters), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_single_filter_matches_exactly() {
        let ds = sample();
        let filters = FilterSelection {
            grade: Selection::Only("10".into()),
            course: Selection::All,
        };
        let rows = filtered_indices(&ds, &filters);
        assert_eq!(rows, vec![2, 4]);
        assert!(rows.iter().all(|&i| ds.grade(i) == "10"));
        assert!(rows.len() <= ds.len());
    }

    #[test]
    fn test_filters_combine_with_and() {
        let ds = sample();
        let filters = FilterSelection {
            grade: Selection::Only("9".into()),
            course: Selection::Only("Physics".into()),
        };
        assert_eq!(filtered_indices(&ds, &filters), vec![0]);
    }

    #[test]
    fn test_no_match_yields_empty() {
        let ds = sample();
        let filters = FilterSelection {
            grade: Selection::Only("11".into()),
            course: Selection::Only("Calculus".into()),
        };
        assert!(filtered_indices(&ds, &filters).is_empty());
    }

    #[test]
    fn test_retain_known_resets_stale_values() {
        let ds = sample();
        let mut filters = FilterSelection {
            grade: Selection::Only("12".into()),
            course: Selection::Only("Physics".into()),
        };
        filters.retain_known(&ds);
        assert_eq!(filters.grade, Selection::All);
        assert_eq!(filters.course, Selection::Only("Physics".into()));
    }

    #[test]
    fn test_selection_label() {
        assert_eq!(Selection::All.label(), "All");
        assert_eq!(Selection::Only("10".into()).label(), "10");
    }
}
