use std::collections::BTreeMap;

use crate::config::GradeLabel;

use super::preprocess::StudentDataset;

/// Row counts per grade over a filtered subset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GradeSummary {
    counts: BTreeMap<String, usize>,
    total: usize,
}

impl GradeSummary {
    pub fn from_rows(dataset: &StudentDataset, rows: &[usize]) -> Self {
        let mut counts: BTreeMap<String, usize> = BTreeMap::new();
        for &row in rows {
            *counts.entry(dataset.grade(row).to_string()).or_default() += 1;
        }
        GradeSummary {
            counts,
            total: rows.len(),
        }
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn count(&self, grade: &str) -> usize {
        self.counts.get(grade).copied().unwrap_or(0)
    }

    /// `"6 freshmen, 4 sophomores"`, in label order, skipping empty grades.
    pub fn breakdown(&self, labels: &[GradeLabel]) -> String {
        labels
            .iter()
            .filter_map(|l| match self.count(&l.grade) {
                0 => None,
                n => Some(format!("{n} {}", l.label)),
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Chart title: the two axis labels and the student breakdown.
pub fn chart_title(x_label: &str, y_label: &str, total: usize, breakdown: &str) -> String {
    format!("{x_label} vs {y_label}\n(\n{total} total students: {breakdown})")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DashboardConfig;
    use crate::data::preprocess::tests::dataset;
    use pretty_assertions::assert_eq;

    fn rows(grades: &[&str]) -> String {
        grades
            .iter()
            .enumerate()
            .map(|(i, g)| format!("S{i},L{i},{g},Physics,,3.0,3.0,500,,,,\n"))
            .collect()
    }

    #[test]
    fn test_breakdown_in_label_order() {
        let ds = dataset(&rows(&["11", "9", "9", "12", "9"]));
        let all: Vec<usize> = (0..ds.len()).collect();
        let summary = GradeSummary::from_rows(&ds, &all);
        let labels = DashboardConfig::default().grade_labels;
        assert_eq!(summary.breakdown(&labels), "3 freshmen, 1 juniors, 1 seniors");
        assert_eq!(summary.total(), 5);
        assert_eq!(summary.count("10"), 0);
    }

    #[test]
    fn test_breakdown_counts_sum_to_total() {
        let ds = dataset(&rows(&["9", "10", "11", "12", "10", "12"]));
        let all: Vec<usize> = (0..ds.len()).collect();
        let summary = GradeSummary::from_rows(&ds, &all);
        let labels = DashboardConfig::default().grade_labels;
        let sum: usize = labels.iter().map(|l| summary.count(&l.grade)).sum();
        assert_eq!(sum, summary.total());
    }

    #[test]
    fn test_empty_subset() {
        let ds = dataset(&rows(&["9"]));
        let summary = GradeSummary::from_rows(&ds, &[]);
        assert_eq!(summary.breakdown(&DashboardConfig::default().grade_labels), "");
        assert_eq!(
            chart_title("PSAT 9 (Fall)", "Fab 5 GPA", summary.total(), ""),
            "PSAT 9 (Fall) vs Fab 5 GPA\n(\n0 total students: )"
        );
    }

    #[test]
    fn test_chart_title() {
        assert_eq!(
            chart_title("PSAT 10 (Spring)", "Cumulative GPA", 4, "4 sophomores"),
            "PSAT 10 (Spring) vs Cumulative GPA\n(\n4 total students: 4 sophomores)"
        );
    }
}
