use super::model::Record;

// ---------------------------------------------------------------------------
// Axis ranges computed from the full (unfiltered) dataset
// ---------------------------------------------------------------------------

/// Inclusive plot bounds for one axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
}

/// Bounds for both axes. An axis with no numeric data has no range.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AxisLimits {
    pub x: Option<AxisRange>,
    pub y: Option<AxisRange>,
}

/// Coerce one column to numbers; cells that don't coerce are `None`.
pub fn numeric_column<'a>(
    records: impl IntoIterator<Item = &'a Record>,
    column: &str,
) -> Vec<Option<f64>> {
    records
        .into_iter()
        .map(|r| r.get(column).as_f64())
        .collect()
}

/// `[min - padding, max + padding]` over the present values.
pub fn padded_range(values: impl IntoIterator<Item = Option<f64>>, padding: f64) -> Option<AxisRange> {
    let (min, max) = values
        .into_iter()
        .flatten()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    (min <= max).then(|| AxisRange {
        min: min - padding,
        max: max + padding,
    })
}

/// Padded limits for the chosen fields over every record.
///
/// Callers pass the whole dataset, never the filtered subset, so the axes
/// stay put while filters change.
pub fn axis_limits(
    records: &[Record],
    x_field: &str,
    y_field: &str,
    padding_x: f64,
    padding_y: f64,
) -> AxisLimits {
    AxisLimits {
        x: padded_range(numeric_column(records, x_field), padding_x),
        y: padded_range(numeric_column(records, y_field), padding_y),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::CellValue;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_padded_range_skips_missing() {
        let r = padded_range([Some(480.0), None, Some(620.0), Some(510.0)], 20.0).unwrap();
        assert_eq!(r, AxisRange { min: 460.0, max: 640.0 });
    }

    #[test]
    fn test_padded_range_empty() {
        assert_eq!(padded_range([None, None], 1.0), None);
        assert_eq!(padded_range(Vec::new(), 1.0), None);
    }

    #[test]
    fn test_single_value_range() {
        let r = padded_range([Some(3.0)], 0.2).unwrap();
        assert!(approx(r.min, 2.8));
        assert!(approx(r.max, 3.2));
    }

    #[test]
    fn test_axis_limits_coerce_text_and_ignore_garbage() {
        let records: Vec<Record> = [
            ("500", CellValue::Float(3.5)),
            ("n/a", CellValue::String("3.9".into())),
            ("610", CellValue::String("absent".into())),
        ]
        .into_iter()
        .map(|(psat, gpa)| {
            [
                ("Math PSAT9F", CellValue::String(psat.into())),
                ("Cum GPA", gpa),
            ]
            .into_iter()
            .collect()
        })
        .collect();

        let limits = axis_limits(&records, "Math PSAT9F", "Cum GPA", 20.0, 0.2);
        assert_eq!(limits.x, Some(AxisRange { min: 480.0, max: 630.0 }));
        let y = limits.y.unwrap();
        assert!(approx(y.min, 3.3));
        assert!(approx(y.max, 4.1));
    }

    #[test]
    fn test_absent_column_has_no_range() {
        let records = vec![Record::default()];
        let limits = axis_limits(&records, "Math PSAT11F", "Cum GPA", 20.0, 0.2);
        assert_eq!(limits, AxisLimits::default());
    }
}
