use std::collections::BTreeMap;
use std::fmt;

// ---------------------------------------------------------------------------
// CellValue – a single cell of the uploaded table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value, as guessed by the loaders.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

static NULL: CellValue = CellValue::Null;

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::String(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Null => Ok(()),
        }
    }
}

impl CellValue {
    /// Guess the type of a raw text cell (CSV / TSV).
    ///
    /// Surrounding whitespace is ignored for the numeric and boolean checks;
    /// text cells keep their raw content.
    pub fn guess(s: &str) -> CellValue {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return CellValue::Null;
        }
        if let Ok(i) = trimmed.parse::<i64>() {
            return CellValue::Integer(i);
        }
        if let Ok(f) = trimmed.parse::<f64>() {
            return CellValue::Float(f);
        }
        if trimmed == "true" || trimmed == "false" {
            return CellValue::Bool(trimmed == "true");
        }
        CellValue::String(s.to_string())
    }

    /// Coerce the value to a finite number. Anything that does not parse is
    /// treated as missing.
    pub fn as_f64(&self) -> Option<f64> {
        let v = match self {
            CellValue::Float(v) => *v,
            CellValue::Integer(i) => *i as f64,
            CellValue::String(s) => s.trim().parse::<f64>().ok()?,
            CellValue::Bool(_) | CellValue::Null => return None,
        };
        v.is_finite().then_some(v)
    }

    /// Render the value as a categorical label.
    ///
    /// Integer-valued floats drop their fractional part so that a grade read
    /// as `9.0` compares equal to one read as `9`.
    pub fn to_text(&self) -> String {
        match self {
            CellValue::Float(v) if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e15 => {
                format!("{}", *v as i64)
            }
            other => other.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Record – one row of the table
// ---------------------------------------------------------------------------

/// A single row of the uploaded file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    /// Column name → value. Columns absent from a row read as `Null`.
    pub cells: BTreeMap<String, CellValue>,
}

impl Record {
    pub fn get(&self, column: &str) -> &CellValue {
        self.cells.get(column).unwrap_or(&NULL)
    }

    pub fn set(&mut self, column: &str, value: CellValue) {
        self.cells.insert(column.to_string(), value);
    }
}

impl<K: Into<String>> FromIterator<(K, CellValue)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, CellValue)>>(iter: I) -> Self {
        Record {
            cells: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Table – the complete loaded file
// ---------------------------------------------------------------------------

/// The parsed file: ordered column names plus rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    /// Column names in file order.
    pub columns: Vec<String>,
    pub records: Vec<Record>,
}

impl Table {
    pub fn new(columns: Vec<String>, records: Vec<Record>) -> Self {
        Table { columns, records }
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    /// Append a column name if it isn't present yet.
    pub fn ensure_column(&mut self, column: &str) {
        if !self.has_column(column) {
            self.columns.push(column.to_string());
        }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guess_types() {
        assert_eq!(CellValue::guess(""), CellValue::Null);
        assert_eq!(CellValue::guess("12"), CellValue::Integer(12));
        assert_eq!(CellValue::guess("3.5"), CellValue::Float(3.5));
        assert_eq!(CellValue::guess("true"), CellValue::Bool(true));
        assert_eq!(
            CellValue::guess("Algebra 2"),
            CellValue::String("Algebra 2".to_string())
        );
    }

    #[test]
    fn test_guess_ignores_padding_around_numbers() {
        assert_eq!(CellValue::guess(" 9"), CellValue::Integer(9));
        assert_eq!(CellValue::guess("3.5 "), CellValue::Float(3.5));
        assert_eq!(CellValue::guess("  "), CellValue::Null);
        assert_eq!(CellValue::guess(" false"), CellValue::Bool(false));
        assert_eq!(
            CellValue::guess(" Honors Geometry"),
            CellValue::String(" Honors Geometry".to_string())
        );
    }

    #[test]
    fn test_as_f64_coercion() {
        assert_eq!(CellValue::Integer(540).as_f64(), Some(540.0));
        assert_eq!(CellValue::String(" 3.25 ".into()).as_f64(), Some(3.25));
        assert_eq!(CellValue::String("absent".into()).as_f64(), None);
        assert_eq!(CellValue::String("NaN".into()).as_f64(), None);
        assert_eq!(CellValue::Float(f64::INFINITY).as_f64(), None);
        assert_eq!(CellValue::Bool(true).as_f64(), None);
        assert_eq!(CellValue::Null.as_f64(), None);
    }

    #[test]
    fn test_to_text_normalizes_whole_floats() {
        assert_eq!(CellValue::Float(9.0).to_text(), "9");
        assert_eq!(CellValue::Float(3.5).to_text(), "3.5");
        assert_eq!(CellValue::Integer(10).to_text(), "10");
        assert_eq!(CellValue::Null.to_text(), "");
    }

    #[test]
    fn test_record_missing_column_reads_null() {
        let record: Record = [("First Name", CellValue::String("Ada".into()))]
            .into_iter()
            .collect();
        assert_eq!(record.get("Last Name"), &CellValue::Null);
        assert_eq!(record.get("First Name").to_text(), "Ada");
    }
}
