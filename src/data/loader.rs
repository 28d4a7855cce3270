use std::collections::{HashMap, HashSet};
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use arrow::array::{
    Array, AsArray, BooleanArray, Float32Array, Float64Array, Int32Array, Int64Array,
    StringArray,
};
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{CellValue, Record, Table};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a student table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – comma-separated, header row (the usual school export)
/// * `.tsv`     – tab-separated, header row
/// * `.json`    – `[{ "First Name": "...", "Grade Level": 9, ... }, ...]`
/// * `.parquet` – flat columns of strings, integers, floats or booleans
pub fn load_file(path: &Path) -> Result<Table> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => {
            let file = std::fs::File::open(path).context("opening CSV file")?;
            read_delimited(file, b',')
        }
        "tsv" => {
            let file = std::fs::File::open(path).context("opening TSV file")?;
            read_delimited(file, b'\t')
        }
        "json" => {
            let text = std::fs::read_to_string(path).context("reading JSON file")?;
            parse_json(&text)
        }
        "parquet" | "pq" => load_parquet(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

// ---------------------------------------------------------------------------
// CSV / TSV loader
// ---------------------------------------------------------------------------

/// Parse delimited text with a header row. Every cell is type-guessed.
///
/// Header names are kept verbatim; repeated names are renamed with
/// [`dedupe_headers`].
pub fn read_delimited<R: Read>(input: R, delimiter: u8) -> Result<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .from_reader(input);
    let headers = dedupe_headers(reader.headers().context("reading CSV headers")?.iter());

    let mut records = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let row = result.with_context(|| format!("CSV row {row_no}"))?;

        let record: Record = headers
            .iter()
            .zip(row.iter())
            .map(|(col, value)| (col.clone(), CellValue::guess(value)))
            .collect();
        records.push(record);
    }

    Ok(Table::new(headers, records))
}

/// Give repeated column names a numeric suffix: `X, X, X` becomes
/// `X, X.1, X.2`. A suffixed name that is already taken is skipped.
pub fn dedupe_headers<'a>(names: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let names: Vec<&str> = names.into_iter().collect();
    let mut taken: HashSet<String> = HashSet::new();
    let mut repeats: HashMap<&str, usize> = HashMap::new();
    let mut out = Vec::with_capacity(names.len());

    for name in names {
        let mut unique = name.to_string();
        if taken.contains(&unique) {
            let n = repeats.entry(name).or_insert(0);
            loop {
                *n += 1;
                unique = format!("{name}.{n}");
                if !taken.contains(&unique) {
                    break;
                }
            }
            log::warn!("Duplicate column '{name}' renamed to '{unique}'");
        }
        taken.insert(unique.clone());
        out.push(unique);
    }
    out
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "First Name": "Ada", "Last Name": "Lovelace", "Grade Level": 10, "Cum GPA": 3.8 },
///   ...
/// ]
/// ```
///
/// Column order follows the first appearance of each key.
pub fn parse_json(text: &str) -> Result<Table> {
    let root: JsonValue = serde_json::from_str(text).context("parsing JSON")?;

    let rows = root
        .as_array()
        .context("Expected top-level JSON array")?;

    let mut table = Table::default();

    for (i, row) in rows.iter().enumerate() {
        let obj = row
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;

        let mut record = Record::default();
        for (key, val) in obj {
            table.ensure_column(key);
            record.set(key, json_to_cell(val));
        }
        table.records.push(record);
    }

    Ok(table)
}

fn json_to_cell(val: &JsonValue) -> CellValue {
    match val {
        JsonValue::String(s) => CellValue::String(s.clone()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                CellValue::Integer(i)
            } else if let Some(f) = n.as_f64() {
                CellValue::Float(f)
            } else {
                CellValue::String(n.to_string())
            }
        }
        JsonValue::Bool(b) => CellValue::Bool(*b),
        JsonValue::Null => CellValue::Null,
        other => CellValue::String(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file whose columns are the table's columns.
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<Table> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut batches = Vec::new();
    for batch_result in reader {
        batches.push(batch_result.context("reading parquet record batch")?);
    }
    table_from_batches(&batches)
}

/// Flatten Arrow record batches into a [`Table`].
pub fn table_from_batches(batches: &[RecordBatch]) -> Result<Table> {
    let mut table = Table::default();

    for batch in batches {
        let schema = batch.schema();
        let names = dedupe_headers(schema.fields().iter().map(|f| f.name().as_str()));
        for name in &names {
            table.ensure_column(name);
        }

        for row in 0..batch.num_rows() {
            let mut record = Record::default();
            for (col_idx, name) in names.iter().enumerate() {
                let value = extract_cell(batch.column(col_idx), row)
                    .with_context(|| format!("Row {row}: failed to read '{name}'"))?;
                record.set(name, value);
            }
            table.records.push(record);
        }
    }

    Ok(table)
}

// -- Arrow helpers --

/// Extract a single cell from an Arrow column at a given row.
fn extract_cell(col: &Arc<dyn Array>, row: usize) -> Result<CellValue> {
    if col.is_null(row) {
        return Ok(CellValue::Null);
    }
    let value = match col.data_type() {
        DataType::Utf8 => {
            let arr = downcast::<StringArray>(col)?;
            CellValue::String(arr.value(row).to_string())
        }
        DataType::LargeUtf8 => {
            let arr = col.as_string::<i64>();
            CellValue::String(arr.value(row).to_string())
        }
        DataType::Int32 => CellValue::Integer(downcast::<Int32Array>(col)?.value(row) as i64),
        DataType::Int64 => CellValue::Integer(downcast::<Int64Array>(col)?.value(row)),
        DataType::Float32 => CellValue::Float(downcast::<Float32Array>(col)?.value(row) as f64),
        DataType::Float64 => CellValue::Float(downcast::<Float64Array>(col)?.value(row)),
        DataType::Boolean => CellValue::Bool(downcast::<BooleanArray>(col)?.value(row)),
        _ => {
            let formatted = arrow::util::display::array_value_to_string(col, row)
                .context("formatting arrow value")?;
            CellValue::String(formatted)
        }
    };
    Ok(value)
}

fn downcast<T: 'static>(col: &Arc<dyn Array>) -> Result<&T> {
    col.as_any()
        .downcast_ref::<T>()
        .with_context(|| format!("unexpected array layout for {:?}", col.data_type()))
}
