use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{
    Array, AsArray, BooleanArray, Float32Array, Float64Array, Int32Array, Int64Array,
};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{DatasetError, FieldValue, WineDataset, WineRecord};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a wine dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.json`    – `[{ "Alcohol": 1, "Ash": 2.43, "Flavanoids": "3.06", ... }, ...]`
/// * `.csv`     – header row with column names, one record per line
/// * `.parquet` – flat scalar columns (strings, ints, floats, bools)
pub fn load_file(path: &Path) -> Result<WineDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dataset = match ext.as_str() {
        "parquet" | "pq" => load_parquet(path)?,
        "json" => {
            let text = std::fs::read_to_string(path).context("reading JSON file")?;
            load_json_str(&text)?
        }
        "csv" => {
            let file = std::fs::File::open(path).context("opening CSV")?;
            load_csv_reader(file)?
        }
        other => return Err(DatasetError::UnsupportedFormat(other.to_string()).into()),
    };

    log::info!(
        "Loaded {} records from {} ({} columns)",
        dataset.len(),
        path.display(),
        dataset.column_names.len()
    );
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Parse the records-oriented layout served as `db.json`:
///
/// ```json
/// [
///   { "Alcohol": 1, "Malic Acid": 1.71, "Ash": 2.43, "Magnesium": 127,
///     "Flavanoids": 3.06, "Hue": 1.04, ... },
///   ...
/// ]
/// ```
///
/// Values are kept as they arrive; string-encoded numbers are coerced later
/// by the extractors.
pub fn load_json_str(text: &str) -> Result<WineDataset> {
    let root: JsonValue = serde_json::from_str(text).context("parsing JSON")?;

    let rows = root.as_array().ok_or(DatasetError::NotAnArray)?;

    let mut records = Vec::with_capacity(rows.len());
    for (i, row) in rows.iter().enumerate() {
        let obj = row.as_object().ok_or(DatasetError::RowNotAnObject(i))?;

        let fields: BTreeMap<String, FieldValue> = obj
            .iter()
            .map(|(key, val)| (key.clone(), json_to_field(val)))
            .collect();
        records.push(WineRecord::new(fields));
    }

    Ok(WineDataset::from_records(records))
}

fn json_to_field(val: &JsonValue) -> FieldValue {
    match val {
        JsonValue::String(s) => FieldValue::String(s.clone()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                FieldValue::Integer(i)
            } else if let Some(f) = n.as_f64() {
                FieldValue::Float(f)
            } else {
                FieldValue::String(n.to_string())
            }
        }
        JsonValue::Bool(b) => FieldValue::Bool(*b),
        JsonValue::Null => FieldValue::Null,
        other => FieldValue::String(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, every other row is a record.
/// Cell types are guessed; empty cells become `Null`.
pub fn load_csv_reader<R: Read>(input: R) -> Result<WineDataset> {
    let mut reader = csv::Reader::from_reader(input);
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut records = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let row = result.with_context(|| format!("CSV row {row_no}"))?;

        let fields: BTreeMap<String, FieldValue> = headers
            .iter()
            .zip(row.iter())
            .map(|(col, value)| (col.clone(), guess_field_type(value)))
            .collect();
        records.push(WineRecord::new(fields));
    }

    Ok(WineDataset::from_records(records))
}

fn guess_field_type(s: &str) -> FieldValue {
    let s = s.trim();
    if s.is_empty() {
        return FieldValue::Null;
    }
    if let Ok(i) = s.parse::<i64>() {
        return FieldValue::Integer(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        return FieldValue::Float(f);
    }
    if s == "true" || s == "false" {
        return FieldValue::Bool(s == "true");
    }
    FieldValue::String(s.to_string())
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with one scalar column per measured attribute.
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<WineDataset> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();

        let columns: Vec<(String, &Arc<dyn Array>)> = schema
            .fields()
            .iter()
            .zip(batch.columns())
            .map(|(f, col)| (f.name().clone(), col))
            .collect();

        for row in 0..batch.num_rows() {
            let mut fields = BTreeMap::new();
            for (name, col) in &columns {
                let value = extract_field_value(name, col, row)
                    .with_context(|| format!("Row {row}: failed to read '{name}'"))?;
                fields.insert(name.clone(), value);
            }
            records.push(WineRecord::new(fields));
        }
    }

    Ok(WineDataset::from_records(records))
}

/// Extract a single cell from an Arrow column at a given row.
fn extract_field_value(name: &str, col: &Arc<dyn Array>, row: usize) -> Result<FieldValue> {
    if col.is_null(row) {
        return Ok(FieldValue::Null);
    }
    let value = match col.data_type() {
        DataType::Utf8 => FieldValue::String(col.as_string::<i32>().value(row).to_string()),
        DataType::LargeUtf8 => FieldValue::String(col.as_string::<i64>().value(row).to_string()),
        DataType::Int32 => {
            let arr = downcast::<Int32Array>(col)?;
            FieldValue::Integer(arr.value(row) as i64)
        }
        DataType::Int64 => {
            let arr = downcast::<Int64Array>(col)?;
            FieldValue::Integer(arr.value(row))
        }
        DataType::Float32 => {
            let arr = downcast::<Float32Array>(col)?;
            FieldValue::Float(arr.value(row) as f64)
        }
        DataType::Float64 => {
            let arr = downcast::<Float64Array>(col)?;
            FieldValue::Float(arr.value(row))
        }
        DataType::Boolean => {
            let arr = downcast::<BooleanArray>(col)?;
            FieldValue::Bool(arr.value(row))
        }
        other => {
            return Err(DatasetError::UnsupportedColumn {
                column: name.to_string(),
                data_type: format!("{other:?}"),
            }
            .into())
        }
    };
    Ok(value)
}

fn downcast<T: 'static>(col: &Arc<dyn Array>) -> Result<&T> {
    col.as_any()
        .downcast_ref::<T>()
        .with_context(|| format!("column is not {}", std::any::type_name::<T>()))
}
