use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use thiserror::Error;

// ---------------------------------------------------------------------------
// FieldValue – a single cell of the wine dataset
// ---------------------------------------------------------------------------

/// A dynamically-typed cell as it arrives from an untyped source (JSON, CSV,
/// Parquet). Numeric columns may come through as strings and are coerced
/// with [`FieldValue::as_number`].
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

// -- Manual Eq/Ord so FieldValue can live in a BTreeSet --

impl Eq for FieldValue {}

impl PartialOrd for FieldValue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FieldValue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use FieldValue::*;
        fn discriminant(v: &FieldValue) -> u8 {
            match v {
                Null => 0,
                Bool(_) => 1,
                Integer(_) => 2,
                Float(_) => 3,
                String(_) => 4,
            }
        }
        let da = discriminant(self);
        let db = discriminant(other);
        if da != db {
            return da.cmp(&db);
        }
        match (self, other) {
            (Null, Null) => std::cmp::Ordering::Equal,
            (Bool(a), Bool(b)) => a.cmp(b),
            (Integer(a), Integer(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.total_cmp(b),
            (String(a), String(b)) => a.cmp(b),
            _ => std::cmp::Ordering::Equal,
        }
    }
}

impl std::hash::Hash for FieldValue {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            FieldValue::String(s) => s.hash(state),
            FieldValue::Integer(i) => i.hash(state),
            FieldValue::Float(f) => f.to_bits().hash(state),
            FieldValue::Bool(b) => b.hash(state),
            FieldValue::Null => {}
        }
    }
}

/// Plain rendering, used verbatim inside group labels (`Class 1`, `Class 1.5`).
impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::String(s) => write!(f, "{s}"),
            FieldValue::Integer(i) => write!(f, "{i}"),
            FieldValue::Float(v) => write!(f, "{v}"),
            FieldValue::Bool(b) => write!(f, "{b}"),
            FieldValue::Null => write!(f, "null"),
        }
    }
}

impl FieldValue {
    /// Coerce the cell to a finite number.
    ///
    /// This is the only place where heterogeneous numeric encodings are
    /// interpreted: integers and floats pass through, strings are trimmed and
    /// parsed. Anything that does not end up as a finite `f64` is `None`.
    pub fn as_number(&self) -> Option<f64> {
        let value = match self {
            FieldValue::Integer(i) => *i as f64,
            FieldValue::Float(v) => *v,
            FieldValue::String(s) => s.trim().parse::<f64>().ok()?,
            FieldValue::Bool(_) | FieldValue::Null => return None,
        };
        value.is_finite().then_some(value)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }
}

// ---------------------------------------------------------------------------
// WineRecord – one sample of the dataset
// ---------------------------------------------------------------------------

/// A single wine sample (one row of the source table).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WineRecord {
    /// Column name → value.
    pub fields: BTreeMap<String, FieldValue>,
}

impl WineRecord {
    pub fn new(fields: BTreeMap<String, FieldValue>) -> Self {
        Self { fields }
    }

    /// Raw cell lookup.
    pub fn get(&self, column: &str) -> Option<&FieldValue> {
        self.fields.get(column)
    }

    /// Numeric value of a column, `None` when missing or not coercible.
    pub fn number(&self, column: &str) -> Option<f64> {
        self.get(column).and_then(FieldValue::as_number)
    }
}

impl<K: Into<String>> FromIterator<(K, FieldValue)> for WineRecord {
    fn from_iter<I: IntoIterator<Item = (K, FieldValue)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// WineDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full parsed dataset with pre-computed column indices.
#[derive(Debug, Clone, Default)]
pub struct WineDataset {
    /// All records, in source order.
    pub records: Vec<WineRecord>,
    /// Sorted list of column names seen in any record.
    pub column_names: Vec<String>,
    /// For each column the sorted set of unique values.
    pub unique_values: BTreeMap<String, BTreeSet<FieldValue>>,
}

impl WineDataset {
    /// Build column indices from the loaded records.
    pub fn from_records(records: Vec<WineRecord>) -> Self {
        let mut column_names_set: BTreeSet<String> = BTreeSet::new();
        let mut unique_values: BTreeMap<String, BTreeSet<FieldValue>> = BTreeMap::new();

        for rec in &records {
            for (col, val) in &rec.fields {
                column_names_set.insert(col.clone());
                unique_values
                    .entry(col.clone())
                    .or_default()
                    .insert(val.clone());
            }
        }
        WineDataset {
            records,
            column_names: column_names_set.into_iter().collect(),
            unique_values,
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Layout problems in a source file that callers may want to tell apart.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),
    #[error("expected a top-level JSON array of records")]
    NotAnArray,
    #[error("row {0} is not a JSON object")]
    RowNotAnObject(usize),
    #[error("column '{column}' has unsupported type {data_type}")]
    UnsupportedColumn { column: String, data_type: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_strings_are_coerced() {
        assert_eq!(FieldValue::String("3.0".into()).as_number(), Some(3.0));
        assert_eq!(FieldValue::String(" 2.5 ".into()).as_number(), Some(2.5));
        assert_eq!(FieldValue::Integer(4).as_number(), Some(4.0));
        assert_eq!(FieldValue::Float(1.25).as_number(), Some(1.25));
    }

    #[test]
    fn non_numeric_and_non_finite_values_are_rejected() {
        assert_eq!(FieldValue::String("abc".into()).as_number(), None);
        assert_eq!(FieldValue::String("".into()).as_number(), None);
        assert_eq!(FieldValue::String("NaN".into()).as_number(), None);
        assert_eq!(FieldValue::String("inf".into()).as_number(), None);
        assert_eq!(FieldValue::Float(f64::NAN).as_number(), None);
        assert_eq!(FieldValue::Bool(true).as_number(), None);
        assert_eq!(FieldValue::Null.as_number(), None);
    }

    #[test]
    fn display_matches_label_style() {
        assert_eq!(FieldValue::Integer(1).to_string(), "1");
        assert_eq!(FieldValue::Float(1.5).to_string(), "1.5");
        assert_eq!(FieldValue::Float(2.0).to_string(), "2");
        assert_eq!(FieldValue::String("A".into()).to_string(), "A");
    }

    #[test]
    fn dataset_indexes_columns_and_unique_values() {
        let records = vec![
            WineRecord::from_iter([("Class", FieldValue::Integer(1))]),
            WineRecord::from_iter([
                ("Class", FieldValue::Integer(2)),
                ("Hue", FieldValue::Float(1.04)),
            ]),
            WineRecord::from_iter([("Class", FieldValue::Integer(1))]),
        ];
        let ds = WineDataset::from_records(records);

        assert_eq!(ds.len(), 3);
        assert_eq!(ds.column_names, vec!["Class".to_string(), "Hue".to_string()]);
        assert_eq!(ds.unique_values["Class"].len(), 2);
        assert_eq!(ds.records[1].number("Hue"), Some(1.04));
        assert_eq!(ds.records[0].number("Hue"), None);
    }
}
