//! Plain-collection views of a [`DataSet`].
//!
//! - [`to_rows`]: list-of-lists, one inner list per row in column order
//! - [`to_records`]: list-of-mappings, one [`Record`] per row keyed by column name
//!
//! Both results own their values and serialize with `serde` (records as JSON objects whose keys
//! keep header order).
//!
//! ```rust
//! use sheet_peek::convert::{to_records, to_rows};
//! use sheet_peek::types::{DataSet, Header, Value};
//!
//! let ds = DataSet::new(
//!     Header::new(vec!["id".to_string(), "name".to_string()]),
//!     vec![vec![Value::Int64(1), Value::Utf8("Ada".to_string())]],
//! );
//!
//! let rows = to_rows(&ds);
//! assert_eq!(rows[0][1], Value::Utf8("Ada".to_string()));
//!
//! let records = to_records(&ds);
//! assert_eq!(records[0].get("id"), Some(&Value::Int64(1)));
//! assert_eq!(
//!     serde_json::to_string(&records).unwrap(),
//!     r#"[{"id":1,"name":"Ada"}]"#
//! );
//! ```

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::error::SheetResult;
use crate::types::{DataSet, Value};

/// One row as an ordered column-name → value mapping.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    fields: Vec<(String, Value)>,
}

impl Record {
    /// Value for `column`, if the column exists.
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, v)| v)
    }

    /// Column names in header order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    /// `(column, value)` pairs in header order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(name, v)| (name.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Returns every row as a list of values, in row order and column order.
pub fn to_rows(dataset: &DataSet) -> Vec<Vec<Value>> {
    dataset.rows.clone()
}

/// Returns every row as a [`Record`] holding all header columns.
pub fn to_records(dataset: &DataSet) -> Vec<Record> {
    dataset
        .rows
        .iter()
        .map(|row| Record {
            fields: dataset
                .header
                .names()
                .map(str::to_string)
                .zip(row.iter().cloned())
                .collect(),
        })
        .collect()
}

/// Pretty-printed JSON of rows produced by [`to_rows`].
pub fn rows_to_json(rows: &[Vec<Value>]) -> SheetResult<String> {
    Ok(serde_json::to_string_pretty(rows)?)
}

/// Pretty-printed JSON of records produced by [`to_records`].
pub fn records_to_json(records: &[Record]) -> SheetResult<String> {
    Ok(serde_json::to_string_pretty(records)?)
}
