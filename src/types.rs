//! Core data model types.
//!
//! Loading produces an in-memory [`DataSet`]: an ordered [`Header`] of unique column names and
//! row-major storage of loosely-typed [`Value`]s.

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Serialize, Serializer};

use crate::error::{SheetError, SheetResult};

/// Number of rows shown by a preview when no count is given.
pub const DEFAULT_PREVIEW_ROWS: usize = 5;

/// A single loosely-typed cell value in a [`DataSet`].
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Missing/empty value.
    Null,
    /// 64-bit signed integer.
    Int64(i64),
    /// 64-bit float.
    Float64(f64),
    /// Boolean.
    Bool(bool),
    /// UTF-8 string.
    Utf8(String),
    /// Date and/or time of day.
    DateTime(NaiveDateTime),
}

impl Value {
    /// Returns `true` for [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// The logical type of this value, or `None` for [`Value::Null`].
    pub fn data_type(&self) -> Option<DataType> {
        match self {
            Value::Null => None,
            Value::Int64(_) => Some(DataType::Int64),
            Value::Float64(_) => Some(DataType::Float64),
            Value::Bool(_) => Some(DataType::Bool),
            Value::Utf8(_) => Some(DataType::Utf8),
            Value::DateTime(_) => Some(DataType::DateTime),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("NaN"),
            Value::Int64(v) => write!(f, "{v}"),
            Value::Float64(v) => {
                if v.is_finite() && v.fract() == 0.0 {
                    write!(f, "{v:.1}")
                } else {
                    write!(f, "{v}")
                }
            }
            Value::Bool(v) => f.write_str(if *v { "True" } else { "False" }),
            Value::Utf8(s) => f.write_str(s),
            Value::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S")),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_none(),
            Value::Int64(v) => serializer.serialize_i64(*v),
            Value::Float64(v) => serializer.serialize_f64(*v),
            Value::Bool(v) => serializer.serialize_bool(*v),
            Value::Utf8(s) => serializer.serialize_str(s),
            Value::DateTime(dt) => serializer.collect_str(&dt.format("%Y-%m-%dT%H:%M:%S")),
        }
    }
}

/// Logical type of a column, inferred from its values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    /// 64-bit signed integer.
    Int64,
    /// 64-bit floating point number (also used for all-empty columns).
    Float64,
    /// Boolean.
    Bool,
    /// UTF-8 string.
    Utf8,
    /// Date and/or time of day.
    DateTime,
    /// Values of more than one type.
    Object,
}

impl DataType {
    /// Short lowercase name, as printed in column summaries.
    pub fn name(&self) -> &'static str {
        match self {
            DataType::Int64 => "int64",
            DataType::Float64 => "float64",
            DataType::Bool => "bool",
            DataType::Utf8 => "str",
            DataType::DateTime => "datetime",
            DataType::Object => "object",
        }
    }

    /// Infer a column type from its values.
    ///
    /// Nulls are ignored; an integer/float mix is `Float64`; any other mix is `Object`.
    pub fn infer<'a>(values: impl IntoIterator<Item = &'a Value>) -> DataType {
        let mut inferred: Option<DataType> = None;
        for dt in values.into_iter().filter_map(Value::data_type) {
            inferred = Some(match (inferred, dt) {
                (None, dt) => dt,
                (Some(cur), dt) if cur == dt => cur,
                (Some(DataType::Int64), DataType::Float64) | (Some(DataType::Float64), DataType::Int64) => {
                    DataType::Float64
                }
                _ => return DataType::Object,
            });
        }
        // A column with only missing values holds missing numbers.
        inferred.unwrap_or(DataType::Float64)
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Ordered list of unique column names, taken from the header row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    names: Vec<String>,
}

impl Header {
    /// Create a header from column names.
    ///
    /// Names are used as given; [`crate::loading::excel`] takes care of naming blank cells and
    /// disambiguating duplicates when reading a sheet.
    pub fn new(names: Vec<String>) -> Self {
        Self { names }
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns `true` if there are no columns.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Iterate column names in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Returns the index of a column by name, if present.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    /// Column names as a slice.
    pub fn as_slice(&self) -> &[String] {
        &self.names
    }
}

/// In-memory tabular dataset.
///
/// Rows are stored as `Vec<Vec<Value>>` in the same order as the [`Header`] names, and every
/// row holds exactly one value per column.
#[derive(Debug, Clone, PartialEq)]
pub struct DataSet {
    /// Column names.
    pub header: Header,
    /// Row-major value storage.
    pub rows: Vec<Vec<Value>>,
}

impl DataSet {
    /// Create a dataset from a header and rows.
    ///
    /// Rows shorter than the header are padded with [`Value::Null`].
    ///
    /// # Panics
    ///
    /// Panics if a row has more values than the header has columns.
    pub fn new(header: Header, rows: Vec<Vec<Value>>) -> Self {
        let width = header.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                assert!(
                    row.len() <= width,
                    "row length {} exceeds header length {}",
                    row.len(),
                    width
                );
                row.resize(width, Value::Null);
                row
            })
            .collect();
        Self { header, rows }
    }

    /// Number of rows in the dataset.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns in the dataset.
    pub fn column_count(&self) -> usize {
        self.header.len()
    }

    /// Returns a new dataset with the first `n` rows (or all rows, if there are fewer).
    pub fn head(&self, n: usize) -> DataSet {
        Self {
            header: self.header.clone(),
            rows: self.rows.iter().take(n).cloned().collect(),
        }
    }

    /// Borrow a single column by name.
    ///
    /// Fails with [`SheetError::ColumnNotFound`] if `name` is not part of the header.
    pub fn column(&self, name: &str) -> SheetResult<Column<'_>> {
        let index = self
            .header
            .index_of(name)
            .ok_or_else(|| SheetError::ColumnNotFound {
                column: name.to_string(),
                available: self.header.as_slice().to_vec(),
            })?;
        Ok(Column {
            dataset: self,
            index,
        })
    }

    /// Iterate over all columns in header order.
    pub fn columns(&self) -> impl Iterator<Item = Column<'_>> {
        (0..self.header.len()).map(move |index| Column {
            dataset: self,
            index,
        })
    }

    /// Inferred type of every column, in header order.
    pub fn dtypes(&self) -> Vec<(String, DataType)> {
        self.columns()
            .map(|c| (c.name().to_string(), c.dtype()))
            .collect()
    }
}

/// A borrowed view of one column of a [`DataSet`].
#[derive(Debug, Clone, Copy)]
pub struct Column<'a> {
    dataset: &'a DataSet,
    index: usize,
}

impl<'a> Column<'a> {
    /// Column name.
    pub fn name(&self) -> &'a str {
        let dataset = self.dataset;
        &dataset.header.as_slice()[self.index]
    }

    /// Position of the column in the header.
    pub fn position(&self) -> usize {
        self.index
    }

    /// Number of values (equals the dataset row count).
    pub fn len(&self) -> usize {
        self.dataset.row_count()
    }

    /// Returns `true` if the dataset has no rows.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate values top to bottom.
    pub fn values(&self) -> impl Iterator<Item = &'a Value> + use<'a> {
        let dataset = self.dataset;
        let index = self.index;
        dataset.rows.iter().map(move |row| &row[index])
    }

    /// Inferred column type.
    pub fn dtype(&self) -> DataType {
        DataType::infer(self.values())
    }
}
