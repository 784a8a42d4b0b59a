//! Console rendering of a dataset preview and of a single column.

use std::fmt::Write as _;

use crate::types::{Column, DataSet};

fn width_of(s: &str) -> usize {
    s.chars().count()
}

/// Render `dataset` as a right-aligned text table with a leading row-index column.
///
/// ```rust
/// use sheet_peek::render::render_preview;
/// use sheet_peek::types::{DataSet, Header, Value};
///
/// let ds = DataSet::new(
///     Header::new(vec!["id".to_string(), "name".to_string()]),
///     vec![
///         vec![Value::Int64(1), Value::Utf8("Ada".to_string())],
///         vec![Value::Int64(2), Value::Utf8("Grace".to_string())],
///     ],
/// );
/// assert_eq!(render_preview(&ds), "   id   name\n0   1    Ada\n1   2  Grace\n");
/// ```
pub fn render_preview(dataset: &DataSet) -> String {
    let mut out = String::new();

    if dataset.row_count() == 0 {
        let names: Vec<&str> = dataset.header.names().collect();
        let _ = writeln!(out, "Empty DataSet");
        let _ = writeln!(out, "Columns: [{}]", names.join(", "));
        let _ = writeln!(out, "Index: []");
        return out;
    }

    let cells: Vec<Vec<String>> = dataset
        .rows
        .iter()
        .map(|row| row.iter().map(ToString::to_string).collect())
        .collect();

    let index_width = width_of(&(dataset.row_count() - 1).to_string());
    let widths: Vec<usize> = dataset
        .header
        .names()
        .enumerate()
        .map(|(col, name)| {
            cells
                .iter()
                .map(|row| width_of(&row[col]))
                .chain(std::iter::once(width_of(name)))
                .max()
                .unwrap_or(0)
        })
        .collect();

    out.push_str(&" ".repeat(index_width));
    for (name, &w) in dataset.header.names().zip(&widths) {
        let _ = write!(out, "  {name:>w$}");
    }
    out.push('\n');

    for (idx, row) in cells.iter().enumerate() {
        let _ = write!(out, "{idx:<index_width$}");
        for (cell, &w) in row.iter().zip(&widths) {
            let _ = write!(out, "  {cell:>w$}");
        }
        out.push('\n');
    }

    out
}

/// Render one column as `index value` lines followed by a summary line.
pub fn render_column(column: &Column<'_>) -> String {
    let mut out = String::new();
    let dtype = column.dtype();

    if column.is_empty() {
        let _ = writeln!(out, "Column([], Name: {}, dtype: {dtype})", column.name());
        return out;
    }

    let values: Vec<String> = column.values().map(ToString::to_string).collect();
    let index_width = width_of(&(values.len() - 1).to_string());
    let value_width = values.iter().map(|v| width_of(v)).max().unwrap_or(0);

    for (idx, v) in values.iter().enumerate() {
        let _ = writeln!(out, "{idx:<index_width$}    {v:>value_width$}");
    }
    let _ = writeln!(
        out,
        "Name: {}, Length: {}, dtype: {dtype}",
        column.name(),
        column.len()
    );
    out
}
