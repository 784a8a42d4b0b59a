//! Workbook loading built on `calamine`.

use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use calamine::{Data, DataType as _, Ods, Range, Reader, Sheets, Xls, Xlsb, Xlsx};

use crate::error::{SheetError, SheetResult};
use crate::types::{DataSet, Header, Value};

use super::unified::{SheetSelection, WorkbookFormat};

/// Load one sheet of a workbook into an in-memory `DataSet`.
///
/// Behavior:
/// - Picks the sheet described by `sheet` (the first sheet for [`SheetSelection::First`])
/// - Detects the first non-empty row as the header row
/// - Reads the remaining non-empty rows and converts cells into `Value`s
pub fn load_sheet(
    path: impl AsRef<Path>,
    format: WorkbookFormat,
    sheet: &SheetSelection,
) -> SheetResult<DataSet> {
    let mut workbook = open_workbook(path.as_ref(), format)?;
    let (name, range) = read_sheet_range(&mut workbook, sheet)?;
    dataset_from_range(&name, &range)
}

fn open_workbook(path: &Path, format: WorkbookFormat) -> SheetResult<Sheets<BufReader<File>>> {
    // Opening the file ourselves keeps "file not found" a plain io error.
    let reader = BufReader::new(File::open(path)?);
    let sheets = match format {
        WorkbookFormat::Xlsx => Sheets::Xlsx(Xlsx::new(reader).map_err(calamine::Error::Xlsx)?),
        WorkbookFormat::Xlsb => Sheets::Xlsb(Xlsb::new(reader).map_err(calamine::Error::Xlsb)?),
        WorkbookFormat::Xls => Sheets::Xls(Xls::new(reader).map_err(calamine::Error::Xls)?),
        WorkbookFormat::Ods => Sheets::Ods(Ods::new(reader).map_err(calamine::Error::Ods)?),
    };
    Ok(sheets)
}

fn read_sheet_range(
    workbook: &mut Sheets<BufReader<File>>,
    sheet: &SheetSelection,
) -> SheetResult<(String, Range<Data>)> {
    let names = workbook.sheet_names().to_vec();
    let name = match sheet {
        SheetSelection::First => names.first().cloned().ok_or_else(|| SheetError::SheetNotFound {
            message: "workbook has no sheets".to_string(),
        })?,
        SheetSelection::Index(idx) => {
            names
                .get(*idx)
                .cloned()
                .ok_or_else(|| SheetError::SheetNotFound {
                    message: format!("no sheet at index {idx}. sheets={names:?}"),
                })?
        }
        SheetSelection::Named(wanted) => {
            if !names.iter().any(|n| n == wanted) {
                return Err(SheetError::SheetNotFound {
                    message: format!("no sheet named '{wanted}'. sheets={names:?}"),
                });
            }
            wanted.clone()
        }
    };

    let range = workbook.worksheet_range(&name)?;
    Ok((name, range))
}

/// Build a `DataSet` from an already-read sheet range.
///
/// `sheet` is only used for error messages.
pub fn dataset_from_range(sheet: &str, range: &Range<Data>) -> SheetResult<DataSet> {
    let mut rows_iter = range
        .rows()
        .enumerate()
        .skip_while(|(_, row)| row.iter().all(|c| matches!(c, Data::Empty)));

    let (header_idx0, header_cells) = rows_iter.next().ok_or_else(|| SheetError::EmptySheet {
        sheet: sheet.to_string(),
    })?;

    // calamine trims the range to the first used cell; columns left of it are kept as empty
    // columns so positions match the sheet.
    let col_offset = range.start().map(|(_, col)| col as usize).unwrap_or(0);
    let header_cells: Vec<Data> = std::iter::repeat_n(Data::Empty, col_offset)
        .chain(header_cells.iter().cloned())
        .collect();
    let header = build_header(&header_cells);
    log::debug!(
        "sheet '{sheet}': header at row {} with {} columns",
        header_idx0 + 1,
        header.len()
    );

    let mut rows: Vec<Vec<Value>> = Vec::new();
    for (idx0, row) in rows_iter {
        if row.iter().all(|c| matches!(c, Data::Empty)) {
            // Report 1-based row number (Excel-like).
            log::debug!("sheet '{sheet}': skipping empty row {}", idx0 + 1);
            continue;
        }
        let mut values: Vec<Value> = Vec::with_capacity(col_offset + row.len());
        values.resize(col_offset, Value::Null);
        values.extend(row.iter().map(convert_cell));
        rows.push(values);
    }

    normalize_integer_columns(header.len(), &mut rows);
    Ok(DataSet::new(header, rows))
}

/// Turn header cells into unique column names.
///
/// Blank cells become `Unnamed: <position>`; repeated names get a `.1`, `.2`, ... suffix.
fn build_header(cells: &[Data]) -> Header {
    let mut seen: HashSet<String> = HashSet::with_capacity(cells.len());
    let mut names: Vec<String> = Vec::with_capacity(cells.len());

    for (pos, cell) in cells.iter().enumerate() {
        let raw = cell_to_header_string(cell);
        let base = match raw.trim() {
            "" => format!("Unnamed: {pos}"),
            trimmed => trimmed.to_string(),
        };

        let mut name = base.clone();
        let mut dup = 0usize;
        while seen.contains(&name) {
            dup += 1;
            name = format!("{base}.{dup}");
        }
        if dup > 0 {
            log::debug!("duplicate column '{base}' renamed to '{name}'");
        }
        seen.insert(name.clone());
        names.push(name);
    }

    Header::new(names)
}

fn cell_to_header_string(c: &Data) -> String {
    match c {
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        // f64 display already drops a trailing `.0`
        Data::Float(f) => f.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(_) | Data::DateTimeIso(_) => match c.as_datetime() {
            Some(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
            None => c.to_string(),
        },
        Data::DurationIso(s) => s.clone(),
        Data::Error(_) | Data::Empty => String::new(),
    }
}

fn convert_cell(c: &Data) -> Value {
    match c {
        Data::Empty => Value::Null,
        Data::String(s) => {
            if s.is_empty() {
                Value::Null
            } else {
                Value::Utf8(s.clone())
            }
        }
        Data::Int(i) => Value::Int64(*i),
        Data::Float(f) => Value::Float64(*f),
        Data::Bool(b) => Value::Bool(*b),
        Data::DateTime(dt) if dt.is_duration() => Value::Utf8(c.to_string()),
        Data::DateTime(_) | Data::DateTimeIso(_) => match c.as_datetime() {
            Some(dt) => Value::DateTime(dt),
            None => Value::Utf8(c.to_string()),
        },
        Data::DurationIso(s) => Value::Utf8(s.clone()),
        Data::Error(e) => {
            log::debug!("cell error {e:?} read as null");
            Value::Null
        }
    }
}

/// Numbers in a workbook are stored as floats; a column holding only whole numbers and no
/// missing values is converted to `Int64`.
fn normalize_integer_columns(width: usize, rows: &mut [Vec<Value>]) {
    if rows.is_empty() {
        return;
    }

    for col in 0..width {
        let all_whole = rows.iter().all(|row| match row.get(col) {
            Some(Value::Int64(_)) => true,
            Some(Value::Float64(f)) => {
                f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64
            }
            _ => false,
        });
        if !all_whole {
            continue;
        }
        for row in rows.iter_mut() {
            if let Some(Value::Float64(f)) = row.get(col) {
                row[col] = Value::Int64(*f as i64);
            }
        }
    }
}
