//! `sheet-peek` loads one sheet of an Excel workbook into an in-memory [`types::DataSet`], lets
//! you preview it, pick a column, and convert it into plain rows or records.
//!
//! The primary entrypoint is [`loading::load_from_path`], which infers the workbook format from
//! the file extension (or you can force one via [`loading::LoadOptions`]).
//!
//! **Workbook formats:** `.xlsx`, `.xlsm`, `.xlam`, `.xlsb`, `.xls`, `.xla`, `.ods`.
//!
//! **Loading rules:**
//!
//! - the first sheet is used unless [`loading::SheetSelection`] says otherwise
//! - the first non-empty row is the header; blank header cells are named `Unnamed: <pos>` and
//!   repeated names get `.1`, `.2`, ... suffixes
//! - fully empty rows are skipped; empty and error cells become [`types::Value::Null`]
//! - a column of whole numbers without gaps is read as [`types::Value::Int64`]
//!
//! ## Example
//!
//! ```no_run
//! use sheet_peek::convert::{to_records, to_rows};
//! use sheet_peek::loading::{load_from_path, LoadOptions};
//! use sheet_peek::render::{render_column, render_preview};
//!
//! # fn main() -> Result<(), sheet_peek::SheetError> {
//! let ds = load_from_path("people.xlsx", &LoadOptions::default())?;
//!
//! print!("{}", render_preview(&ds.head(5)));
//! print!("{}", render_column(&ds.column("name")?));
//!
//! let rows = to_rows(&ds);
//! let records = to_records(&ds);
//! assert_eq!(rows.len(), records.len());
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`loading`]: path entrypoint, `calamine` sheet reader and load observers
//! - [`types`]: dataset data model
//! - [`convert`]: list-of-lists and list-of-mappings conversions
//! - [`render`]: console preview rendering
//! - [`error`]: error type shared across the crate

pub mod convert;
pub mod error;
pub mod loading;
pub mod render;
pub mod types;

pub use error::{SheetError, SheetResult};
