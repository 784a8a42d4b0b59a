//! Workbook loading.
//!
//! Most callers should use [`load_from_path`] (from [`unified`]) which:
//!
//! - infers the workbook format from the file extension (or you can override via [`LoadOptions`])
//! - loads one sheet into an in-memory [`crate::types::DataSet`]
//! - optionally reports success/failure/alerts to a [`LoadObserver`]
//!
//! [`excel`] holds the `calamine`-backed sheet reader, including header naming rules.

pub mod excel;
pub mod observability;
pub mod unified;

pub use observability::{
    CompositeObserver, LoadContext, LoadObserver, LoadSeverity, LoadStats, LogObserver, StdErrObserver,
    WriteObserver,
};
pub use unified::{load_from_path, LoadOptions, LoadRequest, SheetSelection, WorkbookFormat};
