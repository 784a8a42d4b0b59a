//! Path-based loading entrypoint.
//!
//! Most callers should use [`load_from_path`], which loads one sheet of a workbook into an
//! in-memory [`crate::types::DataSet`].
//!
//! - If [`LoadOptions::format`] is `None`, the workbook format is inferred from the file
//!   extension.
//! - If a [`super::observability::LoadObserver`] is provided, success/failure/alerts are
//!   reported to it.

use std::error::Error as StdError;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

use crate::error::{SheetError, SheetResult};
use crate::types::DataSet;

use super::excel;
use super::observability::{LoadContext, LoadObserver, LoadSeverity, LoadStats};

/// Supported workbook formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkbookFormat {
    /// Office Open XML workbook (`.xlsx`, `.xlsm`, `.xlam`).
    Xlsx,
    /// Binary workbook (`.xlsb`).
    Xlsb,
    /// Legacy BIFF workbook (`.xls`, `.xla`).
    Xls,
    /// OpenDocument spreadsheet (`.ods`).
    Ods,
}

impl WorkbookFormat {
    /// Parse a workbook format from a file extension (case-insensitive).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "xlsx" | "xlsm" | "xlam" => Some(Self::Xlsx),
            "xlsb" => Some(Self::Xlsb),
            "xls" | "xla" => Some(Self::Xls),
            "ods" => Some(Self::Ods),
            _ => None,
        }
    }

    /// Infer the format of `path` from its extension.
    pub fn from_path(path: &Path) -> SheetResult<Self> {
        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .ok_or_else(|| SheetError::UnsupportedFormat {
                message: format!(
                    "cannot infer format: path has no extension ({})",
                    path.display()
                ),
            })?;

        Self::from_extension(ext).ok_or_else(|| SheetError::UnsupportedFormat {
            message: format!(
                "cannot infer format from extension '{ext}' for path ({})",
                path.display()
            ),
        })
    }
}

/// Which sheet of the workbook to load.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SheetSelection {
    /// The first sheet (default).
    #[default]
    First,
    /// A sheet by name.
    Named(String),
    /// A sheet by zero-based position.
    Index(usize),
}

impl FromStr for SheetSelection {
    type Err = std::convert::Infallible;

    /// A plain number selects by position, anything else by name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.parse::<usize>() {
            Ok(idx) => Self::Index(idx),
            Err(_) => Self::Named(s.to_string()),
        })
    }
}

impl fmt::Display for SheetSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::First => f.write_str("<first>"),
            Self::Named(name) => f.write_str(name),
            Self::Index(idx) => write!(f, "#{idx}"),
        }
    }
}

/// Options controlling loading behavior.
///
/// Use [`Default`] for common cases.
#[derive(Clone)]
pub struct LoadOptions {
    /// If `None`, infer the format from the file extension.
    pub format: Option<WorkbookFormat>,
    /// Sheet to load.
    pub sheet: SheetSelection,
    /// Optional observer for logging/alerts.
    pub observer: Option<Arc<dyn LoadObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: LoadSeverity,
}

impl fmt::Debug for LoadOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadOptions")
            .field("format", &self.format)
            .field("sheet", &self.sheet)
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            format: None,
            sheet: SheetSelection::default(),
            observer: None,
            alert_at_or_above: LoadSeverity::Critical,
        }
    }
}

/// Load one sheet of the workbook at `path`.
///
/// The first non-empty row of the sheet is the header; every following non-empty row becomes
/// one dataset row.
///
/// When an observer is configured, this function reports:
///
/// - `on_success` on success, with row/column counts
/// - `on_failure` on failure, with a computed severity
/// - `on_alert` on failure when the computed severity is >= `options.alert_at_or_above`
///
/// # Examples
///
/// ```no_run
/// use sheet_peek::loading::{load_from_path, LoadOptions, SheetSelection};
///
/// # fn main() -> Result<(), sheet_peek::SheetError> {
/// let opts = LoadOptions {
///     sheet: SheetSelection::Named("Sheet1".to_string()),
///     ..Default::default()
/// };
/// let ds = load_from_path("workbook.xlsx", &opts)?;
/// println!("rows={} columns={}", ds.row_count(), ds.column_count());
/// # Ok(())
/// # }
/// ```
///
/// Observability (log output + alert threshold):
///
/// ```no_run
/// use std::sync::Arc;
///
/// use sheet_peek::loading::{load_from_path, LoadOptions, LoadSeverity, LogObserver};
///
/// let opts = LoadOptions {
///     observer: Some(Arc::new(LogObserver)),
///     alert_at_or_above: LoadSeverity::Critical,
///     ..Default::default()
/// };
///
/// // Missing files are treated as Critical and will trigger `on_alert` at this threshold.
/// let _err = load_from_path("does_not_exist.xlsx", &opts).unwrap_err();
/// ```
pub fn load_from_path(path: impl AsRef<Path>, options: &LoadOptions) -> SheetResult<DataSet> {
    let path = path.as_ref();
    let format = match options.format {
        Some(f) => Ok(f),
        None => WorkbookFormat::from_path(path),
    };

    let ctx = LoadContext {
        path: path.to_path_buf(),
        format: format.as_ref().ok().copied(),
        sheet: options.sheet.clone(),
    };

    let result = format.and_then(|f| excel::load_sheet(path, f, &options.sheet));

    if let Some(obs) = options.observer.as_ref() {
        match &result {
            Ok(ds) => obs.on_success(
                &ctx,
                LoadStats {
                    rows: ds.row_count(),
                    columns: ds.column_count(),
                },
            ),
            Err(e) => {
                let sev = severity_for_error(e);
                obs.on_failure(&ctx, sev, e);
                if sev >= options.alert_at_or_above {
                    obs.on_alert(&ctx, sev, e);
                }
            }
        }
    }

    result
}

fn severity_for_error(e: &SheetError) -> LoadSeverity {
    match e {
        SheetError::Io(_) => LoadSeverity::Critical,
        // Readers often wrap io errors; treat those as Critical too.
        SheetError::Excel(err) if error_chain_contains_io(err) => LoadSeverity::Critical,
        SheetError::Excel(_)
        | SheetError::UnsupportedFormat { .. }
        | SheetError::SheetNotFound { .. }
        | SheetError::EmptySheet { .. }
        | SheetError::ColumnNotFound { .. }
        | SheetError::Json(_) => LoadSeverity::Error,
    }
}

fn error_chain_contains_io(e: &(dyn StdError + 'static)) -> bool {
    let mut cur: Option<&(dyn StdError + 'static)> = Some(e);
    while let Some(err) = cur {
        if err.is::<std::io::Error>() {
            return true;
        }
        cur = err.source();
    }
    false
}

/// Owned description of a load, for callers that want to build it up front (e.g. from CLI
/// arguments) and run it later.
#[derive(Clone, Debug)]
pub struct LoadRequest {
    /// Path to the workbook.
    pub path: PathBuf,
    /// Options controlling loading.
    pub options: LoadOptions,
}

impl LoadRequest {
    /// Execute the request by calling [`load_from_path`].
    pub fn run(&self) -> SheetResult<DataSet> {
        load_from_path(&self.path, &self.options)
    }
}
