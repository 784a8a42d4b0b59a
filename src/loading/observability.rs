//! Load outcome reporting.
//!
//! [`super::load_from_path`] reports to an optional [`LoadObserver`]: `on_success` with
//! [`LoadStats`], `on_failure` with a [`LoadSeverity`], and `on_alert` once the severity reaches
//! the configured threshold.

use std::fmt;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use crate::error::SheetError;

use super::unified::{SheetSelection, WorkbookFormat};

/// Severity classification used for observer callbacks and alerting thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LoadSeverity {
    /// Error-level event (load failed).
    Error,
    /// Critical error (typically I/O failures).
    Critical,
}

/// Context about a load attempt.
#[derive(Debug, Clone)]
pub struct LoadContext {
    /// The input path.
    pub path: PathBuf,
    /// Workbook format, if it could be determined.
    pub format: Option<WorkbookFormat>,
    /// Requested sheet.
    pub sheet: SheetSelection,
}

/// Stats reported on a successful load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadStats {
    /// Number of data rows.
    pub rows: usize,
    /// Number of header columns.
    pub columns: usize,
}

/// Observer interface for load outcomes.
pub trait LoadObserver: Send + Sync {
    /// Called when loading succeeds.
    fn on_success(&self, _ctx: &LoadContext, _stats: LoadStats) {}

    /// Called when loading fails.
    fn on_failure(&self, _ctx: &LoadContext, _severity: LoadSeverity, _error: &SheetError) {}

    /// Called when a failure meets the alert threshold.
    ///
    /// Default behavior forwards to [`Self::on_failure`].
    fn on_alert(&self, ctx: &LoadContext, severity: LoadSeverity, error: &SheetError) {
        self.on_failure(ctx, severity, error)
    }
}

/// An observer that fans out callbacks to a list of observers.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn LoadObserver>>,
}

impl CompositeObserver {
    /// Create a new composite observer from a list of observers.
    pub fn new(observers: Vec<Arc<dyn LoadObserver>>) -> Self {
        Self { observers }
    }
}

impl fmt::Debug for CompositeObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeObserver")
            .field("observers_len", &self.observers.len())
            .finish()
    }
}

impl LoadObserver for CompositeObserver {
    fn on_success(&self, ctx: &LoadContext, stats: LoadStats) {
        for o in &self.observers {
            o.on_success(ctx, stats);
        }
    }

    fn on_failure(&self, ctx: &LoadContext, severity: LoadSeverity, error: &SheetError) {
        for o in &self.observers {
            o.on_failure(ctx, severity, error);
        }
    }

    fn on_alert(&self, ctx: &LoadContext, severity: LoadSeverity, error: &SheetError) {
        for o in &self.observers {
            o.on_alert(ctx, severity, error);
        }
    }
}

/// Forwards load events to the `log` facade.
///
/// Successes are logged at `info`, failures at `warn`, alerts at `error`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl LoadObserver for LogObserver {
    fn on_success(&self, ctx: &LoadContext, stats: LoadStats) {
        log::info!(
            "loaded format={:?} sheet={} path={} rows={} columns={}",
            ctx.format,
            ctx.sheet,
            ctx.path.display(),
            stats.rows,
            stats.columns
        );
    }

    fn on_failure(&self, ctx: &LoadContext, severity: LoadSeverity, error: &SheetError) {
        log::warn!(
            "load failed severity={:?} format={:?} sheet={} path={} err={}",
            severity,
            ctx.format,
            ctx.sheet,
            ctx.path.display(),
            error
        );
    }

    fn on_alert(&self, ctx: &LoadContext, severity: LoadSeverity, error: &SheetError) {
        log::error!(
            "ALERT load failed severity={:?} path={} err={}",
            severity,
            ctx.path.display(),
            error
        );
    }
}

/// Writes one line per load event to any `io::Write` sink.
///
/// Write failures are ignored.
#[derive(Debug)]
pub struct WriteObserver<W> {
    out: Mutex<W>,
}

/// Writes load events straight to stderr, independent of any logger setup.
pub type StdErrObserver = WriteObserver<io::Stderr>;

impl<W: Write + Send> WriteObserver<W> {
    /// Create an observer writing to `out`.
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    /// Consume the observer and return the underlying writer.
    pub fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write_line(&self, line: fmt::Arguments<'_>) {
        let mut out = self.out.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let _ = writeln!(out, "{line}");
    }
}

impl Default for WriteObserver<io::Stderr> {
    fn default() -> Self {
        Self::new(io::stderr())
    }
}

impl<W: Write + Send> LoadObserver for WriteObserver<W> {
    fn on_success(&self, ctx: &LoadContext, stats: LoadStats) {
        self.write_line(format_args!(
            "[load][ok] sheet={} path={} rows={} columns={}",
            ctx.sheet,
            ctx.path.display(),
            stats.rows,
            stats.columns
        ));
    }

    fn on_failure(&self, ctx: &LoadContext, severity: LoadSeverity, error: &SheetError) {
        self.write_line(format_args!(
            "[load][{:?}] sheet={} path={} err={}",
            severity,
            ctx.sheet,
            ctx.path.display(),
            error
        ));
    }

    fn on_alert(&self, ctx: &LoadContext, severity: LoadSeverity, error: &SheetError) {
        self.write_line(format_args!(
            "[ALERT][load][{:?}] sheet={} path={} err={}",
            severity,
            ctx.sheet,
            ctx.path.display(),
            error
        ));
    }
}
