use thiserror::Error;

/// Convenience result type for loading and dataset operations.
pub type SheetResult<T> = Result<T, SheetError>;

/// Error type returned by loading, column access and serialization.
#[derive(Debug, Error)]
pub enum SheetError {
    /// Underlying I/O error (e.g. file not found, permission denied).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The workbook could not be opened or a sheet could not be read.
    #[error("excel error: {0}")]
    Excel(#[from] calamine::Error),

    /// The path does not carry a recognized workbook extension.
    #[error("unsupported format: {message}")]
    UnsupportedFormat { message: String },

    /// The requested sheet does not exist (or the workbook has no sheets at all).
    #[error("sheet not found: {message}")]
    SheetNotFound { message: String },

    /// The selected sheet has no non-empty row to take the header from.
    #[error("sheet '{sheet}' is empty (no header row found)")]
    EmptySheet { sheet: String },

    /// A column name was requested that is not part of the header.
    #[error("column not found: '{column}'. columns={available:?}")]
    ColumnNotFound {
        column: String,
        available: Vec<String>,
    },

    /// JSON serialization of rows or records failed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
