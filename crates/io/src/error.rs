use thiserror::Error;

/// Input-side failures. All of these abort the invocation before the
/// pipeline runs; nothing here is retried.
#[derive(Debug, Error)]
pub enum ImportError {
    /// The byte stream is not a valid spreadsheet container.
    #[error("not a valid spreadsheet file: {0}")]
    MalformedWorkbook(String),

    /// The container opened but one of its sheets could not be read.
    #[error("failed to read sheet '{sheet}': {message}")]
    SheetRead { sheet: String, message: String },

    /// The byte stream is not valid for the declared text encoding.
    #[error("text decoding failed: {0}")]
    Decoding(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Output-side failures, surfaced to the caller as a message.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to build workbook: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
