// src/utils/error.rs
use thiserror::Error;

// Extraction itself never fails: missing labels or malformed tokens only
// leave fields absent. Errors exist at the edges, where the process talks
// to the filesystem and the PDF decoder.

#[derive(Error, Debug)]
pub enum PdfError {
    #[error("PDF decode failed: {0}")]
    Decode(#[from] pdf_extract::OutputError),
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Spreadsheet error: {0}")]
    Spreadsheet(#[from] rust_xlsxwriter::XlsxError),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}
