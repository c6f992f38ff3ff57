//! Error types for the document library

use thiserror::Error;

/// Document error types
#[derive(Debug, Error)]
pub enum PdfError {
    /// Font could not be registered with the document
    #[error("Font error: {0}")]
    Font(String),

    /// Serializing the PDF failed
    #[error("Write failed: {0}")]
    Write(String),

    /// IO error while flushing output
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for document operations
pub type PdfResult<T> = Result<T, PdfError>;
