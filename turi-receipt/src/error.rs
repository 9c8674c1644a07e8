//! Error types for receipt rendering

use thiserror::Error;

/// Render error types
#[derive(Debug, Error)]
pub enum RenderError {
    /// A line item cannot be laid out
    #[error("Invalid item #{index}: {reason}")]
    InvalidItem { index: usize, reason: String },

    /// The ticket itself cannot be laid out
    #[error("Invalid ticket: {0}")]
    InvalidTicket(String),

    /// The template leaves no room for the body
    #[error("Layout error: {0}")]
    Layout(String),

    /// IO error while writing the artifact
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The PDF backend rejected the document
    #[error("PDF error: {0}")]
    Pdf(String),
}

/// Result type for render operations
pub type RenderResult<T> = Result<T, RenderError>;
