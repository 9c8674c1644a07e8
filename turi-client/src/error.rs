//! Client error types

use thiserror::Error;

use crate::dashboard::DashboardQuery;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// No response reached the client (connect, timeout, body read)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Non-2xx response
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// 401 from any endpoint; the stored credential has been cleared
    #[error("Session expired")]
    SessionExpired,

    /// 2xx response whose body does not match the expected shape
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Credential storage failure
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ClientError {
    pub fn is_session_expired(&self) -> bool {
        matches!(self, Self::SessionExpired)
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

/// Dashboard aggregation failed as a whole
///
/// Only one summary is shown to the user; the failing sub-query and its
/// cause are kept for diagnostics.
#[derive(Debug, Error)]
#[error("Failed to load dashboard")]
pub struct AggregationError {
    /// First sub-query that failed
    pub query: DashboardQuery,
    #[source]
    pub source: ClientError,
}

impl AggregationError {
    pub fn is_session_expired(&self) -> bool {
        self.source.is_session_expired()
    }
}

/// Ticket history query failed
#[derive(Debug, Error)]
#[error("Failed to load ticket history")]
pub struct QueryError {
    #[source]
    pub source: ClientError,
}

impl QueryError {
    pub fn is_session_expired(&self) -> bool {
        self.source.is_session_expired()
    }
}

impl From<ClientError> for QueryError {
    fn from(source: ClientError) -> Self {
        Self { source }
    }
}
