//! Error handling module for the back-office client.
//!
//! Failures come in two flavours: the request itself threw (network, decode)
//! or the backend answered with an envelope that signalled failure. Both end up
//! as an `AppError`; screens decide whether the user gets to see it.

/// Error codes as constants to avoid stringly-typed errors.
pub mod codes {
    pub const UNAUTHORIZED: &str = "UNAUTHORIZED";
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
    pub const API_ERROR: &str = "API_ERROR";
    pub const NETWORK_ERROR: &str = "NETWORK_ERROR";
    pub const DECODE_ERROR: &str = "DECODE_ERROR";
    pub const STORAGE_ERROR: &str = "STORAGE_ERROR";
    pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";
    pub const BAD_REQUEST: &str = "BAD_REQUEST";
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    /// Backend rejected the bearer token (HTTP 401)
    Unauthorized(String),
    /// Resource not found (HTTP 404)
    NotFound(String),
    /// Local required-field check failed; no request was sent
    Validation(String),
    /// Envelope came back with `status: false`
    Api(String),
    /// Request could not be sent or the connection failed
    Network(String),
    /// Response body was not the expected shape
    Decode(String),
    /// Local persisted state error
    Storage(String),
    /// Internal error
    Internal(String),
    /// Caller passed something unusable
    BadRequest(String),
}

impl AppError {
    /// Get the error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Unauthorized(_) => codes::UNAUTHORIZED,
            AppError::NotFound(_) => codes::NOT_FOUND,
            AppError::Validation(_) => codes::VALIDATION_ERROR,
            AppError::Api(_) => codes::API_ERROR,
            AppError::Network(_) => codes::NETWORK_ERROR,
            AppError::Decode(_) => codes::DECODE_ERROR,
            AppError::Storage(_) => codes::STORAGE_ERROR,
            AppError::Internal(_) => codes::INTERNAL_ERROR,
            AppError::BadRequest(_) => codes::BAD_REQUEST,
        }
    }

    /// Get the error message.
    pub fn message(&self) -> String {
        match self {
            AppError::Unauthorized(msg) => msg.clone(),
            AppError::NotFound(msg) => msg.clone(),
            AppError::Validation(msg) => msg.clone(),
            AppError::Api(msg) => msg.clone(),
            AppError::Network(msg) => msg.clone(),
            AppError::Decode(msg) => msg.clone(),
            AppError::Storage(msg) => msg.clone(),
            AppError::Internal(msg) => msg.clone(),
            AppError::BadRequest(msg) => msg.clone(),
        }
    }

    /// True for errors raised before any request went out.
    pub fn is_validation(&self) -> bool {
        matches!(self, AppError::Validation(_))
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error_code(), self.message())
    }
}

impl std::error::Error for AppError {}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        tracing::error!("Storage error: {:?}", err);
        AppError::Storage(format!("Storage error: {}", err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        tracing::error!("JSON error: {:?}", err);
        AppError::Decode(format!("JSON error: {}", err))
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        tracing::error!("Request error: {:?}", err);
        if err.is_decode() {
            AppError::Decode(format!("Failed to decode response: {}", err))
        } else {
            AppError::Network(format!("Request failed: {}", err))
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::BadRequest(format!("I/O error: {}", err))
    }
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, AppError>;
