//! # API Error Type
//!
//! Unified error type for application commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Llano Inventory                        │
//! │                                                                         │
//! │  Command Function: Result<T, ApiError>                                 │
//! │         │                                                               │
//! │         ├── IoError (file unreadable)      ──► IO_ERROR                │
//! │         ├── CoreError::Format              ──► FORMAT_ERROR            │
//! │         ├── CoreError::EmptyCatalog        ──► EMPTY_CATALOG           │
//! │         ├── CoreError::UnknownProduct      ──► NOT_FOUND               │
//! │         ├── CoreError::InsufficientStock   ──► INSUFFICIENT_STOCK      │
//! │         ├── CoreError::Validation          ──► VALIDATION_ERROR        │
//! │         └── ConfigError                    ──► CONFIG_ERROR            │
//! │                                                                         │
//! │  Caller receives { "code": "NOT_FOUND", "message": "..." }             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use llano_core::CoreError;
use llano_io::IoError;
use serde::Serialize;

use crate::state::ConfigError;

/// API error returned from commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "INSUFFICIENT_STOCK",
///   "message": "Insufficient stock for A1: available 5, requested 8"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Unknown product id
    NotFound,

    /// Input validation failed (duplicate id, quantity <= 0, blank field)
    ValidationError,

    /// Tabular input unusable (missing or ambiguous column)
    FormatError,

    /// Sale blocked by the stock-floor policy
    InsufficientStock,

    /// Bulk import with nothing to reconcile against
    EmptyCatalog,

    /// File could not be read or written
    IoError,

    /// Configuration could not be loaded
    ConfigError,

    /// Internal error
    Internal,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(
            ErrorCode::NotFound,
            format!("{} not found: {}", resource, id),
        )
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::UnknownProduct(id) => ApiError::not_found("Product", &id),
            CoreError::InsufficientStock { .. } => {
                ApiError::new(ErrorCode::InsufficientStock, err.to_string())
            }
            CoreError::EmptyCatalog => ApiError::new(ErrorCode::EmptyCatalog, err.to_string()),
            CoreError::Validation(e) => ApiError::validation(e.to_string()),
            CoreError::Format(e) => ApiError::new(ErrorCode::FormatError, e.to_string()),
        }
    }
}

/// Converts file errors to API errors.
impl From<IoError> for ApiError {
    fn from(err: IoError) -> Self {
        match err {
            IoError::CsvParse { .. } | IoError::EmptyFile { .. } => {
                ApiError::new(ErrorCode::FormatError, err.to_string())
            }
            _ => {
                tracing::error!("File operation failed: {}", err);
                ApiError::new(ErrorCode::IoError, err.to_string())
            }
        }
    }
}

impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        ApiError::new(ErrorCode::ConfigError, err.to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;
    use llano_core::{FormatError, ValidationError};

    #[test]
    fn test_core_error_mapping() {
        let err: ApiError = CoreError::unknown_product("B2").into();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Product not found: B2");

        let err: ApiError = CoreError::InsufficientStock {
            id: "A1".to_string(),
            available: 5,
            requested: 8,
        }
        .into();
        assert_eq!(err.code, ErrorCode::InsufficientStock);

        let err: ApiError = CoreError::from(ValidationError::duplicate_id("A1")).into();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let err: ApiError =
            CoreError::from(FormatError::MissingColumn("ID".to_string())).into();
        assert_eq!(err.code, ErrorCode::FormatError);
    }

    #[test]
    fn test_serializes_screaming_code() {
        let json = serde_json::to_value(ApiError::new(ErrorCode::EmptyCatalog, "x")).unwrap();
        assert_eq!(json["code"], "EMPTY_CATALOG");
        assert_eq!(json["message"], "x");
    }
}
