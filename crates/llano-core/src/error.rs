//! # Error Types
//!
//! Domain-specific error types for llano-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  llano-core errors (this file)                                         │
//! │  ├── CoreError        - Every engine failure, grouped by ErrorKind     │
//! │  ├── ValidationError  - Bad manual input (duplicate id, qty <= 0)      │
//! │  └── FormatError      - Unusable tabular input (missing column)        │
//! │                                                                         │
//! │  llano-io errors (separate crate)                                      │
//! │  └── IoError          - File / CSV failures                            │
//! │                                                                         │
//! │  App errors                                                            │
//! │  └── ApiError         - What the UI layer sees (serialized)            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Propagation
//! ```text
//! Format / EmptyCatalog  → abort the whole batch before any mutation
//! Reference / Policy     → per record, collected into BatchResult.failed_ids
//! Validation             → aborts only the manual operation that raised it
//! ```

use thiserror::Error;

// =============================================================================
// Error Kind
// =============================================================================

/// Coarse classification of engine failures.
///
/// Callers use this to decide whether a failure aborted a whole batch
/// (`Format`, `EmptyCatalog`) or a single record (`Reference`, `Policy`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Duplicate id, non-positive quantity, missing required field.
    Validation,
    /// Unparseable file or missing/ambiguous column.
    Format,
    /// Movement references a product id that is not in the catalog.
    Reference,
    /// Sale blocked by the stock-floor policy.
    Policy,
    /// Bulk import attempted with no products to reconcile against.
    EmptyCatalog,
}

// =============================================================================
// Core Error
// =============================================================================

/// Engine errors.
///
/// Nothing in the engine is fatal to the host process; every variant is
/// returned to the caller and leaves the aggregate unchanged.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Movement or edit references an id that is not in the catalog.
    #[error("Unknown product: {0}")]
    UnknownProduct(String),

    /// Sale would drive stock below zero while negative stock is blocked.
    ///
    /// ## User Workflow
    /// ```text
    /// Record sale (qty: 8)
    ///      │
    ///      ▼
    /// Check stock: available=5, allow_negative_stock=false
    ///      │
    ///      ▼
    /// InsufficientStock { id: "A1", available: 5, requested: 8 }
    /// ```
    #[error("Insufficient stock for {id}: available {available}, requested {requested}")]
    InsufficientStock {
        id: String,
        available: i64,
        requested: i64,
    },

    /// Bulk import attempted while the catalog is empty.
    #[error("Catalog is empty: add products before importing movements")]
    EmptyCatalog,

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Tabular input error (wraps FormatError).
    #[error("Format error: {0}")]
    Format(#[from] FormatError),
}

impl CoreError {
    /// Returns the propagation class of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            CoreError::UnknownProduct(_) => ErrorKind::Reference,
            CoreError::InsufficientStock { .. } => ErrorKind::Policy,
            CoreError::EmptyCatalog => ErrorKind::EmptyCatalog,
            CoreError::Validation(_) => ErrorKind::Validation,
            CoreError::Format(_) => ErrorKind::Format,
        }
    }

    /// Creates an UnknownProduct error.
    pub fn unknown_product(id: impl Into<String>) -> Self {
        CoreError::UnknownProduct(id.into())
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors for manual operations.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Duplicate value (e.g., product id already in the catalog).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

impl ValidationError {
    /// Creates a Duplicate error for a product id.
    pub fn duplicate_id(id: impl Into<String>) -> Self {
        ValidationError::Duplicate {
            field: "ID".to_string(),
            value: id.into(),
        }
    }
}

// =============================================================================
// Format Error
// =============================================================================

/// Errors raised while interpreting a tabular record set.
#[derive(Debug, Error)]
pub enum FormatError {
    /// A required column is absent after header normalization.
    #[error("Missing column: {0}")]
    MissingColumn(String),

    /// More than one header maps to the same role.
    #[error("Ambiguous column {role}: candidates {candidates:?}")]
    AmbiguousColumn {
        role: String,
        candidates: Vec<String>,
    },

    /// The record set could not be decoded at all.
    #[error("Unparseable input: {0}")]
    Unparseable(String),
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;
