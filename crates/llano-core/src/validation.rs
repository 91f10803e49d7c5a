//! # Validation Module
//!
//! Input validation for manual catalog entry and single movements.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: UI form                                                      │
//! │  └── "Please fill in every field" feedback                             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE (field rules)                                    │
//! │  ├── required text fields                                              │
//! │  ├── length limits                                                     │
//! │  └── numeric sign rules                                                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: ProductCatalog / MovementProcessor                           │
//! │  ├── duplicate id check                                                │
//! │  └── referential + stock-floor checks                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use llano_core::validation::{validate_product_id, validate_quantity};
//!
//! assert!(validate_product_id("A1").is_ok());
//! assert!(validate_quantity(0).is_err());
//! ```

use crate::error::ValidationError;
use crate::types::NewProduct;
use crate::{MAX_ID_LEN, MAX_NAME_LEN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates that a text field is present after trimming.
pub fn validate_required(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Validates a product identifier.
///
/// ## Rules
/// - Must not be blank
/// - At most 50 characters after trimming
///
/// ```rust
/// use llano_core::validation::validate_product_id;
///
/// assert!(validate_product_id(" a1 ").is_ok());
/// assert!(validate_product_id("   ").is_err());
/// ```
pub fn validate_product_id(id: &str) -> ValidationResult<()> {
    validate_required("ID", id)?;

    if id.trim().chars().count() > MAX_ID_LEN {
        return Err(ValidationError::TooLong {
            field: "ID".to_string(),
            max: MAX_ID_LEN,
        });
    }

    Ok(())
}

/// Validates a product name.
///
/// ## Rules
/// - Must not be blank
/// - At most 200 characters
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    validate_required("name", name)?;

    if name.trim().chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a movement quantity (> 0).
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }
    Ok(())
}

/// Validates an initial stock value (>= 0).
pub fn validate_initial_stock(stock: i64) -> ValidationResult<()> {
    if stock < 0 {
        return Err(ValidationError::OutOfRange {
            field: "initial stock".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }
    Ok(())
}

// =============================================================================
// Composite Validators
// =============================================================================

/// Validates every field of a new catalog entry.
///
/// Mirrors the product form: all four text fields are required.
pub fn validate_new_product(product: &NewProduct) -> ValidationResult<()> {
    validate_product_id(&product.id)?;
    validate_product_name(&product.name)?;
    validate_required("category", &product.category)?;
    validate_required("presentation", &product.presentation)?;
    validate_initial_stock(product.initial_stock)?;
    Ok(())
}
