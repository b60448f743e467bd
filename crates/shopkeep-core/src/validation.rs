//! # Validation Module
//!
//! Input validation for values arriving from the CLI.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                       Validation Layers                             │
//! │                                                                     │
//! │  Layer 1: CLI prompt loop                                           │
//! │  ├── Parses the raw string (non-numeric input re-prompts)           │
//! │  └── Calls a validate_* function; on Err, prints and re-prompts     │
//! │           │                                                         │
//! │           ▼                                                         │
//! │  Layer 2: Engines (sale / restock / catalog)                        │
//! │  └── Re-apply the same checks before mutating — the core never      │
//! │      trusts the caller to have validated                            │
//! │                                                                     │
//! │  Expected-invalid input is a value (`Err(reason)`), never a panic   │
//! │  and never an error that escapes the core boundary.                 │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product name: trimmed and non-empty.
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    if name.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "product name".to_string(),
        });
    }
    Ok(())
}

/// Validates a customer name: trimmed and non-empty.
///
/// The customer name ends up in the invoice filename, so it is the one
/// free-form field a sale cannot proceed without.
pub fn validate_customer_name(name: &str) -> ValidationResult<()> {
    if name.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "customer name".to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a transaction quantity: must be strictly positive.
///
/// Used for both sale and restock line quantities.
pub fn validate_quantity(quantity: i64) -> ValidationResult<()> {
    if quantity <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }
    Ok(())
}

/// Validates a stock level for a direct edit: zero is allowed (a
/// discontinued product is zero-stock, never deleted), negative is not.
pub fn validate_stock_level(quantity: i64) -> ValidationResult<()> {
    if quantity < 0 {
        return Err(ValidationError::Negative {
            field: "stock level".to_string(),
        });
    }
    Ok(())
}

/// Validates a cost price: zero is allowed (free samples), negative is
/// not.
pub fn validate_cost_price(cost_price: f64) -> ValidationResult<()> {
    if cost_price < 0.0 {
        return Err(ValidationError::Negative {
            field: "cost price".to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_product_name() {
        assert!(validate_product_name("Moisturizer").is_ok());
        assert!(validate_product_name("").is_err());
        assert!(validate_product_name("   ").is_err());
    }

    #[test]
    fn test_validate_customer_name() {
        assert!(validate_customer_name("Asha").is_ok());
        assert!(validate_customer_name(" ").is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(100).is_ok());
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-3).is_err());
    }

    #[test]
    fn test_validate_stock_level_allows_zero() {
        assert!(validate_stock_level(0).is_ok());
        assert!(validate_stock_level(10).is_ok());
        assert!(validate_stock_level(-1).is_err());
    }

    #[test]
    fn test_validate_cost_price() {
        assert!(validate_cost_price(0.0).is_ok());
        assert!(validate_cost_price(120.0).is_ok());
        assert!(validate_cost_price(-0.01).is_err());
    }
}
