//! # Error Types
//!
//! Domain-specific error types for shopkeep-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                          Error Types                                │
//! │                                                                     │
//! │  shopkeep-core errors (this file)                                   │
//! │  ├── CoreError        - Business rule violations                    │
//! │  └── ValidationError  - Input validation failures                   │
//! │                                                                     │
//! │  shopkeep-store errors (separate crate)                             │
//! │  └── StoreError       - Filesystem operation failures               │
//! │                                                                     │
//! │  Flow: ValidationError → CoreError → reported at the prompt,        │
//! │        the enclosing transaction keeps going                        │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (product name, stock counts)
//! 3. Errors are enum variants, never String
//! 4. A business-rule violation rejects one line item, never the whole
//!    multi-line transaction

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent business rule violations. They are reported
/// at the prompt for the offending line item; the enclosing sale or
/// restock continues with the remaining entries.
#[derive(Debug, Error)]
pub enum CoreError {
    /// No product matches the given name or id.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Product exists but has no stock at all.
    #[error("'{0}' is out of stock")]
    OutOfStock(String),

    /// Requested quantity plus promotional free units exceeds stock.
    ///
    /// ## When This Occurs
    /// - The buy-3-get-1-free promotion inflates consumption: selling 6
    ///   units consumes 8, so 6 requested against 7 in stock fails
    /// - A commit-time recheck finds less stock than at entry time
    #[error("Insufficient stock for '{name}': {available} available, {requested} needed (incl. free units)")]
    InsufficientStock {
        name: String,
        available: i64,
        requested: i64,
    },

    /// A sale was committed with no line items.
    ///
    /// An empty cart is an implicit cancellation, not a transaction.
    #[error("Sale has no line items")]
    EmptySale,

    /// A product with this name already exists (case-insensitive).
    #[error("A product named '{0}' already exists")]
    DuplicateProduct(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These occur when user-supplied values don't meet requirements. The
/// CLI reports the message and re-prompts; they never abort a session.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Value must be strictly positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must not be negative (zero allowed).
    #[error("{field} cannot be negative")]
    Negative { field: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
