//! # shopkeep-core: Pure Business Logic for Shopkeep
//!
//! This crate is the **heart** of Shopkeep, a single-user inventory
//! manager for a small retail shop. It contains all business logic as
//! pure functions and plain structs with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                       Shopkeep Architecture                         │
//! │                                                                     │
//! │  ┌─────────────────────────────────────────────────────────────┐   │
//! │  │                     apps/cli (menu loop)                    │   │
//! │  │   View ──► Sell ──► Restock ──► Edit/Add ──► Exit           │   │
//! │  └─────────────────────────────┬───────────────────────────────┘   │
//! │                                │                                    │
//! │  ┌─────────────────────────────▼───────────────────────────────┐   │
//! │  │              ★ shopkeep-core (THIS CRATE) ★                 │   │
//! │  │                                                             │   │
//! │  │  ┌─────────┐ ┌─────────┐ ┌──────┐ ┌─────────┐ ┌──────────┐ │   │
//! │  │  │  types  │ │ catalog │ │ sale │ │ restock │ │ pricing  │ │   │
//! │  │  │ Product │ │ lookups │ │draft │ │ session │ │ markup   │ │   │
//! │  │  │ records │ │  edits  │ │commit│ │  lines  │ │ discount │ │   │
//! │  │  └─────────┘ └─────────┘ └──────┘ └─────────┘ └──────────┘ │   │
//! │  │                                                             │   │
//! │  │  NO I/O • NO FILESYSTEM • NO PROMPTS • PURE FUNCTIONS       │   │
//! │  └─────────────────────────────┬───────────────────────────────┘   │
//! │                                │                                    │
//! │  ┌─────────────────────────────▼───────────────────────────────┐   │
//! │  │              shopkeep-store (persistence layer)             │   │
//! │  │        product file load/save, invoice rendering            │   │
//! │  └─────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Sale, Restock records)
//! - [`catalog`] - The in-memory product collection and its mutation rules
//! - [`sale`] - Staged sale carts with a commit-or-nothing protocol
//! - [`restock`] - Restock entry sessions
//! - [`pricing`] - Markup, promotion, and volume discount math
//! - [`validation`] - Input validation for the CLI's retry loops
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same input = same output, no hidden state
//! 2. **No I/O**: filesystem and terminal access are FORBIDDEN here
//! 3. **Explicit Errors**: all errors are typed, never strings or panics
//! 4. **Commit-or-nothing**: a sale validates every line before mutating
//!    any stock; a failed check leaves the catalog untouched

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod error;
pub mod pricing;
pub mod restock;
pub mod sale;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use catalog::Catalog;
pub use error::{CoreError, CoreResult, ValidationError};
pub use restock::RestockSession;
pub use sale::{SaleDraft, SaleTotals};
pub use types::{Product, Restock, RestockLineItem, Sale, SaleLineItem};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Fixed multiplier applied to cost price to derive the selling price.
///
/// The selling price is never stored: it is always recomputed as
/// `cost_price * MARKUP` so a restock's new cost basis immediately
/// flows through to the shelf price.
pub const MARKUP: f64 = 3.0;

/// Promotion group size: for every `PROMO_GROUP_SIZE` units purchased,
/// one additional unit is granted free of charge.
pub const PROMO_GROUP_SIZE: i64 = 3;

/// Order totals at or above this amount receive the volume discount.
pub const DISCOUNT_THRESHOLD: f64 = 1000.0;

/// Volume discount in basis points (500 = 5%).
///
/// Expressed in basis points so the rate stays an exact integer; the
/// discount amount itself is computed in the currency unit.
pub const VOLUME_DISCOUNT_BPS: u32 = 500;

/// Brand recorded when none is supplied.
pub const DEFAULT_BRAND: &str = "Generic";

/// Country of origin recorded when none is supplied.
pub const DEFAULT_COUNTRY: &str = "Unknown";
