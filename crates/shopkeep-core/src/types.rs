//! # Domain Types
//!
//! Core domain types used throughout Shopkeep.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                          Domain Types                               │
//! │                                                                     │
//! │  ┌────────────────┐    ┌────────────────┐   ┌────────────────────┐ │
//! │  │    Product     │    │     Sale       │   │     Restock        │ │
//! │  │  ────────────  │    │  ────────────  │   │  ────────────────  │ │
//! │  │  id            │    │  customer      │   │  lines             │ │
//! │  │  name (lookup) │    │  lines         │   │  total_cost        │ │
//! │  │  brand         │    │  total_amount  │   │  created_at        │ │
//! │  │  quantity      │    │  discount      │   └────────────────────┘ │
//! │  │  cost_price    │    │  final_amount  │                          │
//! │  │  country       │    │  created_at    │                          │
//! │  └────────────────┘    └────────────────┘                          │
//! │                                                                     │
//! │  Sale and Restock line items snapshot the product name and brand   │
//! │  at transaction time, so an invoice always reflects exactly what   │
//! │  was committed even if the product is edited afterwards.           │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::pricing;

// =============================================================================
// Product
// =============================================================================

/// A product tracked by the shop.
///
/// ## Identity
/// - `id`: assigned 1..N in file order at load time, or `next_id()` on
///   creation; stable for the lifetime of the session
/// - `name`: the human-facing lookup key; matched case-insensitively
///   everywhere, and unique under that matching
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Session-stable integer identifier.
    pub id: u32,

    /// Display name and canonical lookup key (non-empty).
    pub name: String,

    /// Brand; defaults to "Generic" when not supplied.
    pub brand: String,

    /// Units on hand. Invariant: never negative after any operation.
    pub quantity: i64,

    /// Latest acquisition cost per unit (>= 0). The selling price is
    /// derived from this and never stored.
    pub cost_price: f64,

    /// Country of origin; defaults to "Unknown" when not supplied.
    pub country: String,
}

impl Product {
    /// Returns the selling price (`cost_price * MARKUP`).
    #[inline]
    pub fn selling_price(&self) -> f64 {
        pricing::selling_price(self.cost_price)
    }

    /// Checks whether the product has any stock at all.
    #[inline]
    pub fn in_stock(&self) -> bool {
        self.quantity > 0
    }

    /// Checks whether the product name matches `candidate`, ignoring
    /// case. This is the canonical lookup rule for the whole system.
    #[inline]
    pub fn name_matches(&self, candidate: &str) -> bool {
        self.name.eq_ignore_ascii_case(candidate)
    }
}

// =============================================================================
// Sale Records
// =============================================================================

/// One product entry within a sale.
///
/// Uses the snapshot pattern: name and brand are frozen at entry time.
/// The free units granted by the promotion are consumed from stock but
/// never charged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleLineItem {
    /// Id of the product sold.
    pub product_id: u32,

    /// Product name at time of sale (frozen).
    pub name: String,

    /// Brand at time of sale (frozen).
    pub brand: String,

    /// Units the customer pays for.
    pub quantity: i64,

    /// Additional units granted by the buy-3-get-1-free promotion.
    pub free_quantity: i64,

    /// Selling price per unit at time of sale (frozen).
    pub unit_price: f64,

    /// `unit_price * quantity`; free units are not charged.
    pub line_total: f64,
}

impl SaleLineItem {
    /// Total units removed from stock for this line (paid + free).
    #[inline]
    pub fn consumed(&self) -> i64 {
        self.quantity + self.free_quantity
    }
}

/// A committed sale transaction.
///
/// Produced by [`crate::sale::SaleDraft::commit`] only after every line
/// has been re-validated and the stock decrements applied. Rendered to
/// a sales invoice by shopkeep-store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sale {
    /// Name of the purchasing customer.
    pub customer: String,

    /// Line items in entry order.
    pub lines: Vec<SaleLineItem>,

    /// Sum of line totals before any discount.
    pub total_amount: f64,

    /// Volume discount applied to the running total (0 when below the
    /// threshold).
    pub discount: f64,

    /// `total_amount - discount`.
    pub final_amount: f64,

    /// When the sale was committed.
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Restock Records
// =============================================================================

/// One product entry within a restock session.
///
/// Carries the pre-restock quantity and cost so the invoice doubles as
/// an audit line for the cost-basis change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestockLineItem {
    /// Id of the product restocked.
    pub product_id: u32,

    /// Product name at time of restock (frozen).
    pub name: String,

    /// Brand at time of restock (frozen).
    pub brand: String,

    /// Units added to stock.
    pub quantity_added: i64,

    /// New acquisition cost per unit; fully replaces the previous cost
    /// basis (no weighted averaging).
    pub new_cost_price: f64,

    /// Stock level before this line was applied.
    pub previous_quantity: i64,

    /// Cost basis before this line was applied.
    pub previous_cost_price: f64,

    /// `new_cost_price * quantity_added`.
    pub line_cost: f64,
}

/// A completed restock session with at least one accepted line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Restock {
    /// Line items in entry order.
    pub lines: Vec<RestockLineItem>,

    /// Sum of line costs.
    pub total_cost: f64,

    /// When the session finished.
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn moisturizer() -> Product {
        Product {
            id: 1,
            name: "Moisturizer".to_string(),
            brand: "Glow".to_string(),
            quantity: 10,
            cost_price: 100.0,
            country: "India".to_string(),
        }
    }

    #[test]
    fn test_selling_price_uses_markup() {
        assert_eq!(moisturizer().selling_price(), 300.0);
    }

    #[test]
    fn test_name_matches_is_case_insensitive() {
        let p = moisturizer();
        assert!(p.name_matches("moisturizer"));
        assert!(p.name_matches("MOISTURIZER"));
        assert!(!p.name_matches("Moisturiser"));
    }

    #[test]
    fn test_in_stock() {
        let mut p = moisturizer();
        assert!(p.in_stock());
        p.quantity = 0;
        assert!(!p.in_stock());
    }

    #[test]
    fn test_sale_line_consumed_includes_free_units() {
        let line = SaleLineItem {
            product_id: 1,
            name: "Moisturizer".to_string(),
            brand: "Glow".to_string(),
            quantity: 6,
            free_quantity: 2,
            unit_price: 300.0,
            line_total: 1800.0,
        };
        assert_eq!(line.consumed(), 8);
    }
}
