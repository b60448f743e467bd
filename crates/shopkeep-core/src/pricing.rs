//! # Pricing Module
//!
//! Markup, promotion, and volume discount arithmetic.
//!
//! ## The Three Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  1. MARKUP                                                          │
//! │     selling_price = cost_price × 3.0                                │
//! │     The shelf price is always derived, never stored.                │
//! │                                                                     │
//! │  2. PROMOTION  (buy 3, get 1 free — per line item)                  │
//! │     free      = quantity / 3        (integer division)              │
//! │     consumed  = quantity + free     (what leaves the shelf)         │
//! │     charged   = quantity            (free units cost nothing)       │
//! │                                                                     │
//! │  3. VOLUME DISCOUNT (per transaction)                               │
//! │     subtotal >= 1000  →  5% off the running total                   │
//! │     subtotal <  1000  →  no discount, final == subtotal exactly     │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every monetary figure in the system flows through these functions;
//! the engines never multiply prices inline.

use crate::{DISCOUNT_THRESHOLD, MARKUP, PROMO_GROUP_SIZE, VOLUME_DISCOUNT_BPS};

/// Returns the selling price for a given acquisition cost.
#[inline]
pub fn selling_price(cost_price: f64) -> f64 {
    cost_price * MARKUP
}

/// Returns the free units granted for a purchased quantity.
///
/// ## Example
/// ```rust
/// use shopkeep_core::pricing::free_units;
///
/// assert_eq!(free_units(2), 0);
/// assert_eq!(free_units(3), 1);
/// assert_eq!(free_units(6), 2);
/// assert_eq!(free_units(7), 2);
/// ```
#[inline]
pub fn free_units(quantity: i64) -> i64 {
    quantity / PROMO_GROUP_SIZE
}

/// Returns the total units consumed from stock for a purchased
/// quantity: the paid units plus the promotional free units.
///
/// This is the figure the availability check runs against — a sale of
/// 6 units needs 8 on the shelf.
#[inline]
pub fn consumed_units(quantity: i64) -> i64 {
    quantity + free_units(quantity)
}

/// Returns the volume discount for a transaction subtotal.
///
/// Zero below [`DISCOUNT_THRESHOLD`]; 5% of the subtotal at or above
/// it. The rate is held in basis points ([`VOLUME_DISCOUNT_BPS`]) so
/// the constant stays an exact integer.
///
/// ## Example
/// ```rust
/// use shopkeep_core::pricing::volume_discount;
///
/// assert_eq!(volume_discount(999.99), 0.0);
/// assert_eq!(volume_discount(1800.0), 90.0);
/// ```
pub fn volume_discount(subtotal: f64) -> f64 {
    if subtotal >= DISCOUNT_THRESHOLD {
        subtotal * (VOLUME_DISCOUNT_BPS as f64 / 10_000.0)
    } else {
        0.0
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selling_price_markup() {
        assert_eq!(selling_price(100.0), 300.0);
        assert_eq!(selling_price(0.0), 0.0);
        assert_eq!(selling_price(12.5), 37.5);
    }

    #[test]
    fn test_free_units_steps_at_group_size() {
        assert_eq!(free_units(1), 0);
        assert_eq!(free_units(2), 0);
        assert_eq!(free_units(3), 1);
        assert_eq!(free_units(5), 1);
        assert_eq!(free_units(6), 2);
        assert_eq!(free_units(9), 3);
    }

    #[test]
    fn test_consumed_units() {
        // Selling q consumes exactly q + q/3
        assert_eq!(consumed_units(1), 1);
        assert_eq!(consumed_units(3), 4);
        assert_eq!(consumed_units(6), 8);
        assert_eq!(consumed_units(10), 13);
    }

    #[test]
    fn test_discount_below_threshold_is_zero() {
        assert_eq!(volume_discount(0.0), 0.0);
        assert_eq!(volume_discount(500.0), 0.0);
        assert_eq!(volume_discount(999.999), 0.0);
    }

    #[test]
    fn test_discount_applies_at_threshold_boundary() {
        // Applies at exactly 1000, not just above it
        assert_eq!(volume_discount(1000.0), 50.0);
    }

    #[test]
    fn test_discount_above_threshold() {
        // Scenario A: subtotal 1800 → discount 90 → final 1710
        assert_eq!(volume_discount(1800.0), 90.0);
        assert_eq!(1800.0 - volume_discount(1800.0), 1710.0);
    }
}
