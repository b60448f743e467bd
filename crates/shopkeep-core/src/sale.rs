//! # Sale Engine
//!
//! Converts a customer's selections into a committed or cancelled
//! transaction.
//!
//! ## Commit Protocol
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Sale Lifecycle                                 │
//! │                                                                     │
//! │  SaleDraft::new(customer)                                           │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  add_line(&catalog, "Moisturizer", 6)   ◄── repeats per entry       │
//! │       │      validates: found? in stock? qty > 0?                   │
//! │       │      consumed (paid + free) fits remaining stock?           │
//! │       │      stages a priced SaleLineItem — NO catalog mutation     │
//! │       ▼                                                             │
//! │  totals() ──► summary shown to the user                             │
//! │       │                                                             │
//! │       ├── user declines / cart empty ──► drop the draft             │
//! │       │                                  (nothing was mutated)      │
//! │       ▼                                                             │
//! │  commit(&mut catalog)                                               │
//! │       │      re-validates EVERY line against current stock,         │
//! │       │      then decrements all lines; a failed recheck            │
//! │       │      mutates nothing                                        │
//! │       ▼                                                             │
//! │  Sale record ──► invoice writer ──► product file save               │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The recheck at commit time is defensive: the session is
//! single-threaded, but the contract is that no stale read can ever
//! drive stock negative.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::catalog::Catalog;
use crate::error::{CoreError, CoreResult};
use crate::pricing::{consumed_units, free_units, volume_discount};
use crate::types::{Sale, SaleLineItem};
use crate::validation::{validate_customer_name, validate_quantity};

/// Totals for a draft or committed sale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SaleTotals {
    /// Sum of line totals.
    pub subtotal: f64,
    /// Volume discount (0 below the threshold).
    pub discount: f64,
    /// `subtotal - discount`.
    pub final_amount: f64,
}

/// A staged sale: priced line items that have NOT yet touched stock.
///
/// Dropping the draft cancels the sale; the catalog is untouched and no
/// record exists for the invoice writer.
#[derive(Debug, Clone)]
pub struct SaleDraft {
    customer: String,
    lines: Vec<SaleLineItem>,
}

impl SaleDraft {
    /// Starts a draft for the named customer.
    pub fn new(customer: &str) -> CoreResult<Self> {
        validate_customer_name(customer)?;
        Ok(SaleDraft {
            customer: customer.trim().to_string(),
            lines: Vec::new(),
        })
    }

    /// Stages one line item.
    ///
    /// ## Rejections (per line, the draft survives)
    /// - product not found by name or id
    /// - product entirely out of stock
    /// - requested quantity not positive
    /// - `quantity + quantity/3` free units exceeding the stock still
    ///   unclaimed by earlier lines of this draft
    ///
    /// The line is priced at the product's current selling price; free
    /// units are recorded but not charged.
    pub fn add_line(
        &mut self,
        catalog: &Catalog,
        key: &str,
        quantity: i64,
    ) -> CoreResult<&SaleLineItem> {
        validate_quantity(quantity)?;

        let product = catalog
            .resolve(key)
            .ok_or_else(|| CoreError::ProductNotFound(key.trim().to_string()))?;

        if !product.in_stock() {
            return Err(CoreError::OutOfStock(product.name.clone()));
        }

        let consumed = consumed_units(quantity);
        let staged: i64 = self
            .lines
            .iter()
            .filter(|l| l.product_id == product.id)
            .map(|l| l.consumed())
            .sum();
        let available = product.quantity - staged;
        if consumed > available {
            return Err(CoreError::InsufficientStock {
                name: product.name.clone(),
                available,
                requested: consumed,
            });
        }

        let unit_price = product.selling_price();
        self.lines.push(SaleLineItem {
            product_id: product.id,
            name: product.name.clone(),
            brand: product.brand.clone(),
            quantity,
            free_quantity: free_units(quantity),
            unit_price,
            line_total: unit_price * quantity as f64,
        });
        Ok(self.lines.last().unwrap())
    }

    /// The staged line items, in entry order.
    pub fn lines(&self) -> &[SaleLineItem] {
        &self.lines
    }

    /// The customer this draft belongs to.
    pub fn customer(&self) -> &str {
        &self.customer
    }

    /// Checks whether any line has been staged.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Running totals including the volume discount.
    pub fn totals(&self) -> SaleTotals {
        let subtotal: f64 = self.lines.iter().map(|l| l.line_total).sum();
        let discount = volume_discount(subtotal);
        SaleTotals {
            subtotal,
            discount,
            final_amount: subtotal - discount,
        }
    }

    /// Commits the draft: decrements stock for every line (paid + free
    /// units) and returns the Sale record for the invoice writer.
    ///
    /// ## All-validate-then-all-mutate
    /// Consumption is first aggregated per product and rechecked
    /// against current stock. Only when every line passes does any
    /// decrement happen, so a failed commit leaves the catalog exactly
    /// as it was.
    pub fn commit(self, catalog: &mut Catalog) -> CoreResult<Sale> {
        if self.lines.is_empty() {
            return Err(CoreError::EmptySale);
        }

        // Phase 1: re-validate aggregated consumption per product.
        let mut consumption: BTreeMap<u32, i64> = BTreeMap::new();
        for line in &self.lines {
            *consumption.entry(line.product_id).or_insert(0) += line.consumed();
        }
        for (&id, &needed) in &consumption {
            let product = catalog
                .find_by_id(id)
                .ok_or_else(|| CoreError::ProductNotFound(format!("id {id}")))?;
            if needed > product.quantity {
                return Err(CoreError::InsufficientStock {
                    name: product.name.clone(),
                    available: product.quantity,
                    requested: needed,
                });
            }
        }

        // Phase 2: apply every decrement. Cannot fail after phase 1.
        for (&id, &needed) in &consumption {
            let product = catalog.product_mut(id)?;
            product.quantity -= needed;
            debug_assert!(product.quantity >= 0);
        }

        let totals = self.totals();
        Ok(Sale {
            customer: self.customer,
            lines: self.lines,
            total_amount: totals.subtotal,
            discount: totals.discount,
            final_amount: totals.final_amount,
            created_at: Utc::now(),
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Product;

    fn catalog_with(quantity: i64) -> Catalog {
        Catalog::from_products(vec![Product {
            id: 1,
            name: "Moisturizer".to_string(),
            brand: "Glow".to_string(),
            quantity,
            cost_price: 100.0,
            country: "India".to_string(),
        }])
    }

    #[test]
    fn test_scenario_a_sale_with_promotion_and_discount() {
        // 10 in stock, sell 6: free = 2, consumed = 8, unit = 300,
        // line total = 1800, discount 5% → final 1710, stock left 2
        let mut catalog = catalog_with(10);
        let mut draft = SaleDraft::new("Asha").unwrap();

        let line = draft.add_line(&catalog, "moisturizer", 6).unwrap();
        assert_eq!(line.free_quantity, 2);
        assert_eq!(line.unit_price, 300.0);
        assert_eq!(line.line_total, 1800.0);

        let totals = draft.totals();
        assert_eq!(totals.subtotal, 1800.0);
        assert_eq!(totals.discount, 90.0);
        assert_eq!(totals.final_amount, 1710.0);

        let sale = draft.commit(&mut catalog).unwrap();
        assert_eq!(sale.final_amount, 1710.0);
        assert_eq!(catalog.find_by_id(1).unwrap().quantity, 2);
    }

    #[test]
    fn test_scenario_b_line_rejected_when_consumed_exceeds_stock() {
        // 2 in stock, sell 6 would consume 8 → rejected, stock unchanged
        let mut catalog = catalog_with(2);
        let mut draft = SaleDraft::new("Asha").unwrap();

        let err = draft.add_line(&catalog, "Moisturizer", 6).unwrap_err();
        assert!(matches!(
            err,
            CoreError::InsufficientStock {
                available: 2,
                requested: 8,
                ..
            }
        ));
        assert!(draft.is_empty());
        assert_eq!(catalog.find_by_id(1).unwrap().quantity, 2);

        // Empty cart is an implicit cancellation
        assert!(matches!(
            draft.commit(&mut catalog).unwrap_err(),
            CoreError::EmptySale
        ));
    }

    #[test]
    fn test_no_discount_below_threshold() {
        let mut catalog = catalog_with(10);
        let mut draft = SaleDraft::new("Ravi").unwrap();
        // 3 units at 300 = 900, under the 1000 threshold
        draft.add_line(&catalog, "Moisturizer", 3).unwrap();

        let totals = draft.totals();
        assert_eq!(totals.subtotal, 900.0);
        assert_eq!(totals.discount, 0.0);
        assert_eq!(totals.final_amount, 900.0);

        let sale = draft.commit(&mut catalog).unwrap();
        assert_eq!(sale.final_amount, sale.total_amount);
        // consumed 3 + 1 free
        assert_eq!(catalog.find_by_id(1).unwrap().quantity, 6);
    }

    #[test]
    fn test_cancelled_sale_leaves_catalog_untouched() {
        let catalog = catalog_with(10);
        {
            let mut draft = SaleDraft::new("Asha").unwrap();
            draft.add_line(&catalog, "Moisturizer", 6).unwrap();
            // Dropped without commit
        }
        let p = catalog.find_by_id(1).unwrap();
        assert_eq!(p.quantity, 10);
        assert_eq!(p.cost_price, 100.0);
    }

    #[test]
    fn test_duplicate_lines_cannot_overcommit_stock() {
        // 10 in stock. First line for 6 stages 8 consumed; a second
        // line for 2 would need 2 more but only 2 remain — fine; a
        // third line must fail.
        let catalog = catalog_with(10);
        let mut draft = SaleDraft::new("Asha").unwrap();
        draft.add_line(&catalog, "Moisturizer", 6).unwrap();
        draft.add_line(&catalog, "Moisturizer", 2).unwrap();
        let err = draft.add_line(&catalog, "Moisturizer", 1).unwrap_err();
        assert!(matches!(err, CoreError::InsufficientStock { available: 0, .. }));
    }

    #[test]
    fn test_commit_recheck_guards_stale_reads() {
        let mut catalog = catalog_with(10);
        let mut draft = SaleDraft::new("Asha").unwrap();
        draft.add_line(&catalog, "Moisturizer", 6).unwrap();

        // Stock drops between entry and confirmation
        catalog.set_quantity(1, 3).unwrap();

        let err = draft.commit(&mut catalog).unwrap_err();
        assert!(matches!(
            err,
            CoreError::InsufficientStock {
                available: 3,
                requested: 8,
                ..
            }
        ));
        // Failed commit mutated nothing
        assert_eq!(catalog.find_by_id(1).unwrap().quantity, 3);
    }

    #[test]
    fn test_rejects_zero_quantity_and_unknown_product() {
        let catalog = catalog_with(10);
        let mut draft = SaleDraft::new("Asha").unwrap();
        assert!(draft.add_line(&catalog, "Moisturizer", 0).is_err());
        assert!(draft.add_line(&catalog, "Moisturizer", -2).is_err());
        assert!(matches!(
            draft.add_line(&catalog, "Toner", 1).unwrap_err(),
            CoreError::ProductNotFound(_)
        ));
    }

    #[test]
    fn test_out_of_stock_product_rejected_before_math() {
        let catalog = catalog_with(0);
        let mut draft = SaleDraft::new("Asha").unwrap();
        assert!(matches!(
            draft.add_line(&catalog, "Moisturizer", 1).unwrap_err(),
            CoreError::OutOfStock(_)
        ));
    }

    #[test]
    fn test_sale_by_numeric_id() {
        let catalog = catalog_with(10);
        let mut draft = SaleDraft::new("Asha").unwrap();
        let line = draft.add_line(&catalog, "1", 2).unwrap();
        assert_eq!(line.name, "Moisturizer");
    }

    #[test]
    fn test_blank_customer_rejected() {
        assert!(SaleDraft::new("  ").is_err());
    }
}
