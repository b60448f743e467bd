//! # Restock Engine
//!
//! Converts a sequence of (product, quantity, new cost) entries into
//! incremented stock levels and an updated cost basis.
//!
//! ## Session Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                     Restock Lifecycle                               │
//! │                                                                     │
//! │  RestockSession::new()                                              │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  add_line(&mut catalog, "Moisturizer", 5, 120.0)  ◄── per entry     │
//! │       │     validates: found? qty > 0? cost >= 0?                   │
//! │       │     APPLIES IMMEDIATELY: quantity += 5,                     │
//! │       │     cost_price = 120.0 (full replacement, no averaging)     │
//! │       │     records old quantity/cost for the audit line            │
//! │       ▼                                                             │
//! │  finish()                                                           │
//! │       ├── no accepted lines ──► None (no invoice, no save)          │
//! │       └── otherwise ──► Restock record with total_cost              │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Unlike a sale there is no confirm/cancel step: each accepted line is
//! already valid on its own (stock only ever increases), so it is
//! applied at entry time and the invoice follows unconditionally once
//! at least one line was accepted.

use chrono::Utc;

use crate::catalog::Catalog;
use crate::error::{CoreError, CoreResult};
use crate::types::{Restock, RestockLineItem};
use crate::validation::{validate_cost_price, validate_quantity};

/// A restock entry session.
#[derive(Debug, Clone, Default)]
pub struct RestockSession {
    lines: Vec<RestockLineItem>,
}

impl RestockSession {
    /// Starts an empty session.
    pub fn new() -> Self {
        RestockSession::default()
    }

    /// Validates and applies one restock line.
    ///
    /// ## Rejections (per line, the session survives)
    /// - product not found by name
    /// - quantity not positive
    /// - new cost price negative
    ///
    /// On acceptance the catalog is mutated in place: stock increases
    /// by `quantity` and the latest acquisition cost fully replaces the
    /// previous one.
    pub fn add_line(
        &mut self,
        catalog: &mut Catalog,
        name: &str,
        quantity: i64,
        new_cost_price: f64,
    ) -> CoreResult<&RestockLineItem> {
        validate_quantity(quantity)?;
        validate_cost_price(new_cost_price)?;

        let id = catalog
            .find_by_name(name)
            .ok_or_else(|| CoreError::ProductNotFound(name.trim().to_string()))?
            .id;

        let product = catalog.product_mut(id)?;
        let previous_quantity = product.quantity;
        let previous_cost_price = product.cost_price;
        product.quantity += quantity;
        product.cost_price = new_cost_price;

        self.lines.push(RestockLineItem {
            product_id: id,
            name: product.name.clone(),
            brand: product.brand.clone(),
            quantity_added: quantity,
            new_cost_price,
            previous_quantity,
            previous_cost_price,
            line_cost: new_cost_price * quantity as f64,
        });
        Ok(self.lines.last().unwrap())
    }

    /// The accepted lines so far, in entry order.
    pub fn lines(&self) -> &[RestockLineItem] {
        &self.lines
    }

    /// Checks whether any line has been accepted.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Ends the session.
    ///
    /// Returns `None` when no line was accepted — the whole operation
    /// is a no-op and the caller must neither write an invoice nor save
    /// the catalog.
    pub fn finish(self) -> Option<Restock> {
        if self.lines.is_empty() {
            return None;
        }
        let total_cost = self.lines.iter().map(|l| l.line_cost).sum();
        Some(Restock {
            lines: self.lines,
            total_cost,
            created_at: Utc::now(),
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
