//! # Catalog Module
//!
//! The in-memory product collection and its mutation rules.
//!
//! ## Ownership Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                       Catalog Ownership                             │
//! │                                                                     │
//! │  shopkeep-store::load ──► Vec<Product> ──► Catalog (exclusive       │
//! │                                            owner for the session)   │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  SaleDraft::commit(&mut Catalog)     ──► stock decrements           │
//! │  RestockSession::add_line(&mut ...)  ──► stock/cost updates         │
//! │  Catalog edit primitives             ──► direct field edits         │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  shopkeep-store::save(catalog.products(), path)                     │
//! │                                                                     │
//! │  Engines mutate through the exclusive reference and return a        │
//! │  structured record; there is no ambient shared state.               │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Lookup Rules
//! - `find_by_name` is the canonical lookup: case-insensitive exact
//!   match on the product name
//! - duplicate names (under that matching) are rejected at creation and
//!   rename time, so the name is a real key

use crate::error::{CoreError, CoreResult};
use crate::types::Product;
use crate::validation::{
    validate_cost_price, validate_product_name, validate_stock_level,
};
use crate::{DEFAULT_BRAND, DEFAULT_COUNTRY};

/// The product collection, exclusively owned by the running session.
///
/// The persisted text file is the sole durability boundary; the caller
/// decides when to mirror the catalog back to disk.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Catalog::default()
    }

    /// Wraps an already-loaded product list.
    pub fn from_products(products: Vec<Product>) -> Self {
        Catalog { products }
    }

    /// Read-only view of every product, in load/creation order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Number of products in the catalog.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Checks whether the catalog has no products.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    // =========================================================================
    // Lookups
    // =========================================================================

    /// Canonical lookup: case-insensitive exact match on name.
    pub fn find_by_name(&self, name: &str) -> Option<&Product> {
        let name = name.trim();
        self.products.iter().find(|p| p.name_matches(name))
    }

    /// Lookup by session-stable id.
    pub fn find_by_id(&self, id: u32) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Resolves a user-supplied key that may be either a numeric id or
    /// a product name. A purely numeric key that matches an id wins;
    /// anything else falls through to the name lookup.
    pub fn resolve(&self, key: &str) -> Option<&Product> {
        if let Ok(id) = key.trim().parse::<u32>() {
            if let Some(product) = self.find_by_id(id) {
                return Some(product);
            }
        }
        self.find_by_name(key)
    }

    /// Returns the next free id: `max(existing) + 1`, or 1 when empty.
    pub fn next_id(&self) -> u32 {
        self.products.iter().map(|p| p.id).max().unwrap_or(0) + 1
    }

    // =========================================================================
    // Creation
    // =========================================================================

    /// Adds a new product.
    ///
    /// ## Rules
    /// - name must be non-empty and not collide (case-insensitively)
    ///   with an existing product
    /// - initial stock must not be negative, cost must not be negative
    /// - brand/country fall back to "Generic"/"Unknown" when absent
    pub fn add_product(
        &mut self,
        name: &str,
        brand: Option<String>,
        quantity: i64,
        cost_price: f64,
        country: Option<String>,
    ) -> CoreResult<&Product> {
        validate_product_name(name)?;
        validate_stock_level(quantity)?;
        validate_cost_price(cost_price)?;

        let name = name.trim();
        if let Some(existing) = self.find_by_name(name) {
            return Err(CoreError::DuplicateProduct(existing.name.clone()));
        }

        let brand = brand
            .map(|b| b.trim().to_string())
            .filter(|b| !b.is_empty())
            .unwrap_or_else(|| DEFAULT_BRAND.to_string());
        let country = country
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| DEFAULT_COUNTRY.to_string());

        let product = Product {
            id: self.next_id(),
            name: name.to_string(),
            brand,
            quantity,
            cost_price,
            country,
        };
        self.products.push(product);
        Ok(self.products.last().unwrap())
    }

    // =========================================================================
    // Direct Edit Primitives
    // =========================================================================
    // Each primitive validates, applies, and returns the previous value
    // so the CLI can echo "renamed 'X' to 'Y'" for confirmation.

    /// Renames a product; rejects case-insensitive collisions with any
    /// other product. Returns the old name.
    pub fn rename(&mut self, id: u32, new_name: &str) -> CoreResult<String> {
        validate_product_name(new_name)?;
        let new_name = new_name.trim();

        if let Some(existing) = self.find_by_name(new_name) {
            if existing.id != id {
                return Err(CoreError::DuplicateProduct(existing.name.clone()));
            }
        }

        let product = self.product_mut(id)?;
        let old = std::mem::replace(&mut product.name, new_name.to_string());
        Ok(old)
    }

    /// Changes the brand. Returns the old brand.
    pub fn set_brand(&mut self, id: u32, brand: &str) -> CoreResult<String> {
        let brand = brand.trim();
        if brand.is_empty() {
            return Err(crate::ValidationError::Required {
                field: "brand".to_string(),
            }
            .into());
        }
        let product = self.product_mut(id)?;
        let old = std::mem::replace(&mut product.brand, brand.to_string());
        Ok(old)
    }

    /// Sets the stock level directly (zero allowed, negative rejected).
    /// Returns the old quantity.
    pub fn set_quantity(&mut self, id: u32, quantity: i64) -> CoreResult<i64> {
        validate_stock_level(quantity)?;
        let product = self.product_mut(id)?;
        let old = product.quantity;
        product.quantity = quantity;
        Ok(old)
    }

    /// Sets the cost price (negative rejected). Returns the old cost.
    pub fn set_cost_price(&mut self, id: u32, cost_price: f64) -> CoreResult<f64> {
        validate_cost_price(cost_price)?;
        let product = self.product_mut(id)?;
        let old = product.cost_price;
        product.cost_price = cost_price;
        Ok(old)
    }

    /// Changes the country of origin. Returns the old country.
    pub fn set_country(&mut self, id: u32, country: &str) -> CoreResult<String> {
        let country = country.trim();
        if country.is_empty() {
            return Err(crate::ValidationError::Required {
                field: "country".to_string(),
            }
            .into());
        }
        let product = self.product_mut(id)?;
        let old = std::mem::replace(&mut product.country, country.to_string());
        Ok(old)
    }

    // =========================================================================
    // Engine Access
    // =========================================================================

    /// Mutable product access for the sale and restock engines.
    pub(crate) fn product_mut(&mut self, id: u32) -> CoreResult<&mut Product> {
        self.products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| CoreError::ProductNotFound(format!("id {id}")))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
