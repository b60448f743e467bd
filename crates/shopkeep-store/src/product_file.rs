//! # Product File
//!
//! Load/save of the persisted product collection.
//!
//! ## Wire Format
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  One product per line, five comma-separated fields, no header:      │
//! │                                                                     │
//! │      name,brand,quantity,cost_price,country                         │
//! │      Moisturizer,Glow,10,100,India                                  │
//! │                                                                     │
//! │  • no escaping: a field value containing a comma is a known         │
//! │    limitation of the format                                         │
//! │  • ids are NOT persisted — they are assigned 1..N in file order     │
//! │    after the full parse                                             │
//! │  • the file is fully overwritten on every save, never appended      │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Recovery Rules
//! - malformed line (wrong field count, non-numeric or negative
//!   quantity/cost, empty name): skipped with a warning and counted
//! - missing file: treated as "no products yet"; the directory and an
//!   empty file are created so a later save succeeds
//! - any other read failure surfaces as [`StoreError`] for the caller
//!   to report and degrade

use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use shopkeep_core::Product;

use crate::error::{StoreError, StoreResult};

/// Result of loading the product file.
#[derive(Debug, Clone)]
pub struct LoadOutcome {
    /// Products from every well-formed line, ids assigned in file order.
    pub products: Vec<Product>,
    /// Number of malformed lines that were skipped.
    pub skipped: usize,
}

/// Loads the product collection from `path`.
///
/// Missing file: creates the containing directory and an empty file,
/// then returns an empty outcome. Malformed lines are skipped and
/// counted, never fatal.
pub fn load(path: &Path) -> StoreResult<LoadOutcome> {
    if !path.exists() {
        debug!(path = %path.display(), "product file missing, bootstrapping");
        ensure_parent_dir(path)?;
        fs::write(path, "").map_err(|source| StoreError::WriteFailed {
            path: path.to_path_buf(),
            source,
        })?;
        return Ok(LoadOutcome {
            products: Vec::new(),
            skipped: 0,
        });
    }

    let content = fs::read_to_string(path).map_err(|source| StoreError::ReadFailed {
        path: path.to_path_buf(),
        source,
    })?;

    let mut products = Vec::new();
    let mut skipped = 0usize;
    for (index, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match parse_line(line) {
            Some(parsed) => products.push(parsed),
            None => {
                warn!(
                    path = %path.display(),
                    line = index + 1,
                    "skipping malformed product line"
                );
                skipped += 1;
            }
        }
    }

    // Ids are positional, assigned only after the full parse so skipped
    // lines leave no gaps.
    for (index, product) in products.iter_mut().enumerate() {
        product.id = index as u32 + 1;
    }

    debug!(
        path = %path.display(),
        loaded = products.len(),
        skipped,
        "product file loaded"
    );
    Ok(LoadOutcome { products, skipped })
}

/// Saves the full product collection to `path`, overwriting the
/// previous content.
///
/// The content is written to a temporary file in the same directory and
/// renamed over the destination, so a crash mid-write can never leave a
/// half-written product file visible. On failure the in-memory state is
/// untouched and the caller may retry.
pub fn save(products: &[Product], path: &Path) -> StoreResult<()> {
    ensure_parent_dir(path)?;

    let mut content = String::new();
    for product in products {
        content.push_str(&format_line(product));
        content.push('\n');
    }

    let tmp_path = path.with_extension("txt.tmp");
    fs::write(&tmp_path, &content).map_err(|source| StoreError::WriteFailed {
        path: tmp_path.clone(),
        source,
    })?;
    fs::rename(&tmp_path, path).map_err(|source| StoreError::WriteFailed {
        path: path.to_path_buf(),
        source,
    })?;

    debug!(path = %path.display(), count = products.len(), "product file saved");
    Ok(())
}

/// Parses one line into a Product (id left at 0 for later assignment).
fn parse_line(line: &str) -> Option<Product> {
    let fields: Vec<&str> = line.trim().split(',').collect();
    if fields.len() != 5 {
        return None;
    }

    let name = fields[0].trim();
    if name.is_empty() {
        return None;
    }
    let quantity: i64 = fields[2].trim().parse().ok()?;
    let cost_price: f64 = fields[3].trim().parse().ok()?;
    if quantity < 0 || cost_price < 0.0 {
        return None;
    }

    Some(Product {
        id: 0,
        name: name.to_string(),
        brand: fields[1].trim().to_string(),
        quantity,
        cost_price,
        country: fields[4].trim().to_string(),
    })
}

/// Serializes one product back to the five-field form.
fn format_line(product: &Product) -> String {
    format!(
        "{},{},{},{},{}",
        product.name, product.brand, product.quantity, product.cost_price, product.country
    )
}

fn ensure_parent_dir(path: &Path) -> StoreResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|source| StoreError::CreateDirFailed {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
