//! # Invoice Writer
//!
//! Renders Sale and Restock records into timestamped, human-readable
//! text documents.
//!
//! ## Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                       Invoice Writer                                │
//! │                                                                     │
//! │  sales:    {root}/sales_invoices/Invoice_{customer}_{ts}.txt        │
//! │  restock:  {root}/restock_invoices/Restock_Invoice_{name}_{ts}.txt  │
//! │                                                                     │
//! │  • timestamp at second resolution → unique within a process run     │
//! │  • invoice number derived from the same timestamp                   │
//! │  • directory created before the write                               │
//! │  • a write failure means the invoice does NOT exist — the caller    │
//! │    must not assume otherwise                                        │
//! │  • write-only: invoices are never read back or indexed              │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Content is deterministic given the record: header block, metadata
//! block, tabular line items, totals, footer.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use tracing::debug;

use shopkeep_core::{Restock, Sale};

use crate::error::{StoreError, StoreResult};

/// Currency symbol for invoice display (single fixed unit).
const CURRENCY: &str = "₹";

const SALES_DIR: &str = "sales_invoices";
const RESTOCK_DIR: &str = "restock_invoices";
const RULE: &str =
    "========================================================================";
const THIN_RULE: &str =
    "------------------------------------------------------------------------";

/// Writes sale and restock invoices under a root directory.
#[derive(Debug, Clone)]
pub struct InvoiceWriter {
    root: PathBuf,
    store_name: String,
}

impl InvoiceWriter {
    /// Creates a writer rooted at `root` (typically the data
    /// directory), stamping `store_name` into every header.
    pub fn new(root: impl Into<PathBuf>, store_name: impl Into<String>) -> Self {
        InvoiceWriter {
            root: root.into(),
            store_name: store_name.into(),
        }
    }

    /// Renders and persists a sales invoice; returns its location.
    pub fn write_sale(&self, sale: &Sale) -> StoreResult<PathBuf> {
        let local = sale.created_at.with_timezone(&Local);
        let path = self.root.join(SALES_DIR).join(format!(
            "Invoice_{}_{}.txt",
            sanitize(&sale.customer),
            file_timestamp(&local),
        ));
        self.write(&path, &self.render_sale(sale, &local))?;
        debug!(path = %path.display(), "sales invoice written");
        Ok(path)
    }

    /// Renders and persists a restock invoice; returns its location.
    ///
    /// A restock session may span several products; the first accepted
    /// line's product names the file.
    pub fn write_restock(&self, restock: &Restock) -> StoreResult<PathBuf> {
        let local = restock.created_at.with_timezone(&Local);
        let first_name = restock
            .lines
            .first()
            .map(|l| l.name.as_str())
            .unwrap_or("Stock");
        let path = self.root.join(RESTOCK_DIR).join(format!(
            "Restock_Invoice_{}_{}.txt",
            sanitize(first_name),
            file_timestamp(&local),
        ));
        self.write(&path, &self.render_restock(restock, &local))?;
        debug!(path = %path.display(), "restock invoice written");
        Ok(path)
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    fn render_sale(&self, sale: &Sale, local: &DateTime<Local>) -> String {
        let mut doc = String::new();
        self.push_header(&mut doc, "SALES INVOICE");
        doc.push_str(&format!("Invoice No : INV-{}\n", invoice_number(local)));
        doc.push_str(&format!("Date       : {}\n", local.format("%Y-%m-%d")));
        doc.push_str(&format!("Customer   : {}\n\n", sale.customer));

        doc.push_str(&format!(
            "{:<22}{:<14}{:>5}{:>6}{:>12}{:>13}\n",
            "Product", "Brand", "Qty", "Free", "Unit Price", "Line Total"
        ));
        doc.push_str(THIN_RULE);
        doc.push('\n');
        for line in &sale.lines {
            doc.push_str(&format!(
                "{:<22}{:<14}{:>5}{:>6}{:>12}{:>13}\n",
                line.name,
                line.brand,
                line.quantity,
                line.free_quantity,
                money(line.unit_price),
                money(line.line_total),
            ));
        }
        doc.push_str(THIN_RULE);
        doc.push('\n');

        doc.push_str(&format!("Subtotal   : {}\n", money(sale.total_amount)));
        if sale.discount > 0.0 {
            doc.push_str(&format!("Discount   : {}\n", money(sale.discount)));
        }
        doc.push_str(&format!("Total      : {}\n", money(sale.final_amount)));

        push_footer(&mut doc, "Thank you for shopping with us!");
        doc
    }

    fn render_restock(&self, restock: &Restock, local: &DateTime<Local>) -> String {
        let mut doc = String::new();
        self.push_header(&mut doc, "RESTOCK INVOICE");
        doc.push_str(&format!("Invoice No : RST-{}\n", invoice_number(local)));
        doc.push_str(&format!("Date       : {}\n\n", local.format("%Y-%m-%d")));

        doc.push_str(&format!(
            "{:<22}{:<14}{:>5}{:>10}{:>12}{:>13}\n",
            "Product", "Brand", "Qty", "Prev Qty", "Unit Cost", "Line Cost"
        ));
        doc.push_str(THIN_RULE);
        doc.push('\n');
        for line in &restock.lines {
            doc.push_str(&format!(
                "{:<22}{:<14}{:>5}{:>10}{:>12}{:>13}\n",
                line.name,
                line.brand,
                line.quantity_added,
                line.previous_quantity,
                money(line.new_cost_price),
                money(line.line_cost),
            ));
        }
        doc.push_str(THIN_RULE);
        doc.push('\n');

        doc.push_str(&format!("Total Cost : {}\n", money(restock.total_cost)));

        push_footer(&mut doc, "Thank you for restocking with us.");
        doc
    }

    fn push_header(&self, doc: &mut String, kind: &str) {
        doc.push_str(RULE);
        doc.push('\n');
        doc.push_str(&format!("{:^72}\n", self.store_name));
        doc.push_str(&format!("{kind:^72}\n"));
        doc.push_str(RULE);
        doc.push('\n');
    }

    // =========================================================================
    // Filesystem
    // =========================================================================

    fn write(&self, path: &Path, content: &str) -> StoreResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| StoreError::CreateDirFailed {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(path, content).map_err(|source| StoreError::InvoiceFailed {
            path: path.to_path_buf(),
            source,
        })
    }
}

fn push_footer(doc: &mut String, message: &str) {
    doc.push_str(RULE);
    doc.push('\n');
    doc.push_str(&format!("{message:^72}\n"));
    doc.push_str(RULE);
    doc.push('\n');
}

fn money(amount: f64) -> String {
    format!("{CURRENCY}{amount:.2}")
}

/// Second-resolution timestamp for filenames.
fn file_timestamp(local: &DateTime<Local>) -> String {
    local.format("%Y-%m-%d_%H-%M-%S").to_string()
}

/// Invoice number derived from the same timestamp as the filename.
fn invoice_number(local: &DateTime<Local>) -> String {
    local.format("%Y%m%d%H%M%S").to_string()
}

/// Keeps names safe for filenames: whitespace and path separators
/// become underscores.
fn sanitize(name: &str) -> String {
    name.trim()
        .chars()
        .map(|c| {
            if c.is_whitespace() || c == '/' || c == '\\' {
                '_'
            } else {
                c
            }
        })
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use shopkeep_core::{RestockLineItem, SaleLineItem};
    use tempfile::tempdir;

    fn sample_sale() -> Sale {
        Sale {
            customer: "Asha Rao".to_string(),
            lines: vec![SaleLineItem {
                product_id: 1,
                name: "Moisturizer".to_string(),
                brand: "Glow".to_string(),
                quantity: 6,
                free_quantity: 2,
                unit_price: 300.0,
                line_total: 1800.0,
            }],
            total_amount: 1800.0,
            discount: 90.0,
            final_amount: 1710.0,
            created_at: Utc::now(),
        }
    }

    fn sample_restock() -> Restock {
        Restock {
            lines: vec![RestockLineItem {
                product_id: 1,
                name: "Moisturizer".to_string(),
                brand: "Glow".to_string(),
                quantity_added: 5,
                new_cost_price: 120.0,
                previous_quantity: 2,
                previous_cost_price: 100.0,
                line_cost: 600.0,
            }],
            total_cost: 600.0,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_sale_invoice_written_under_sales_dir() {
        let dir = tempdir().unwrap();
        let writer = InvoiceWriter::new(dir.path(), "Glow Beauty Mart");

        let path = writer.write_sale(&sample_sale()).unwrap();
        assert!(path.exists());
        assert!(path.starts_with(dir.path().join("sales_invoices")));

        let file_name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(file_name.starts_with("Invoice_Asha_Rao_"));
        assert!(file_name.ends_with(".txt"));
    }

    #[test]
    fn test_sale_invoice_content_has_all_blocks() {
        let dir = tempdir().unwrap();
        let writer = InvoiceWriter::new(dir.path(), "Glow Beauty Mart");

        let path = writer.write_sale(&sample_sale()).unwrap();
        let content = fs::read_to_string(path).unwrap();

        assert!(content.contains("Glow Beauty Mart"));
        assert!(content.contains("SALES INVOICE"));
        assert!(content.contains("Customer   : Asha Rao"));
        assert!(content.contains("Invoice No : INV-"));
        assert!(content.contains("Moisturizer"));
        assert!(content.contains("₹300.00"));
        assert!(content.contains("Subtotal   : ₹1800.00"));
        assert!(content.contains("Discount   : ₹90.00"));
        assert!(content.contains("Total      : ₹1710.00"));
        assert!(content.contains("Thank you for shopping with us!"));
    }

    #[test]
    fn test_sale_invoice_omits_zero_discount() {
        let dir = tempdir().unwrap();
        let writer = InvoiceWriter::new(dir.path(), "Shop");
        let mut sale = sample_sale();
        sale.total_amount = 900.0;
        sale.discount = 0.0;
        sale.final_amount = 900.0;

        let path = writer.write_sale(&sale).unwrap();
        let content = fs::read_to_string(path).unwrap();
        assert!(!content.contains("Discount"));
        assert!(content.contains("Total      : ₹900.00"));
    }

    #[test]
    fn test_restock_invoice_written_under_restock_dir() {
        let dir = tempdir().unwrap();
        let writer = InvoiceWriter::new(dir.path(), "Glow Beauty Mart");

        let path = writer.write_restock(&sample_restock()).unwrap();
        assert!(path.starts_with(dir.path().join("restock_invoices")));
        let file_name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(file_name.starts_with("Restock_Invoice_Moisturizer_"));
    }

    #[test]
    fn test_restock_invoice_content_shows_audit_trail() {
        let dir = tempdir().unwrap();
        let writer = InvoiceWriter::new(dir.path(), "Glow Beauty Mart");

        let path = writer.write_restock(&sample_restock()).unwrap();
        let content = fs::read_to_string(path).unwrap();

        assert!(content.contains("RESTOCK INVOICE"));
        assert!(content.contains("Invoice No : RST-"));
        assert!(content.contains("₹120.00"));
        assert!(content.contains("Total Cost : ₹600.00"));
        assert!(content.contains("Thank you for restocking with us."));
    }

    #[test]
    fn test_sanitize_filename_components() {
        assert_eq!(sanitize("Asha Rao"), "Asha_Rao");
        assert_eq!(sanitize(" a/b\\c "), "a_b_c");
    }
}
