//! End-to-end flow over a scratch directory: load the product file,
//! run a sale and a restock through the core engines, persist the
//! catalog, and write the invoices — the same sequence the CLI drives.

use std::fs;

use tempfile::tempdir;

use shopkeep_core::{Catalog, RestockSession, SaleDraft};
use shopkeep_store::{load, save, InvoiceWriter};

#[test]
fn full_session_sale_then_restock() {
    let dir = tempdir().unwrap();
    let products_path = dir.path().join("products.txt");
    fs::write(
        &products_path,
        "Moisturizer,Glow,10,100.0,India\nSunscreen,Shade,4,250.0,Korea\n",
    )
    .unwrap();

    // Startup
    let outcome = load(&products_path).unwrap();
    assert_eq!(outcome.skipped, 0);
    let mut catalog = Catalog::from_products(outcome.products);
    let writer = InvoiceWriter::new(dir.path(), "Glow Beauty Mart");

    // Sale: 6 Moisturizer → 2 free, 8 consumed, 1800 gross, 5% off
    let mut draft = SaleDraft::new("Asha").unwrap();
    draft.add_line(&catalog, "moisturizer", 6).unwrap();
    let sale = draft.commit(&mut catalog).unwrap();
    assert_eq!(sale.final_amount, 1710.0);

    let invoice_path = writer.write_sale(&sale).unwrap();
    assert!(invoice_path.exists());
    save(catalog.products(), &products_path).unwrap();

    // The persisted file reflects the committed decrement
    let reloaded = load(&products_path).unwrap();
    let mut catalog = Catalog::from_products(reloaded.products);
    assert_eq!(catalog.find_by_name("Moisturizer").unwrap().quantity, 2);

    // Restock: +5 at cost 120 → quantity 7, cost basis replaced
    let mut session = RestockSession::new();
    session
        .add_line(&mut catalog, "Moisturizer", 5, 120.0)
        .unwrap();
    let restock = session.finish().unwrap();
    assert_eq!(restock.total_cost, 600.0);

    writer.write_restock(&restock).unwrap();
    save(catalog.products(), &products_path).unwrap();

    let final_state = load(&products_path).unwrap();
    let catalog = Catalog::from_products(final_state.products);
    let product = catalog.find_by_name("Moisturizer").unwrap();
    assert_eq!(product.quantity, 7);
    assert_eq!(product.cost_price, 120.0);

    // One invoice of each kind exists; nothing else was written
    let sales: Vec<_> = fs::read_dir(dir.path().join("sales_invoices"))
        .unwrap()
        .collect();
    let restocks: Vec<_> = fs::read_dir(dir.path().join("restock_invoices"))
        .unwrap()
        .collect();
    assert_eq!(sales.len(), 1);
    assert_eq!(restocks.len(), 1);
}

#[test]
fn cancelled_sale_and_empty_restock_leave_no_trace() {
    let dir = tempdir().unwrap();
    let products_path = dir.path().join("products.txt");
    fs::write(&products_path, "Moisturizer,Glow,10,100.0,India\n").unwrap();

    let outcome = load(&products_path).unwrap();
    let before = fs::read_to_string(&products_path).unwrap();
    let catalog = Catalog::from_products(outcome.products);

    // Staged but never committed
    let mut draft = SaleDraft::new("Asha").unwrap();
    draft.add_line(&catalog, "Moisturizer", 6).unwrap();
    drop(draft);

    // Immediate "done"
    let session = RestockSession::new();
    assert!(session.finish().is_none());

    // Catalog untouched, file untouched, no invoice directories
    assert_eq!(catalog.find_by_name("Moisturizer").unwrap().quantity, 10);
    assert_eq!(fs::read_to_string(&products_path).unwrap(), before);
    assert!(!dir.path().join("sales_invoices").exists());
    assert!(!dir.path().join("restock_invoices").exists());
}
