//! # Interactive Session
//!
//! The menu loop and prompt flows. Everything here is presentation:
//! values are parsed and validated at the prompt, then handed to the
//! core engines, and whatever they return is rendered back.
//!
//! ## Menu Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  Main Menu                                                          │
//! │  ├── View Products      read-only table with selling prices         │
//! │  ├── Process Sale       SaleDraft → summary → confirm → commit      │
//! │  │                      → invoice → save                            │
//! │  ├── Restock Products   RestockSession lines until 'done'           │
//! │  │                      → invoice → save (no confirm step)          │
//! │  ├── Edit / Add Product Catalog primitives, old value echoed        │
//! │  └── Exit                                                           │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Per-line rejections (product not found, insufficient stock, bad
//! values) are printed and the loop continues; only filesystem failures
//! bubble up, and even those keep the session alive with state intact.

use std::path::PathBuf;

use anyhow::Result;
use console::style;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};
use tracing::{error, info};

use shopkeep_core::{Catalog, RestockSession, SaleDraft};
use shopkeep_store::{product_file, InvoiceWriter};

/// Sentinel that ends a line-entry loop, as the shop staff know it.
const DONE: &str = "done";

/// One interactive session over an exclusively-owned catalog.
pub struct Session {
    catalog: Catalog,
    writer: InvoiceWriter,
    products_path: PathBuf,
    theme: ColorfulTheme,
}

impl Session {
    pub fn new(catalog: Catalog, writer: InvoiceWriter, products_path: PathBuf) -> Self {
        Session {
            catalog,
            writer,
            products_path,
            theme: ColorfulTheme::default(),
        }
    }

    /// Runs the menu loop until the user exits.
    pub fn run(&mut self) -> Result<()> {
        loop {
            println!();
            let choice = Select::with_theme(&self.theme)
                .with_prompt("Main Menu")
                .items(&[
                    "View Products",
                    "Process Sale",
                    "Restock Products",
                    "Edit / Add Product",
                    "Exit",
                ])
                .default(0)
                .interact()?;

            match choice {
                0 => self.view_products(),
                1 => self.process_sale()?,
                2 => self.restock_products()?,
                3 => self.edit_products()?,
                _ => break,
            }
        }
        Ok(())
    }

    // =========================================================================
    // View
    // =========================================================================

    fn view_products(&self) {
        if self.catalog.is_empty() {
            println!("{}", style("No products yet.").yellow());
            return;
        }

        println!();
        println!(
            "{}",
            style(format!(
                "{:>4}  {:<24}{:<14}{:>14}{:>8}  {:<12}",
                "ID", "Product", "Brand", "Price", "Stock", "Country"
            ))
            .bold()
        );
        for product in self.catalog.products() {
            println!(
                "{:>4}  {:<24}{:<14}{:>14}{:>8}  {:<12}",
                product.id,
                product.name,
                product.brand,
                format!("₹{:.2}", product.selling_price()),
                product.quantity,
                product.country,
            );
        }
    }

    // =========================================================================
    // Sale
    // =========================================================================

    fn process_sale(&mut self) -> Result<()> {
        let customer: String = Input::with_theme(&self.theme)
            .with_prompt("Customer name")
            .interact_text()?;
        let mut draft = match SaleDraft::new(&customer) {
            Ok(draft) => draft,
            Err(err) => {
                println!("{}", style(err).red());
                return Ok(());
            }
        };

        println!("Welcome, {}!", style(draft.customer()).green());
        loop {
            let key: String = Input::with_theme(&self.theme)
                .with_prompt(format!("Product name or id ('{DONE}' to finish)"))
                .interact_text()?;
            if key.trim().eq_ignore_ascii_case(DONE) {
                break;
            }

            let quantity: i64 = Input::with_theme(&self.theme)
                .with_prompt("Quantity")
                .validate_with(|q: &i64| {
                    if *q > 0 {
                        Ok(())
                    } else {
                        Err("quantity must be positive")
                    }
                })
                .interact_text()?;

            match draft.add_line(&self.catalog, &key, quantity) {
                Ok(line) => println!(
                    "  {} x{} (+{} free) at ₹{:.2} = ₹{:.2}",
                    line.name, line.quantity, line.free_quantity, line.unit_price, line.line_total
                ),
                Err(err) => println!("{}", style(err).red()),
            }
        }

        if draft.is_empty() {
            println!("{}", style("Nothing entered, sale cancelled.").yellow());
            return Ok(());
        }

        // Summary before the commit decision
        println!();
        println!("{}", style("Sale Summary").bold());
        for line in draft.lines() {
            println!(
                "  {} - {}, Quantity: {} (Free: {})",
                line.name, line.brand, line.quantity, line.free_quantity
            );
        }
        let totals = draft.totals();
        println!("  Subtotal: ₹{:.2}", totals.subtotal);
        if totals.discount > 0.0 {
            println!("  Discount: ₹{:.2}", totals.discount);
        }
        println!("  Total:    ₹{:.2}", totals.final_amount);

        let confirmed = Confirm::with_theme(&self.theme)
            .with_prompt("Confirm sale?")
            .default(false)
            .interact()?;
        if !confirmed {
            println!("{}", style("Sale cancelled.").yellow());
            return Ok(());
        }

        match draft.commit(&mut self.catalog) {
            Ok(sale) => {
                info!(customer = %sale.customer, amount = sale.final_amount, "sale committed");
                match self.writer.write_sale(&sale) {
                    Ok(path) => println!("Invoice written to {}", style(path.display()).cyan()),
                    Err(err) => {
                        error!(%err, "invoice not written");
                        println!("{}", style(format!("Invoice NOT saved: {err}")).red());
                    }
                }
                self.save_catalog();
            }
            Err(err) => println!("{}", style(err).red()),
        }
        Ok(())
    }

    // =========================================================================
    // Restock
    // =========================================================================

    fn restock_products(&mut self) -> Result<()> {
        let mut session = RestockSession::new();
        loop {
            let name: String = Input::with_theme(&self.theme)
                .with_prompt(format!("Product to restock ('{DONE}' to finish)"))
                .interact_text()?;
            if name.trim().eq_ignore_ascii_case(DONE) {
                break;
            }

            let quantity: i64 = Input::with_theme(&self.theme)
                .with_prompt("Quantity to add")
                .validate_with(|q: &i64| {
                    if *q > 0 {
                        Ok(())
                    } else {
                        Err("quantity must be positive")
                    }
                })
                .interact_text()?;
            let cost_price: f64 = Input::with_theme(&self.theme)
                .with_prompt("New cost price")
                .validate_with(|c: &f64| {
                    if *c >= 0.0 {
                        Ok(())
                    } else {
                        Err("cost price cannot be negative")
                    }
                })
                .interact_text()?;

            match session.add_line(&mut self.catalog, &name, quantity, cost_price) {
                Ok(line) => println!(
                    "  {} : {} -> {} units, cost ₹{:.2} -> ₹{:.2}",
                    line.name,
                    line.previous_quantity,
                    line.previous_quantity + line.quantity_added,
                    line.previous_cost_price,
                    line.new_cost_price
                ),
                Err(err) => println!("{}", style(err).red()),
            }
        }

        match session.finish() {
            Some(restock) => {
                info!(lines = restock.lines.len(), cost = restock.total_cost, "restock applied");
                match self.writer.write_restock(&restock) {
                    Ok(path) => println!("Invoice written to {}", style(path.display()).cyan()),
                    Err(err) => {
                        error!(%err, "invoice not written");
                        println!("{}", style(format!("Invoice NOT saved: {err}")).red());
                    }
                }
                self.save_catalog();
            }
            None => println!("{}", style("Nothing restocked.").yellow()),
        }
        Ok(())
    }

    // =========================================================================
    // Edit / Add
    // =========================================================================

    fn edit_products(&mut self) -> Result<()> {
        let choice = Select::with_theme(&self.theme)
            .with_prompt("Edit / Add")
            .items(&["Add new product", "Edit existing product", "Back"])
            .default(0)
            .interact()?;
        match choice {
            0 => self.add_product()?,
            1 => self.edit_product()?,
            _ => {}
        }
        Ok(())
    }

    fn add_product(&mut self) -> Result<()> {
        let name: String = Input::with_theme(&self.theme)
            .with_prompt("Product name")
            .interact_text()?;
        let brand: String = Input::with_theme(&self.theme)
            .with_prompt("Brand (blank for Generic)")
            .allow_empty(true)
            .interact_text()?;
        let quantity: i64 = Input::with_theme(&self.theme)
            .with_prompt("Initial stock")
            .validate_with(|q: &i64| {
                if *q >= 0 {
                    Ok(())
                } else {
                    Err("stock level cannot be negative")
                }
            })
            .interact_text()?;
        let cost_price: f64 = Input::with_theme(&self.theme)
            .with_prompt("Cost price")
            .validate_with(|c: &f64| {
                if *c >= 0.0 {
                    Ok(())
                } else {
                    Err("cost price cannot be negative")
                }
            })
            .interact_text()?;
        let country: String = Input::with_theme(&self.theme)
            .with_prompt("Country (blank for Unknown)")
            .allow_empty(true)
            .interact_text()?;

        let brand = (!brand.trim().is_empty()).then_some(brand);
        let country = (!country.trim().is_empty()).then_some(country);
        match self
            .catalog
            .add_product(&name, brand, quantity, cost_price, country)
        {
            Ok(product) => {
                println!(
                    "Added {} (id {})",
                    style(&product.name).green(),
                    product.id
                );
                self.save_catalog();
            }
            Err(err) => println!("{}", style(err).red()),
        }
        Ok(())
    }

    fn edit_product(&mut self) -> Result<()> {
        let key: String = Input::with_theme(&self.theme)
            .with_prompt("Product name or id")
            .interact_text()?;
        let Some(product) = self.catalog.resolve(&key) else {
            println!("{}", style(format!("Product not found: {key}")).red());
            return Ok(());
        };
        let id = product.id;
        println!(
            "Editing {} ({}, {} in stock)",
            style(&product.name).green(),
            product.brand,
            product.quantity
        );

        let field = Select::with_theme(&self.theme)
            .with_prompt("Field to change")
            .items(&["Name", "Brand", "Quantity", "Cost price", "Country", "Back"])
            .default(0)
            .interact()?;

        let outcome = match field {
            0 => {
                let value: String = Input::with_theme(&self.theme)
                    .with_prompt("New name")
                    .interact_text()?;
                self.catalog.rename(id, &value).map(|old| (old, value))
            }
            1 => {
                let value: String = Input::with_theme(&self.theme)
                    .with_prompt("New brand")
                    .interact_text()?;
                self.catalog.set_brand(id, &value).map(|old| (old, value))
            }
            2 => {
                let value: i64 = Input::with_theme(&self.theme)
                    .with_prompt("New quantity")
                    .interact_text()?;
                self.catalog
                    .set_quantity(id, value)
                    .map(|old| (old.to_string(), value.to_string()))
            }
            3 => {
                let value: f64 = Input::with_theme(&self.theme)
                    .with_prompt("New cost price")
                    .interact_text()?;
                self.catalog
                    .set_cost_price(id, value)
                    .map(|old| (old.to_string(), value.to_string()))
            }
            4 => {
                let value: String = Input::with_theme(&self.theme)
                    .with_prompt("New country")
                    .interact_text()?;
                self.catalog.set_country(id, &value).map(|old| (old, value))
            }
            _ => return Ok(()),
        };

        match outcome {
            Ok((old, new)) => {
                println!("Changed {} to {}", style(old).dim(), style(new).green());
                self.save_catalog();
            }
            Err(err) => println!("{}", style(err).red()),
        }
        Ok(())
    }

    // =========================================================================
    // Persistence
    // =========================================================================

    /// Mirrors the catalog to disk. A failed save keeps the in-memory
    /// state so the next successful operation (or exit retry) can
    /// persist it.
    fn save_catalog(&self) {
        if let Err(err) = product_file::save(self.catalog.products(), &self.products_path) {
            error!(%err, "product file not saved");
            println!(
                "{}",
                style(format!("WARNING: products not saved: {err}")).red()
            );
        }
    }
}
