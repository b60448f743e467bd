//! # shopkeep-store: Persistence Layer for Shopkeep
//!
//! This crate provides the two durable surfaces of the system: the
//! line-delimited product file and the human-readable invoice
//! documents. It depends on shopkeep-core for the domain types and
//! never contains business rules of its own.
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                       Shopkeep Data Flow                            │
//! │                                                                     │
//! │  startup:   product_file::load ──► Vec<Product> ──► Catalog         │
//! │                                                                     │
//! │  sale:      SaleDraft::commit ──► Sale record                       │
//! │                  │                   │                              │
//! │                  │                   ▼                              │
//! │                  │         InvoiceWriter::write_sale                │
//! │                  ▼                                                  │
//! │             product_file::save (temp file + rename)                 │
//! │                                                                     │
//! │  restock:   RestockSession::finish ──► Restock record               │
//! │                  │                        │                         │
//! │                  ▼                        ▼                         │
//! │             product_file::save   InvoiceWriter::write_restock       │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`product_file`] - load/save of the five-field comma-delimited file
//! - [`invoice`] - rendering Sale/Restock records to timestamped text
//! - [`error`] - persistence error types

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod invoice;
pub mod product_file;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{StoreError, StoreResult};
pub use invoice::InvoiceWriter;
pub use product_file::{load, save, LoadOutcome};
