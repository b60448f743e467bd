//! # Persistence Error Types
//!
//! Error types for filesystem operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                     Error Propagation                               │
//! │                                                                     │
//! │  std::io::Error                                                     │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  StoreError (this module) ← adds the path and the operation         │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  CLI reports it and decides: degrade to empty catalog (load),       │
//! │  keep in-memory state for retry (save), treat invoice as not        │
//! │  durably written (invoice)                                          │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Malformed product lines are NOT errors: they are skipped and counted
//! in [`crate::product_file::LoadOutcome`], because a partially
//! readable file should still yield every valid product.

use std::path::PathBuf;
use thiserror::Error;

/// Filesystem operation errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading the product file failed for a reason other than the
    /// file simply not existing yet.
    #[error("Failed to read product file {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing the product file failed; the in-memory catalog is
    /// unchanged and the caller may retry.
    #[error("Failed to write product file {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An invoice could not be written; the record is NOT durably
    /// saved and the caller must not assume the invoice exists.
    #[error("Failed to write invoice {path}: {source}")]
    InvoiceFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A required directory could not be created.
    #[error("Failed to create directory {path}: {source}")]
    CreateDirFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for persistence operations.
pub type StoreResult<T> = Result<T, StoreError>;
