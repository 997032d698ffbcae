//! # factura-store: Flat-File Storage for Factura
//!
//! This crate persists invoices as text files in a single directory.
//! It never decides what an invoice looks like; it asks factura-core
//! to render and parse, then moves bytes on and off the disk.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Factura Data Flow                                │
//! │                                                                         │
//! │  CLI command (factura create --item ...)                               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   factura-store (THIS CRATE)                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │    Store      │    │  Repository   │    │   Counter    │  │   │
//! │  │   │  (store.rs)   │    │ (invoice.rs)  │    │ (counter.rs) │  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │ StoreConfig   │◄───│ save / load   │───►│ .factura_seq │  │   │
//! │  │   │ directories   │    │ update/delete │    │ high-water   │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │   cache/factura_001.txt  cache/factura_002.txt  ...             │   │
//! │  │   backups/factura_001_backup_20240101_120000.txt                │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`config`] - Directory layout and naming settings
//! - [`store`] - Store handle, directory bootstrap
//! - [`counter`] - Persisted invoice number high-water mark
//! - [`error`] - Storage error types
//! - [`repository`] - Invoice repository
//!
//! ## Usage
//!
//! ```rust,no_run
//! use factura_core::{compute_totals, LineItem, Money};
//! use factura_store::{Store, StoreConfig};
//!
//! # fn main() -> Result<(), factura_store::StoreError> {
//! let store = Store::open(StoreConfig::new("cache"))?;
//!
//! let items = vec![LineItem::new("Pizza", Money::from_cents(1000), 2)];
//! let saved = store.invoices().save(&items, &compute_totals(&items))?;
//!
//! for summary in store.invoices().list()? {
//!     println!("{} {}", summary.number, summary.total);
//! }
//! # let _ = saved;
//! # Ok(())
//! # }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod counter;
pub mod error;
pub mod repository;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::StoreConfig;
pub use error::{StoreError, StoreResult};
pub use store::Store;

pub use repository::invoice::{InvoiceRepository, SavedInvoice};
