//! # Repository Module
//!
//! File-backed repository implementations for Factura.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  CLI command                                                           │
//! │       │                                                                 │
//! │       │  store.invoices().load(number)                                 │
//! │       ▼                                                                 │
//! │  InvoiceRepository                                                     │
//! │  ├── next_invoice_number(&self)                                        │
//! │  ├── save(&self, items, totals)                                        │
//! │  ├── load / load_items / read_raw                                      │
//! │  ├── update(&self, number, items, totals)                              │
//! │  ├── list / count / stats                                              │
//! │  └── delete / backup                                                   │
//! │       │                                                                 │
//! │       │  render / parse (factura-core codec)                           │
//! │       ▼                                                                 │
//! │  cache/factura_NNN.txt                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`invoice::InvoiceRepository`] - Invoice numbering, CRUD and backups

pub mod invoice;
