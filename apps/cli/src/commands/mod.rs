//! # Commands Module
//!
//! Every operation the `factura` binary exposes.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs        ◄─── You are here (exports)
//! ├── invoice.rs    ◄─── create, edit, show, list, delete, backup, validate
//! ├── dashboard.rs  ◄─── count / sum / average over all invoices
//! └── config.rs     ◄─── effective configuration
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  $ factura show 7 --json                                                │
//! │         │                                                               │
//! │         │ (clap parses into Command::Show)                              │
//! │         ▼                                                               │
//! │  fn show_invoice(                                                       │
//! │      store: &Store,          ◄── Opened once in run()                   │
//! │      number: InvoiceNumber,  ◄── From the argument                      │
//! │  ) -> Result<InvoiceDetail, ApiError>                                   │
//! │         │                                                               │
//! │         │ (text or JSON rendering in lib.rs)                            │
//! │         ▼                                                               │
//! │  stdout                                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Command functions never print. They take their inputs as arguments and
//! return serializable responses, which keeps them callable from tests or
//! from another front end.

pub mod config;
pub mod dashboard;
pub mod invoice;
