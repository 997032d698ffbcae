//! # factura-core: Pure Business Logic for Factura
//!
//! This crate is the **heart** of the invoicing tool. It contains all business
//! logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Factura Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                Presentation (CLI / any front end)               │   │
//! │  │    create ──► list ──► show ──► edit ──► delete ──► backup      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ factura-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │  totals   │  │   codec   │  │   │
//! │  │   │ LineItem  │  │   Money   │  │ subtotal  │  │  render   │  │   │
//! │  │   │ InvoiceNo │  │  TaxRate  │  │ IGV 18%   │  │  parse    │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                        ┌────────────┐                           │   │
//! │  │                        │ validation │                           │   │
//! │  │                        └────────────┘                           │   │
//! │  │   NO I/O • NO FILESYSTEM • PURE FUNCTIONS                       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                factura-store (Repository Layer)                 │   │
//! │  │           cache/factura_NNN.txt, numbering, backups             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (LineItem, InvoiceNumber, InvoiceTotals, etc.)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`validation`] - Line item validation and text sanitising
//! - [`totals`] - Subtotal / IGV / grand total calculator
//! - [`codec`] - The fixed-width invoice text format
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use factura_core::{compute_totals, LineItem, Money};
//!
//! let items = vec![
//!     LineItem::new("Pizza Margarita", Money::from_cents(1000), 2),
//!     LineItem::new("Chicha Morada", Money::from_cents(500), 1),
//! ];
//!
//! let totals = compute_totals(&items);
//! assert_eq!(totals.subtotal.to_string(), "25.00");
//! assert_eq!(totals.tax.to_string(), "4.50");
//! assert_eq!(totals.grand_total.to_string(), "29.50");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod codec;
pub mod error;
pub mod money;
pub mod totals;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use totals::{collect_valid_items, compute_totals, prepare_invoice, PreparedInvoice};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// IGV (Impuesto General a las Ventas) rate: 18%.
pub const IGV_RATE: types::TaxRate = types::TaxRate::from_bps(1800);

/// Currency marker written in front of every amount in the summary block.
pub const CURRENCY_SYMBOL: &str = "S/.";

/// Maximum unit price of a single product: S/. 10,000.00.
pub const MAX_UNIT_PRICE: Money = Money::from_cents(1_000_000);

/// Maximum quantity of a single line item.
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10)
pub const MAX_ITEM_QUANTITY: i64 = 999;

/// Maximum number of line items on one invoice (the entry form has 10 rows).
pub const MAX_LINE_ITEMS: usize = 10;

/// Highest invoice number the 3-digit naming scheme can hold.
pub const MAX_INVOICE_NUMBER: u32 = 999;

/// Product name length bounds, measured after trimming.
pub const MIN_PRODUCT_NAME_LEN: usize = 2;
pub const MAX_PRODUCT_NAME_LEN: usize = 50;
