//! # Factura Entry Point
//!
//! `factura` manages the invoices of Peru Delivery as fixed-width text files
//! under `cache/`.
//!
//! ## Quick Start
//! ```text
//! $ factura create --item "Pizza Margarita:10.00:2" --item "Chicha Morada:5.00:1"
//! Saved invoice 001 (factura_001.txt)
//!   Subtotal: S/. 25.00
//!   IGV 18%:  S/. 4.50
//!   Total:    S/. 29.50
//!
//! $ factura list
//! 001  factura_001.txt    S/.      29.50     0.51 KB  2026-10-19 12:00
//! ```
//!
//! ## Exit Statuses
//! - 0 success
//! - 2 usage error (clap)
//! - 3 not found, 4 validation, 5 storage, 6 business rule, 7 config, 1 other

use std::process::ExitCode;

fn main() -> ExitCode {
    // The actual setup is in lib.rs for testability
    factura_cli::run()
}
