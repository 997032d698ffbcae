//! # Dashboard Commands
//!
//! Aggregates shown on the start screen: how many invoices exist, what they
//! add up to and the average ticket.

use tracing::debug;

use factura_core::InvoiceStats;
use factura_store::Store;

use crate::error::ApiError;

/// Count, sum and average of all stored invoice totals.
pub fn get_stats(store: &Store) -> Result<InvoiceStats, ApiError> {
    debug!("get_stats command");
    Ok(store.invoices().stats()?)
}
