//! # Invoice Commands

use std::path::PathBuf;

use serde::Serialize;
use tracing::{debug, info};

use factura_core::validation::{
    validate_price, validate_product_name, validate_quantity, LineItemReport,
};
use factura_core::{InvoiceNumber, InvoiceSummary, InvoiceTotals, LineItem, Money, ValidationError};
use factura_store::Store;

use crate::error::ApiError;
use crate::state::InvoiceDraft;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedInvoiceResponse {
    pub number: InvoiceNumber,
    pub file_name: String,
    pub path: PathBuf,
    pub item_count: usize,
    pub totals: InvoiceTotals,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceDetail {
    #[serde(flatten)]
    pub summary: InvoiceSummary,
    pub items: Vec<LineItem>,
    /// Recomputed from the parsed items.
    pub totals: InvoiceTotals,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResponse {
    pub number: InvoiceNumber,
    pub deleted: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupResponse {
    pub number: InvoiceNumber,
    pub path: PathBuf,
}

/// Saves a new invoice from the draft rows.
///
/// Every row must be valid; nothing is silently dropped.
pub fn create_invoice(
    store: &Store,
    draft: &InvoiceDraft,
) -> Result<SavedInvoiceResponse, ApiError> {
    debug!(rows = draft.rows().len(), "create_invoice command");

    let prepared = draft.prepare_strict()?;
    let repo = store.invoices();
    let saved = repo.save(&prepared.items, &prepared.totals)?;

    Ok(SavedInvoiceResponse {
        number: saved.number,
        file_name: repo.file_name(saved.number),
        path: saved.path,
        item_count: prepared.items.len(),
        totals: prepared.totals,
    })
}

/// Replaces the items of an existing invoice. The number is kept.
pub fn edit_invoice(
    store: &Store,
    number: InvoiceNumber,
    draft: &InvoiceDraft,
) -> Result<SavedInvoiceResponse, ApiError> {
    debug!(number = %number, "edit_invoice command");

    let repo = store.invoices();
    if !repo.exists(number) {
        return Err(factura_store::StoreError::NotFound { number }.into());
    }

    let prepared = draft.prepare_strict()?;
    repo.update(number, &prepared.items, &prepared.totals)?;

    Ok(SavedInvoiceResponse {
        number,
        file_name: repo.file_name(number),
        path: repo.path_for(number),
        item_count: prepared.items.len(),
        totals: prepared.totals,
    })
}

/// Loads an invoice into a draft for editing.
pub fn open_for_edit(store: &Store, number: InvoiceNumber) -> Result<InvoiceDraft, ApiError> {
    let items = store.invoices().load_items(number)?;
    Ok(InvoiceDraft::for_invoice(number, items))
}

/// Summary, parsed items and recomputed totals of one invoice.
pub fn show_invoice(store: &Store, number: InvoiceNumber) -> Result<InvoiceDetail, ApiError> {
    debug!(number = %number, "show_invoice command");

    let repo = store.invoices();
    let summary = repo.load(number)?;
    let invoice = repo.load_invoice(number)?;

    Ok(InvoiceDetail {
        summary,
        items: invoice.items,
        totals: invoice.totals,
    })
}

/// The invoice file exactly as stored.
pub fn show_raw(store: &Store, number: InvoiceNumber) -> Result<String, ApiError> {
    Ok(store.invoices().read_raw(number)?)
}

/// All invoices, sorted by number.
pub fn list_invoices(store: &Store) -> Result<Vec<InvoiceSummary>, ApiError> {
    debug!("list_invoices command");
    Ok(store.invoices().list()?)
}

/// The number the next `create` will receive.
pub fn next_number(store: &Store) -> Result<InvoiceNumber, ApiError> {
    Ok(store.invoices().next_invoice_number()?)
}

/// Deletes an invoice after explicit confirmation.
///
/// ## Confirmation Flow
/// ```text
/// factura delete 7        → BUSINESS_LOGIC "needs --yes", nothing removed
/// factura delete 7 --yes  → file removed, number 007 retired
/// ```
pub fn delete_invoice(
    store: &Store,
    number: InvoiceNumber,
    confirmed: bool,
) -> Result<DeleteResponse, ApiError> {
    let repo = store.invoices();

    // Report a missing invoice before asking for confirmation.
    if !repo.exists(number) {
        return Err(factura_store::StoreError::NotFound { number }.into());
    }

    if !confirmed {
        return Err(ApiError::business(format!(
            "Deleting invoice {} is permanent; pass --yes to confirm",
            number
        )));
    }

    repo.delete(number)?;
    info!(number = %number, "Invoice deleted by user");

    Ok(DeleteResponse {
        number,
        deleted: true,
    })
}

/// Copies an invoice to the backup directory.
pub fn backup_invoice(store: &Store, number: InvoiceNumber) -> Result<BackupResponse, ApiError> {
    let path = store.invoices().backup(number)?;
    Ok(BackupResponse { number, path })
}

/// Checks one product entry given as raw text.
///
/// Text that is not a number is reported like any other rule failure
/// rather than rejected outright.
pub fn validate_item(name: &str, price: &str, quantity: &str) -> LineItemReport {
    let price_check = price
        .parse::<Money>()
        .map_err(|_| invalid_number("price", price))
        .and_then(validate_price);

    let quantity_check = quantity
        .trim()
        .parse::<i64>()
        .map_err(|_| invalid_number("quantity", quantity))
        .and_then(validate_quantity);

    let errors: Vec<String> = [validate_product_name(name), price_check, quantity_check]
        .into_iter()
        .filter_map(Result::err)
        .map(|e| e.to_string())
        .collect();

    LineItemReport {
        valid: errors.is_empty(),
        errors,
    }
}

fn invalid_number(field: &str, input: &str) -> ValidationError {
    ValidationError::InvalidFormat {
        field: field.to_string(),
        reason: format!("'{}' is not a number", input.trim()),
    }
}
