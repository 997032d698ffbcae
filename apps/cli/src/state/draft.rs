//! # Invoice Draft
//!
//! The rows of an invoice being entered or edited.
//!
//! ## Draft Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Draft Operations                                     │
//! │                                                                         │
//! │  User Action              Draft Method            State Change          │
//! │  ───────────              ────────────            ────────────          │
//! │                                                                         │
//! │  Type into row 3 ────────► set_row(2, ..) ──────► rows[2] = item       │
//! │                                                                         │
//! │  Open invoice 007 ───────► for_invoice(7, ..) ──► rows = parsed items  │
//! │                                                   editing = Some(007)   │
//! │                                                                         │
//! │  Click Clear ────────────► clear() ─────────────► rows.clear()         │
//! │                                                                         │
//! │  Watch totals ───────────► totals() ────────────► (read only)          │
//! │                                                                         │
//! │  Click Save ─────────────► prepare() ───────────► (read only)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The draft is a plain value owned by whoever drives the session. It holds
//! no locks and touches no files; saving goes through the repository.

use serde::{Deserialize, Serialize};

use factura_core::validation::{validate_line_item, LineItemReport};
use factura_core::{
    compute_totals, prepare_invoice, CoreError, CoreResult, InvoiceNumber, InvoiceTotals,
    LineItem, Money, PreparedInvoice, MAX_LINE_ITEMS,
};

/// Validation result for one non-empty row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RowReport {
    /// Zero-based row index.
    pub index: usize,
    #[serde(flatten)]
    pub report: LineItemReport,
}

/// Up to ten editable rows plus the invoice they came from, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceDraft {
    rows: Vec<LineItem>,

    /// Set when the draft edits an existing invoice.
    editing: Option<InvoiceNumber>,
}

impl InvoiceDraft {
    /// Creates an empty draft for a new invoice.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a draft from rows, e.g. command-line `--item` arguments.
    pub fn from_items(items: Vec<LineItem>) -> Self {
        InvoiceDraft {
            rows: items,
            editing: None,
        }
    }

    /// Loads an existing invoice for editing.
    pub fn for_invoice(number: InvoiceNumber, items: Vec<LineItem>) -> Self {
        InvoiceDraft {
            rows: items,
            editing: Some(number),
        }
    }

    /// The invoice being edited, if any.
    pub fn editing(&self) -> Option<InvoiceNumber> {
        self.editing
    }

    pub fn rows(&self) -> &[LineItem] {
        &self.rows
    }

    /// Writes one row, padding with empty rows as needed.
    ///
    /// ## Returns
    /// - `Ok(())` on success
    /// - `Err(CoreError::TooManyItems)` if `index` is past the last row
    pub fn set_row(
        &mut self,
        index: usize,
        name: impl Into<String>,
        unit_price: Money,
        quantity: i64,
    ) -> CoreResult<()> {
        if index >= MAX_LINE_ITEMS {
            return Err(CoreError::TooManyItems {
                max: MAX_LINE_ITEMS,
            });
        }

        if self.rows.len() <= index {
            self.rows
                .resize_with(index + 1, || LineItem::new("", Money::zero(), 0));
        }
        self.rows[index] = LineItem::new(name, unit_price, quantity);
        Ok(())
    }

    /// Empties every row. An edited invoice stays selected.
    pub fn clear(&mut self) {
        self.rows.clear();
    }

    /// Live totals over whatever has been typed; invalid rows weigh nothing.
    pub fn totals(&self) -> InvoiceTotals {
        compute_totals(&self.rows)
    }

    /// Reports for every row the user touched. Fully blank rows are skipped.
    pub fn validation_report(&self) -> Vec<RowReport> {
        self.rows
            .iter()
            .enumerate()
            .filter(|(_, row)| !is_blank(row))
            .map(|(index, row)| RowReport {
                index,
                report: validate_line_item(&row.name, row.unit_price, row.quantity),
            })
            .collect()
    }

    /// Builds the invoice to save, dropping rows that do not qualify.
    pub fn prepare(&self) -> CoreResult<PreparedInvoice> {
        prepare_invoice(&self.rows)
    }

    /// Like [`prepare`](Self::prepare), but any touched row that fails
    /// validation is an error instead of being dropped.
    ///
    /// Used when every row was typed on purpose (command-line arguments).
    pub fn prepare_strict(&self) -> CoreResult<PreparedInvoice> {
        if let Some(bad) = self.validation_report().into_iter().find(|r| !r.report.valid) {
            return Err(CoreError::InvalidLineItem {
                index: bad.index + 1,
                messages: bad.report.errors,
            });
        }

        self.prepare()
    }
}

fn is_blank(row: &LineItem) -> bool {
    row.name.trim().is_empty() && row.unit_price.is_zero() && row.quantity == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn soles(cents: i64) -> Money {
        Money::from_cents(cents)
    }

    #[test]
    fn test_set_row_pads_and_limits() {
        let mut draft = InvoiceDraft::new();
        draft.set_row(2, "Ceviche", soles(3000), 1).unwrap();

        assert_eq!(draft.rows().len(), 3);
        assert_eq!(draft.rows()[2].name, "Ceviche");
        assert!(draft.rows()[0].name.is_empty());

        assert!(draft.set_row(9, "Chicha", soles(500), 1).is_ok());
        assert!(matches!(
            draft.set_row(10, "Extra", soles(100), 1),
            Err(CoreError::TooManyItems { max: 10 })
        ));
    }

    #[test]
    fn test_totals_ignore_invalid_rows() {
        let mut draft = InvoiceDraft::new();
        draft.set_row(0, "Pizza", soles(1000), 2).unwrap();
        draft.set_row(1, "Inca Kola", soles(500), 1).unwrap();
        draft.set_row(2, "Sin precio", soles(0), 4).unwrap();

        let totals = draft.totals();
        assert_eq!(totals.subtotal, soles(2500));
        assert_eq!(totals.tax, soles(450));
        assert_eq!(totals.grand_total, soles(2950));
    }

    #[test]
    fn test_validation_report_skips_blank_rows() {
        let mut draft = InvoiceDraft::new();
        draft.set_row(0, "Pizza", soles(1000), 2).unwrap();
        draft.set_row(3, "", soles(0), 5).unwrap();

        let report = draft.validation_report();
        assert_eq!(report.len(), 2);
        assert!(report[0].report.valid);
        assert_eq!(report[1].index, 3);
        assert!(!report[1].report.valid);
    }

    #[test]
    fn test_prepare_drops_invalid_rows() {
        let mut draft = InvoiceDraft::new();
        draft.set_row(0, "Pizza", soles(1000), 2).unwrap();
        draft.set_row(1, "Sin precio", soles(0), 1).unwrap();

        let prepared = draft.prepare().unwrap();
        assert_eq!(prepared.items.len(), 1);
    }

    #[test]
    fn test_prepare_strict_rejects_invalid_rows() {
        let mut draft = InvoiceDraft::new();
        draft.set_row(0, "Pizza", soles(1000), 2).unwrap();
        draft.set_row(1, "Sin precio", soles(0), 1).unwrap();

        let err = draft.prepare_strict().unwrap_err();
        assert!(matches!(err, CoreError::InvalidLineItem { index: 2, .. }));
    }

    #[test]
    fn test_prepare_strict_judges_name_as_it_will_be_saved() {
        let mut draft = InvoiceDraft::new();
        draft.set_row(0, "A|", soles(1000), 2).unwrap();

        match draft.prepare_strict().unwrap_err() {
            CoreError::InvalidLineItem { index, messages } => {
                assert_eq!(index, 1);
                assert_eq!(messages, vec!["name must be at least 2 characters".to_string()]);
            }
            other => panic!("unexpected error: {:?}", other),
        }

        draft.set_row(0, "Lomo | Saltado", soles(3200), 1).unwrap();
        let prepared = draft.prepare_strict().unwrap();
        assert_eq!(prepared.items[0].name, "Lomo Saltado");
    }

    #[test]
    fn test_empty_draft_cannot_be_saved() {
        let draft = InvoiceDraft::new();
        assert!(matches!(draft.prepare(), Err(CoreError::NoValidItems)));
        assert!(matches!(draft.prepare_strict(), Err(CoreError::NoValidItems)));
    }

    #[test]
    fn test_for_invoice_and_clear() {
        let number = InvoiceNumber::new(7).unwrap();
        let mut draft = InvoiceDraft::for_invoice(number, vec![LineItem::new("Pizza", soles(1000), 1)]);
        assert_eq!(draft.editing(), Some(number));

        draft.clear();
        assert!(draft.rows().is_empty());
        assert_eq!(draft.editing(), Some(number));
    }
}
