//! # Totals Calculator
//!
//! Computes subtotal, IGV and grand total from line items.
//!
//! ## Zero-Weighted Rows
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Row                      Counted?   Why                                │
//! │  ─────────────────────    ────────   ─────────────────────────────      │
//! │  Pizza   10.00 x 2        yes        name, price, qty all present       │
//! │  ""      5.00  x 1        no         blank name                         │
//! │  Ceviche 0.00  x 3        no         price not positive                 │
//! │  Pisco   8.00  x 0        no         quantity not positive              │
//! │                                                                         │
//! │  Subtotal = 20.00   IGV = 3.60   TOTAL = 23.60                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A front end keeps showing every row exactly as typed; rows that fail the
//! filter simply weigh nothing.

use tracing::debug;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{InvoiceTotals, LineItem};
use crate::validation::{is_valid_amount_and_quantity, sanitize_text, validate_item_count};
use crate::{IGV_RATE, MAX_LINE_ITEMS};

/// Whether a row contributes to the subtotal.
fn counts_toward_total(item: &LineItem) -> bool {
    !item.name.trim().is_empty() && item.unit_price.is_positive() && item.quantity > 0
}

/// Computes the invoice totals.
///
/// ## Example
/// ```rust
/// use factura_core::{compute_totals, LineItem, Money};
///
/// let totals = compute_totals(&[
///     LineItem::new("Pizza", Money::from_cents(1000), 2),
///     LineItem::new("Inca Kola", Money::from_cents(500), 1),
/// ]);
/// assert_eq!(totals.subtotal.cents(), 2500);
/// assert_eq!(totals.tax.cents(), 450);
/// assert_eq!(totals.grand_total.cents(), 2950);
/// ```
pub fn compute_totals(items: &[LineItem]) -> InvoiceTotals {
    let subtotal: Money = items
        .iter()
        .filter(|item| counts_toward_total(item))
        .map(LineItem::line_total)
        .sum();
    let tax = subtotal.calculate_tax(IGV_RATE);

    InvoiceTotals {
        subtotal,
        tax,
        grand_total: subtotal + tax,
    }
}

/// Keeps only the rows that can be saved, with sanitised names.
///
/// A row survives when its name is non-blank and its price and quantity
/// pass [`is_valid_amount_and_quantity`]. Order is preserved.
pub fn collect_valid_items(rows: &[LineItem]) -> Vec<LineItem> {
    rows.iter()
        .filter(|row| counts_toward_total(row))
        .filter(|row| is_valid_amount_and_quantity(row.unit_price, row.quantity))
        .map(|row| LineItem::new(sanitize_text(&row.name), row.unit_price, row.quantity))
        .filter(|row| !row.name.is_empty())
        .collect()
}

/// Items and totals ready to be handed to the repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedInvoice {
    pub items: Vec<LineItem>,
    pub totals: InvoiceTotals,
}

/// Turns raw form rows into a saveable invoice.
///
/// ## Rules
/// - Invalid rows are dropped (see [`collect_valid_items`])
/// - At least one row must survive, otherwise [`CoreError::NoValidItems`]
/// - At most 10 rows, otherwise [`CoreError::TooManyItems`]
pub fn prepare_invoice(rows: &[LineItem]) -> CoreResult<PreparedInvoice> {
    let items = collect_valid_items(rows);

    if items.is_empty() {
        return Err(CoreError::NoValidItems);
    }

    validate_item_count(items.len()).map_err(|_| CoreError::TooManyItems {
        max: MAX_LINE_ITEMS,
    })?;

    let totals = compute_totals(&items);
    debug!(
        rows = rows.len(),
        kept = items.len(),
        total = %totals.grand_total,
        "Prepared invoice"
    );

    Ok(PreparedInvoice { items, totals })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str, cents: i64, qty: i64) -> LineItem {
        LineItem::new(name, Money::from_cents(cents), qty)
    }

    #[test]
    fn test_compute_totals_basic() {
        let totals = compute_totals(&[item("Pizza", 1000, 2), item("Inca Kola", 500, 1)]);
        assert_eq!(totals.subtotal.to_string(), "25.00");
        assert_eq!(totals.tax.to_string(), "4.50");
        assert_eq!(totals.grand_total.to_string(), "29.50");
    }

    #[test]
    fn test_compute_totals_empty() {
        let totals = compute_totals(&[]);
        assert_eq!(totals, InvoiceTotals::default());
    }

    #[test]
    fn test_invalid_rows_weigh_nothing() {
        let totals = compute_totals(&[
            item("Pizza", 1000, 2),
            item("   ", 500, 1),
            item("Ceviche", 0, 3),
            item("Pisco", 800, 0),
            item("Refund", -500, 1),
        ]);
        assert_eq!(totals.subtotal.cents(), 2000);
        assert_eq!(totals.tax.cents(), 360);
        assert_eq!(totals.grand_total.cents(), 2360);
    }

    #[test]
    fn test_grand_total_is_subtotal_plus_tax() {
        let totals = compute_totals(&[item("Anticucho", 333, 7)]);
        assert_eq!(totals.grand_total, totals.subtotal + totals.tax);
        // 23.31 * 0.18 = 4.1958 → 4.20
        assert_eq!(totals.tax.cents(), 420);
    }

    #[test]
    fn test_collect_valid_items_filters_and_sanitises() {
        let rows = vec![
            item("  Lomo | Saltado ", 2500, 1),
            item("", 1000, 1),
            item("Caro", 1_000_001, 1),
            item("Muchos", 100, 1000),
            item("Papa", 300, 2),
        ];
        let kept = collect_valid_items(&rows);
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0].name, "Lomo Saltado");
        assert_eq!(kept[1].name, "Papa");
    }

    #[test]
    fn test_prepare_invoice_requires_one_valid_item() {
        let err = prepare_invoice(&[item("", 0, 0), item("Pizza", 0, 1)]).unwrap_err();
        assert!(matches!(err, CoreError::NoValidItems));
    }

    #[test]
    fn test_prepare_invoice_caps_item_count() {
        let rows: Vec<LineItem> = (0..11).map(|i| item(&format!("Item {}", i), 100, 1)).collect();
        let err = prepare_invoice(&rows).unwrap_err();
        assert!(matches!(err, CoreError::TooManyItems { max: 10 }));
    }

    #[test]
    fn test_prepare_invoice_computes_totals() {
        let prepared = prepare_invoice(&[item("Pizza", 1000, 2), item("Inca Kola", 500, 1)]).unwrap();
        assert_eq!(prepared.items.len(), 2);
        assert_eq!(prepared.totals.grand_total.cents(), 2950);
    }

    #[test]
    fn test_compute_totals_huge_values_do_not_overflow() {
        let totals = compute_totals(&[
            item("Pizza", i64::MAX / 100, 999),
            item("Inca Kola", 500, 1),
        ]);
        assert_eq!(totals.subtotal, Money::from_cents(i64::MAX));
        assert!(totals.tax.is_positive());
        assert_eq!(totals.grand_total, Money::from_cents(i64::MAX));
    }

    #[test]
    fn test_prepare_invoice_accepts_exactly_ten_items() {
        let rows: Vec<LineItem> = (0..10).map(|i| item(&format!("Plato {}", i), 100, 1)).collect();
        let prepared = prepare_invoice(&rows).unwrap();
        assert_eq!(prepared.items.len(), 10);
    }
}
