//! # Domain Types
//!
//! Core domain types used throughout Factura.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    LineItem     │   │  InvoiceTotals  │   │  InvoiceNumber  │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  name           │   │  subtotal       │   │  1..=999        │       │
//! │  │  unit_price     │   │  tax (IGV)      │   │  shown as "007" │       │
//! │  │  quantity       │   │  grand_total    │   │                 │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │     Invoice     │   │ InvoiceSummary  │   │  InvoiceStats   │       │
//! │  │  number         │   │  number, total  │   │  count          │       │
//! │  │  items, totals  │   │  size, mtime    │   │  sum, average   │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! An invoice is identified only by its number. The number is assigned once
//! by the repository and never changes, not even when the invoice is edited.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;
use crate::validation::validate_invoice_number;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// 1 basis point = 0.01%, so IGV (18%) is 1800 bps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// One product row of an invoice.
///
/// A `LineItem` is plain data: it may hold whatever a user typed. Use
/// [`crate::validation::validate_line_item`] before trusting it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Product name as shown on the invoice.
    pub name: String,

    /// Unit price.
    pub unit_price: Money,

    /// Quantity sold.
    pub quantity: i64,
}

impl LineItem {
    /// Creates a new line item.
    pub fn new(name: impl Into<String>, unit_price: Money, quantity: i64) -> Self {
        LineItem {
            name: name.into(),
            unit_price,
            quantity,
        }
    }

    /// Line total (unit price × quantity).
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Invoice Totals
// =============================================================================

/// Derived amounts of an invoice.
///
/// ## Invariants
/// - `tax` = `subtotal` × IGV
/// - `grand_total` = `subtotal` + `tax`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceTotals {
    pub subtotal: Money,
    pub tax: Money,
    pub grand_total: Money,
}

// =============================================================================
// Invoice Number
// =============================================================================

/// Sequential invoice number, 1 to 999.
///
/// `Display` zero-pads to three digits (`7` → `"007"`), which is the form
/// embedded in file names and shown to users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, TS)]
#[ts(export)]
pub struct InvoiceNumber(u32);

impl InvoiceNumber {
    /// Creates an invoice number, rejecting values outside 1..=999.
    pub fn new(value: u32) -> Result<Self, ValidationError> {
        validate_invoice_number(value as i64)?;
        Ok(InvoiceNumber(value))
    }

    /// The first number ever issued.
    pub const FIRST: InvoiceNumber = InvoiceNumber(1);

    /// Returns the numeric value.
    #[inline]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for InvoiceNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:03}", self.0)
    }
}

/// Accepts `7`, `007` and surrounding whitespace.
impl FromStr for InvoiceNumber {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: u32 = s.trim().parse().map_err(|_| ValidationError::InvalidFormat {
            field: "invoice number".to_string(),
            reason: format!("'{}' is not a whole number", s.trim()),
        })?;
        InvoiceNumber::new(value)
    }
}

/// Serialized as a bare number.
impl Serialize for InvoiceNumber {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u32(self.0)
    }
}

/// Deserializing goes through the same range check as [`InvoiceNumber::new`].
impl<'de> Deserialize<'de> for InvoiceNumber {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = u32::deserialize(deserializer)?;
        InvoiceNumber::new(value).map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// Invoice
// =============================================================================

/// A fully parsed invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub number: InvoiceNumber,
    pub items: Vec<LineItem>,
    pub totals: InvoiceTotals,
}

impl Invoice {
    /// Builds an invoice from parsed items, recomputing the totals.
    ///
    /// Stored files carry their own totals, but the item rows are the
    /// source of truth: totals are always re-derived from them.
    pub fn from_items(number: InvoiceNumber, items: Vec<LineItem>) -> Self {
        let totals = crate::totals::compute_totals(&items);
        Invoice {
            number,
            items,
            totals,
        }
    }
}

// =============================================================================
// Summaries
// =============================================================================

/// Cheap view of a stored invoice: total read via the summary fast path
/// plus file metadata. No line items are parsed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceSummary {
    pub number: InvoiceNumber,

    /// File name inside the invoice directory, e.g. `factura_007.txt`.
    pub file_name: String,

    /// Grand total exactly as written in the file, e.g. `"29.50"`.
    pub total: String,

    pub size_bytes: u64,

    #[ts(as = "String")]
    pub modified_at: DateTime<Utc>,
}

impl InvoiceSummary {
    /// File size in kilobytes, rounded to two decimals.
    pub fn size_kb(&self) -> f64 {
        (self.size_bytes as f64 / 1024.0 * 100.0).round() / 100.0
    }
}

/// Dashboard aggregate over every stored invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceStats {
    pub count: usize,
    pub total_amount: Money,
    pub average: Money,

    /// Combined size of all invoice files.
    pub total_size_bytes: u64,
}

impl InvoiceStats {
    /// Builds the aggregate from a count, a sum and the combined file size;
    /// average is truncated to the céntimo.
    pub fn from_sum(count: usize, total_amount: Money, total_size_bytes: u64) -> Self {
        let average = if count == 0 {
            Money::zero()
        } else {
            Money::from_cents(total_amount.cents() / count as i64)
        };
        InvoiceStats {
            count,
            total_amount,
            average,
            total_size_bytes,
        }
    }

    /// Storage used, in kilobytes rounded to two decimals.
    pub fn size_kb(&self) -> f64 {
        (self.total_size_bytes as f64 / 1024.0 * 100.0).round() / 100.0
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tax_rate_from_bps() {
        let rate = TaxRate::from_bps(1800);
        assert_eq!(rate.bps(), 1800);
        assert!((rate.percentage() - 18.0).abs() < 0.001);
    }

    #[test]
    fn test_line_total() {
        let item = LineItem::new("Pizza Margarita", Money::from_cents(1250), 3);
        assert_eq!(item.line_total().cents(), 3750);
    }

    #[test]
    fn test_invoice_number_display_is_zero_padded() {
        assert_eq!(InvoiceNumber::new(7).unwrap().to_string(), "007");
        assert_eq!(InvoiceNumber::new(42).unwrap().to_string(), "042");
        assert_eq!(InvoiceNumber::new(999).unwrap().to_string(), "999");
    }

    #[test]
    fn test_invoice_number_bounds() {
        assert!(InvoiceNumber::new(0).is_err());
        assert!(InvoiceNumber::new(1).is_ok());
        assert!(InvoiceNumber::new(999).is_ok());
        assert!(InvoiceNumber::new(1000).is_err());
    }

    #[test]
    fn test_invoice_number_parsing() {
        assert_eq!("7".parse::<InvoiceNumber>().unwrap().get(), 7);
        assert_eq!("007".parse::<InvoiceNumber>().unwrap().get(), 7);
        assert_eq!(" 12 ".parse::<InvoiceNumber>().unwrap().get(), 12);
        assert!("abc".parse::<InvoiceNumber>().is_err());
        assert!("-1".parse::<InvoiceNumber>().is_err());
        assert!("1000".parse::<InvoiceNumber>().is_err());
    }

    #[test]
    fn test_invoice_number_serde_rejects_out_of_range() {
        let number: InvoiceNumber = serde_json::from_str("5").unwrap();
        assert_eq!(number.get(), 5);
        assert!(serde_json::from_str::<InvoiceNumber>("0").is_err());
        assert_eq!(serde_json::to_string(&number).unwrap(), "5");
    }

    #[test]
    fn test_line_item_wire_format_is_camel_case() {
        let item = LineItem::new("Ceviche", Money::from_cents(2500), 1);
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["name"], "Ceviche");
        assert_eq!(json["unitPrice"], 2500);
        assert_eq!(json["quantity"], 1);
    }

    #[test]
    fn test_invoice_from_items_recomputes_totals() {
        let invoice = Invoice::from_items(
            InvoiceNumber::FIRST,
            vec![
                LineItem::new("Lomo Saltado", Money::from_cents(1000), 2),
                LineItem::new("Inca Kola", Money::from_cents(500), 1),
            ],
        );
        assert_eq!(invoice.totals.subtotal.cents(), 2500);
        assert_eq!(invoice.totals.tax.cents(), 450);
        assert_eq!(invoice.totals.grand_total.cents(), 2950);
    }

    #[test]
    fn test_stats_average() {
        let stats = InvoiceStats::from_sum(3, Money::from_cents(1000), 3072);
        assert_eq!(stats.average.cents(), 333);
        assert_eq!(stats.size_kb(), 3.0);

        let empty = InvoiceStats::from_sum(0, Money::zero(), 0);
        assert!(empty.average.is_zero());
        assert_eq!(empty.size_kb(), 0.0);
    }

    #[test]
    fn test_summary_size_kb() {
        let summary = InvoiceSummary {
            number: InvoiceNumber::FIRST,
            file_name: "factura_001.txt".to_string(),
            total: "29.50".to_string(),
            size_bytes: 1536,
            modified_at: Utc::now(),
        };
        assert!((summary.size_kb() - 1.5).abs() < f64::EPSILON);
    }
}
