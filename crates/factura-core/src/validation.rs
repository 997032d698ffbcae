//! # Validation Module
//!
//! Input validation utilities for invoice line items.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Front end (CLI args / form rows)                             │
//! │  ├── Parsing raw text into Money / i64                                 │
//! │  └── Unparseable input never reaches this module                       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Boolean checks: is_valid_amount_and_quantity, is_valid_product_name│
//! │  ├── Field messages: validate_line_item                                │
//! │  └── Free-text cleanup: sanitize_text                                  │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Codec                                                         │
//! │  └── Fixed-width columns; sanitised names keep it parseable            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use factura_core::money::Money;
//! use factura_core::validation::{is_valid_amount_and_quantity, validate_line_item};
//!
//! assert!(is_valid_amount_and_quantity(Money::from_cents(100), 1));
//! assert!(!is_valid_amount_and_quantity(Money::zero(), 5));
//!
//! let report = validate_line_item("", Money::zero(), 0);
//! assert!(!report.valid);
//! assert_eq!(report.errors.len(), 3);
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;
use crate::{
    MAX_INVOICE_NUMBER, MAX_ITEM_QUANTITY, MAX_LINE_ITEMS, MAX_PRODUCT_NAME_LEN, MAX_UNIT_PRICE,
    MIN_PRODUCT_NAME_LEN,
};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Outcome of [`validate_line_item`]: every failed rule, in rule order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LineItemReport {
    pub valid: bool,
    pub errors: Vec<String>,
}

// =============================================================================
// Boolean Checks
// =============================================================================

/// True iff `0 < price <= 10000.00` and `0 < quantity <= 999`.
///
/// ## Example
/// ```rust
/// use factura_core::money::Money;
/// use factura_core::validation::is_valid_amount_and_quantity;
///
/// assert!(is_valid_amount_and_quantity(Money::from_cents(100), 1));
/// assert!(!is_valid_amount_and_quantity(Money::from_cents(1_000_001), 1));
/// assert!(!is_valid_amount_and_quantity(Money::from_cents(100), 1000));
/// ```
pub fn is_valid_amount_and_quantity(price: Money, quantity: i64) -> bool {
    validate_price(price).is_ok() && validate_quantity(quantity).is_ok()
}

/// True iff the sanitised name has 2 to 50 characters and at least one letter.
pub fn is_valid_product_name(name: &str) -> bool {
    validate_product_name(name).is_ok()
}

// =============================================================================
// Field Validators
// =============================================================================

/// Validates a product name.
///
/// The name is judged as it will be stored, i.e. after [`sanitize_text`]:
/// `"A|"` is stored as `"A"` and therefore too short.
///
/// ## Rules
/// - Sanitised, must not be empty
/// - Between 2 and 50 characters
/// - Contains at least one alphabetic character
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = sanitize_text(name);
    let len = name.chars().count();

    if len == 0 {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if len < MIN_PRODUCT_NAME_LEN {
        return Err(ValidationError::TooShort {
            field: "name".to_string(),
            min: MIN_PRODUCT_NAME_LEN,
        });
    }

    if len > MAX_PRODUCT_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_PRODUCT_NAME_LEN,
        });
    }

    if !name.chars().any(char::is_alphabetic) {
        return Err(ValidationError::InvalidFormat {
            field: "name".to_string(),
            reason: "must contain at least one letter".to_string(),
        });
    }

    Ok(())
}

/// Validates a unit price.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed S/. 10,000.00
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if !price.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "price".to_string(),
        });
    }

    if price > MAX_UNIT_PRICE {
        return Err(ValidationError::ExceedsMaximum {
            field: "price".to_string(),
            max: MAX_UNIT_PRICE.to_string(),
        });
    }

    Ok(())
}

/// Validates a quantity value.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_ITEM_QUANTITY (999)
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::ExceedsMaximum {
            field: "quantity".to_string(),
            max: MAX_ITEM_QUANTITY.to_string(),
        });
    }

    Ok(())
}

/// Validates an invoice number (1 to 999).
pub fn validate_invoice_number(number: i64) -> ValidationResult<()> {
    if !(1..=MAX_INVOICE_NUMBER as i64).contains(&number) {
        return Err(ValidationError::OutOfRange {
            field: "invoice number".to_string(),
            min: 1,
            max: MAX_INVOICE_NUMBER as i64,
        });
    }

    Ok(())
}

/// Validates the number of line items on one invoice (1 to 10).
pub fn validate_item_count(count: usize) -> ValidationResult<()> {
    if count == 0 || count > MAX_LINE_ITEMS {
        return Err(ValidationError::OutOfRange {
            field: "line items".to_string(),
            min: 1,
            max: MAX_LINE_ITEMS as i64,
        });
    }

    Ok(())
}

// =============================================================================
// Aggregated Report
// =============================================================================

/// Runs every line item rule independently and collects the messages.
///
/// Name, price and quantity are checked separately, so one row can report
/// up to three problems at once.
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Row 3: name="", price=0.00, qty=1200                                   │
/// │       │                                                                 │
/// │       ▼                                                                 │
/// │  validate_line_item() ← THIS FUNCTION                                   │
/// │       │                                                                 │
/// │       ├── "name is required"                                            │
/// │       ├── "price must be greater than 0"                                │
/// │       └── "quantity cannot exceed 999"                                  │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn validate_line_item(name: &str, price: Money, quantity: i64) -> LineItemReport {
    let errors: Vec<String> = [
        validate_product_name(name),
        validate_price(price),
        validate_quantity(quantity),
    ]
    .into_iter()
    .filter_map(Result::err)
    .map(|e| e.to_string())
    .collect();

    LineItemReport {
        valid: errors.is_empty(),
        errors,
    }
}

// =============================================================================
// Text Sanitising
// =============================================================================

/// Cleans free text before it is written into the fixed-width format.
///
/// Control characters (newlines, tabs, ...), pipes and quotes become spaces,
/// runs of spaces collapse to one, and the result is trimmed.
///
/// ## Example
/// ```rust
/// use factura_core::validation::sanitize_text;
///
/// assert_eq!(sanitize_text("  Pizza\n|\"Grande\"  "), "Pizza Grande");
/// ```
pub fn sanitize_text(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut last_was_space = false;

    for c in input.chars() {
        let c = if c.is_control() || matches!(c, '|' | '"' | '\'') {
            ' '
        } else {
            c
        };

        if c == ' ' {
            if last_was_space {
                continue;
            }
            last_was_space = true;
        } else {
            last_was_space = false;
        }
        out.push(c);
    }

    out.trim().to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn soles(cents: i64) -> Money {
        Money::from_cents(cents)
    }

    #[test]
    fn test_is_valid_amount_and_quantity() {
        assert!(is_valid_amount_and_quantity(soles(100), 1));
        assert!(is_valid_amount_and_quantity(soles(1_000_000), 999));

        assert!(!is_valid_amount_and_quantity(soles(0), 5));
        assert!(!is_valid_amount_and_quantity(soles(1_000_001), 1));
        assert!(!is_valid_amount_and_quantity(soles(100), 1000));
        assert!(!is_valid_amount_and_quantity(soles(-100), 1));
        assert!(!is_valid_amount_and_quantity(soles(100), 0));
        assert!(!is_valid_amount_and_quantity(soles(100), -3));
    }

    #[test]
    fn test_is_valid_product_name() {
        assert!(is_valid_product_name("Pizza Margarita"));
        assert!(is_valid_product_name("  Ají de Gallina  "));
        assert!(is_valid_product_name("A1"));
        assert!(is_valid_product_name(&"x".repeat(50)));

        assert!(!is_valid_product_name(""));
        assert!(!is_valid_product_name("   "));
        assert!(!is_valid_product_name("P"));
        assert!(!is_valid_product_name("12345"));
        assert!(!is_valid_product_name(&"x".repeat(51)));
    }

    #[test]
    fn test_product_name_is_judged_after_sanitising() {
        assert_eq!(
            validate_product_name("A|"),
            Err(ValidationError::TooShort {
                field: "name".to_string(),
                min: 2,
            })
        );
        assert_eq!(
            validate_product_name("|\"|"),
            Err(ValidationError::Required {
                field: "name".to_string(),
            })
        );
        assert!(!validate_line_item("P\n", soles(100), 1).valid);
        assert!(is_valid_product_name("Lomo | Saltado"));
    }

    #[test]
    fn test_name_length_counts_characters_not_bytes() {
        // 25 two-byte characters: 50 bytes but only 25 characters
        assert!(is_valid_product_name(&"ñ".repeat(25)));
        assert!(is_valid_product_name(&"ñ".repeat(50)));
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(999).is_ok());

        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
        assert!(validate_quantity(1000).is_err());
    }

    #[test]
    fn test_validate_invoice_number() {
        assert!(validate_invoice_number(1).is_ok());
        assert!(validate_invoice_number(999).is_ok());
        assert!(validate_invoice_number(0).is_err());
        assert!(validate_invoice_number(1000).is_err());
    }

    #[test]
    fn test_validate_item_count() {
        assert!(validate_item_count(1).is_ok());
        assert!(validate_item_count(10).is_ok());
        assert!(validate_item_count(0).is_err());
        assert!(validate_item_count(11).is_err());
    }

    #[test]
    fn test_validate_line_item_valid() {
        let report = validate_line_item("Chicha Morada", soles(550), 2);
        assert!(report.valid);
        assert!(report.errors.is_empty());
    }

    #[test]
    fn test_validate_line_item_reports_every_failure() {
        let report = validate_line_item("", soles(0), 1200);
        assert!(!report.valid);
        assert_eq!(
            report.errors,
            vec![
                "name is required".to_string(),
                "price must be greater than 0".to_string(),
                "quantity cannot exceed 999".to_string(),
            ]
        );
    }

    #[test]
    fn test_validate_line_item_specific_messages() {
        let report = validate_line_item("P", soles(1_000_001), 0);
        assert_eq!(
            report.errors,
            vec![
                "name must be at least 2 characters".to_string(),
                "price cannot exceed 10000.00".to_string(),
                "quantity must be greater than 0".to_string(),
            ]
        );

        let report = validate_line_item(&"x".repeat(60), soles(100), 1);
        assert_eq!(report.errors, vec!["name must be at most 50 characters".to_string()]);
    }

    #[test]
    fn test_sanitize_text() {
        assert_eq!(sanitize_text("  Pizza  "), "Pizza");
        assert_eq!(sanitize_text("Pizza\nGrande"), "Pizza Grande");
        assert_eq!(sanitize_text("Pizza\r\n\tGrande"), "Pizza Grande");
        assert_eq!(sanitize_text("Lomo | Saltado"), "Lomo Saltado");
        assert_eq!(sanitize_text("\"Pisco\" 'Sour'"), "Pisco Sour");
        assert_eq!(sanitize_text("a    b     c"), "a b c");
        assert_eq!(sanitize_text(""), "");
        assert_eq!(sanitize_text("|||"), "");
    }
}
