//! # Error Types
//!
//! Domain-specific error types for factura-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  factura-core errors (this file)                                       │
//! │  ├── CoreError        - Invoice-level rule violations                  │
//! │  └── ValidationError  - Field-level input failures                     │
//! │                                                                         │
//! │  factura-store errors (separate crate)                                 │
//! │  └── StoreError       - NotFound, Storage (I/O), NumbersExhausted      │
//! │                                                                         │
//! │  CLI errors (in app)                                                   │
//! │  └── ApiError         - What the user sees (code + message)            │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → StoreError → ApiError → User      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Malformed item lines in a stored invoice are NOT errors: the codec skips
//! them and reports them through [`crate::codec::ParsedInvoice::skipped`].

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// None of the submitted rows is a usable line item.
    ///
    /// ## User Workflow
    /// ```text
    /// Form: 10 rows, all empty or with price 0
    ///      │
    ///      ▼
    /// prepare_invoice() → NoValidItems
    ///      │
    ///      ▼
    /// UI shows: "at least one product with valid price and quantity"
    /// ```
    #[error("Invoice needs at least one product with a valid price and quantity")]
    NoValidItems,

    /// More line items than the invoice layout allows.
    #[error("Invoice cannot have more than {max} line items")]
    TooManyItems { max: usize },

    /// A line item failed validation; carries every message for that row.
    #[error("Line item {index} is invalid: {}", messages.join("; "))]
    InvalidLineItem { index: usize, messages: Vec<String> },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// The `Display` text of each variant is the human-readable message shown
/// next to the offending form field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too short.
    #[error("{field} must be at least {min} characters")]
    TooShort { field: String, min: usize },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be positive.
    #[error("{field} must be greater than 0")]
    MustBePositive { field: String },

    /// Value is above the allowed ceiling.
    #[error("{field} cannot exceed {max}")]
    ExceedsMaximum { field: String, max: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g., not a number, no letters in a name).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
