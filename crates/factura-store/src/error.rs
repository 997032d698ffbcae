//! # Storage Error Types
//!
//! Error types for invoice storage operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  std::io::Error / CoreError                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← Adds the action and path that failed       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ApiError (in CLI) ← Error code + exit status                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  User sees: "Failed to write invoice cache/factura_004.txt: ..."       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::io;
use std::path::{Path, PathBuf};

use factura_core::{CoreError, InvoiceNumber};
use thiserror::Error;

/// Storage operation errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No invoice file exists for the requested number.
    ///
    /// ## When This Occurs
    /// - The number was never issued
    /// - The invoice was deleted
    /// - The file was removed by hand
    #[error("Invoice {number} not found")]
    NotFound { number: InvoiceNumber },

    /// A filesystem operation failed.
    ///
    /// ## When This Occurs
    /// - Missing write permission on the invoice or backup directory
    /// - Disk full
    /// - Directory removed while the program runs
    /// - File is not valid UTF-8
    #[error("Failed to {action} {}: {source}", path.display())]
    Storage {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Every 3-digit number has been issued.
    #[error("No invoice numbers left: the highest number ({max}) is already taken")]
    NumbersExhausted { max: u32 },

    /// Business rule violation raised while preparing an invoice.
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl StoreError {
    /// Creates a Storage error for an action on a path.
    pub fn storage(action: &'static str, path: impl AsRef<Path>, source: io::Error) -> Self {
        StoreError::Storage {
            action,
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Returns true for [`StoreError::NotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }
}

/// Result type alias for storage operations.
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message_is_zero_padded() {
        let err = StoreError::NotFound {
            number: InvoiceNumber::new(7).unwrap(),
        };
        assert_eq!(err.to_string(), "Invoice 007 not found");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_storage_message_names_path() {
        let err = StoreError::storage(
            "write invoice",
            "cache/factura_001.txt",
            io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"),
        );
        assert_eq!(
            err.to_string(),
            "Failed to write invoice cache/factura_001.txt: permission denied"
        );
        assert!(!err.is_not_found());
    }
}
