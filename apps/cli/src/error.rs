//! # API Error Type
//!
//! Unified error type for CLI commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Factura                                │
//! │                                                                         │
//! │  factura delete 42 --yes                                               │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<T, ApiError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Store Error? ─── StoreError::NotFound { 042 } ────┐            │  │
//! │  │         │                                          │            │  │
//! │  │         ▼                                          ▼            │  │
//! │  │  Rule Error? ──── CoreError::NoValidItems ────── ApiError ─────►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  stderr: error[NOT_FOUND]: Invoice 042 not found                       │
//! │  exit status: 3                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! With `--json` the error is printed to stdout as
//! `{"code":"NOT_FOUND","message":"..."}` instead.

use std::process::ExitCode;

use serde::Serialize;
use factura_core::CoreError;
use factura_store::StoreError;

use crate::state::ConfigError;

/// API error returned from commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Invoice 042 not found"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Invoice does not exist
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Filesystem operation failed
    StorageError,

    /// A business rule refused the operation
    BusinessLogic,

    /// Configuration could not be loaded
    ConfigError,

    /// Unexpected failure
    Internal,
}

impl ErrorCode {
    /// Machine-readable name, as serialized.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::StorageError => "STORAGE_ERROR",
            ErrorCode::BusinessLogic => "BUSINESS_LOGIC",
            ErrorCode::ConfigError => "CONFIG_ERROR",
            ErrorCode::Internal => "INTERNAL",
        }
    }

    /// Process exit status for this error.
    ///
    /// `2` is left to clap for usage errors.
    pub fn exit_status(&self) -> u8 {
        match self {
            ErrorCode::Internal => 1,
            ErrorCode::NotFound => 3,
            ErrorCode::ValidationError => 4,
            ErrorCode::StorageError => 5,
            ErrorCode::BusinessLogic => 6,
            ErrorCode::ConfigError => 7,
        }
    }
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates a business logic error.
    pub fn business(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::BusinessLogic, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }

    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.code.exit_status())
    }
}

/// Converts storage errors to API errors.
impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { .. } => ApiError::new(ErrorCode::NotFound, err.to_string()),
            StoreError::Storage { .. } => {
                tracing::error!(error = %err, "Storage operation failed");
                ApiError::new(ErrorCode::StorageError, err.to_string())
            }
            StoreError::NumbersExhausted { .. } => ApiError::business(err.to_string()),
            StoreError::Core(core) => core.into(),
        }
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::NoValidItems | CoreError::TooManyItems { .. } => {
                ApiError::business(err.to_string())
            }
            CoreError::InvalidLineItem { .. } => ApiError::validation(err.to_string()),
            CoreError::Validation(e) => ApiError::validation(e.to_string()),
        }
    }
}

/// Converts configuration errors to API errors.
impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        ApiError::new(ErrorCode::ConfigError, err.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::internal(format!("Failed to encode JSON: {}", err))
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "error[{}]: {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;
    use factura_core::{InvoiceNumber, ValidationError};

    #[test]
    fn test_not_found_mapping() {
        let err: ApiError = StoreError::NotFound {
            number: InvoiceNumber::new(42).unwrap(),
        }
        .into();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.to_string(), "error[NOT_FOUND]: Invoice 042 not found");
    }

    #[test]
    fn test_core_mapping() {
        let err: ApiError = StoreError::Core(CoreError::NoValidItems).into();
        assert_eq!(err.code, ErrorCode::BusinessLogic);

        let err: ApiError = CoreError::Validation(ValidationError::Required {
            field: "name".to_string(),
        })
        .into();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "name is required");
    }

    #[test]
    fn test_exit_statuses_are_distinct() {
        let codes = [
            ErrorCode::NotFound,
            ErrorCode::ValidationError,
            ErrorCode::StorageError,
            ErrorCode::BusinessLogic,
            ErrorCode::ConfigError,
            ErrorCode::Internal,
        ];
        let mut statuses: Vec<u8> = codes.iter().map(|c| c.exit_status()).collect();
        statuses.sort();
        statuses.dedup();
        assert_eq!(statuses.len(), codes.len());
        assert!(!statuses.contains(&0));
        assert!(!statuses.contains(&2));
    }

    #[test]
    fn test_json_shape() {
        let err = ApiError::validation("price must be greater than 0");
        let json = serde_json::to_string(&err).unwrap();
        assert_eq!(
            json,
            r#"{"code":"VALIDATION_ERROR","message":"price must be greater than 0"}"#
        );
    }
}
