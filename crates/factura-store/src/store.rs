//! # Store Handle
//!
//! Opens the invoice directory and hands out repositories.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Store Lifecycle                                │
//! │                                                                         │
//! │  CLI startup                                                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreConfig::new(dir) ← Configure layout                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Store::open(config) ← Create invoice dir if missing                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  store.invoices() ──► InvoiceRepository (borrows the config)           │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Atomic Writes
//! Every file this crate writes goes through [`write_atomic`]: the bytes land
//! in a temporary file in the destination directory, are flushed to disk,
//! and only then renamed over the final name. A crash mid-write leaves
//! either the old file or the new one, never half of each.

use std::fs;
use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::config::StoreConfig;
use crate::error::{StoreError, StoreResult};
use crate::repository::invoice::InvoiceRepository;

/// Main storage handle providing repository access.
#[derive(Debug, Clone)]
pub struct Store {
    config: StoreConfig,
}

impl Store {
    /// Opens the store described by `config`.
    ///
    /// ## What This Does
    /// 1. Creates the invoice directory if missing (and `create_dirs` is set)
    /// 2. Fails with `StoreError::Storage` if the directory is unusable
    ///
    /// The backup directory is created lazily by the first backup.
    pub fn open(config: StoreConfig) -> StoreResult<Self> {
        info!(
            invoice_dir = %config.invoice_dir.display(),
            "Opening invoice store"
        );

        if config.create_dirs {
            fs::create_dir_all(&config.invoice_dir).map_err(|e| {
                StoreError::storage("create invoice directory", &config.invoice_dir, e)
            })?;
        }

        let meta = fs::metadata(&config.invoice_dir)
            .map_err(|e| StoreError::storage("open invoice directory", &config.invoice_dir, e))?;
        if !meta.is_dir() {
            return Err(StoreError::storage(
                "open invoice directory",
                &config.invoice_dir,
                std::io::Error::new(std::io::ErrorKind::Other, "not a directory"),
            ));
        }

        debug!("Invoice store ready");
        Ok(Store { config })
    }

    /// Returns the configuration the store was opened with.
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Returns the invoice repository.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let invoices = store.invoices().list()?;
    /// ```
    pub fn invoices(&self) -> InvoiceRepository<'_> {
        InvoiceRepository::new(&self.config)
    }
}

// =============================================================================
// Atomic Write Helpers
// =============================================================================

/// Stages `contents` in a temp file next to `path` and flushes it.
pub(crate) fn stage(path: &Path, contents: &[u8]) -> StoreResult<NamedTempFile> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));

    let mut tmp = NamedTempFile::new_in(dir)
        .map_err(|e| StoreError::storage("create temp file in", dir, e))?;
    tmp.write_all(contents)
        .map_err(|e| StoreError::storage("write temp file for", path, e))?;
    tmp.as_file()
        .sync_all()
        .map_err(|e| StoreError::storage("flush temp file for", path, e))?;

    Ok(tmp)
}

/// Writes `contents` to `path`, replacing any existing file atomically.
pub(crate) fn write_atomic(path: &Path, contents: &[u8]) -> StoreResult<()> {
    let tmp = stage(path, contents)?;
    tmp.persist(path)
        .map_err(|e| StoreError::storage("replace", path, e.error))?;
    Ok(())
}
