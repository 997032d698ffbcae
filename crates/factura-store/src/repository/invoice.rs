//! # Invoice Repository
//!
//! File operations for invoices.
//!
//! ## Invoice Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Invoice Lifecycle                                 │
//! │                                                                         │
//! │  1. SAVE                                                               │
//! │     └── next_invoice_number() → max(counter, files) + 1                │
//! │     └── render → temp file → rename to factura_NNN.txt (no clobber)    │
//! │     └── counter advanced to NNN                                        │
//! │                                                                         │
//! │  2. READ                                                               │
//! │     └── load() → summary (total via extract_total, size, mtime)        │
//! │     └── load_items() → full parse                                      │
//! │                                                                         │
//! │  3. EDIT                                                               │
//! │     └── update() → re-render in place, same number                     │
//! │                                                                         │
//! │  4. DELETE                                                             │
//! │     └── counter advanced to NNN first, then the file is removed        │
//! │     └── NNN is never issued again                                      │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fs;
use std::io;
use std::path::PathBuf;

use chrono::{DateTime, Local, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};

use factura_core::codec::{extract_total, extract_total_amount, parse, render};
use factura_core::{
    Invoice, InvoiceNumber, InvoiceStats, InvoiceSummary, InvoiceTotals, LineItem, Money,
    MAX_INVOICE_NUMBER,
};

use crate::config::StoreConfig;
use crate::counter::SequenceCounter;
use crate::error::{StoreError, StoreResult};
use crate::store::{stage, write_atomic};

/// Where a newly saved invoice ended up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedInvoice {
    pub number: InvoiceNumber,
    pub path: PathBuf,
}

/// Repository for invoice files.
#[derive(Debug, Clone)]
pub struct InvoiceRepository<'a> {
    config: &'a StoreConfig,
}

impl<'a> InvoiceRepository<'a> {
    /// Creates a new InvoiceRepository.
    pub fn new(config: &'a StoreConfig) -> Self {
        InvoiceRepository { config }
    }

    fn counter(&self) -> SequenceCounter {
        SequenceCounter::new(self.config.counter_path())
    }

    // =========================================================================
    // Naming
    // =========================================================================

    /// Canonical file name, e.g. `factura_007.txt`.
    pub fn file_name(&self, number: InvoiceNumber) -> String {
        format!(
            "{}{}{}",
            self.config.file_prefix, number, self.config.file_extension
        )
    }

    /// Canonical location of an invoice.
    pub fn path_for(&self, number: InvoiceNumber) -> PathBuf {
        self.config.invoice_dir.join(self.file_name(number))
    }

    /// Extracts the number from a canonical file name.
    ///
    /// Only exact canonical names count: `factura_7.txt` or
    /// `factura_007.txt.bak` are not invoices.
    fn number_from_file_name(&self, name: &str) -> Option<InvoiceNumber> {
        let digits = name
            .strip_prefix(self.config.file_prefix.as_str())?
            .strip_suffix(self.config.file_extension.as_str())?;

        if digits.len() != 3 || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }

        digits.parse().ok()
    }

    /// Numbers of every invoice file on disk, unsorted.
    ///
    /// Files that merely look like invoices are logged and ignored.
    fn scan_numbers(&self) -> StoreResult<Vec<InvoiceNumber>> {
        let dir = &self.config.invoice_dir;
        let entries =
            fs::read_dir(dir).map_err(|e| StoreError::storage("read invoice directory", dir, e))?;

        let mut numbers = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| StoreError::storage("read invoice directory", dir, e))?;
            let name = entry.file_name();
            let Some(name) = name.to_str() else {
                continue;
            };

            if !name.starts_with(self.config.file_prefix.as_str())
                || !name.ends_with(self.config.file_extension.as_str())
            {
                continue;
            }

            match self.number_from_file_name(name) {
                Some(number) => numbers.push(number),
                None => warn!(file = %name, "Ignoring malformed invoice file name"),
            }
        }

        Ok(numbers)
    }

    // =========================================================================
    // Numbering
    // =========================================================================

    /// Returns the number the next save will receive.
    ///
    /// `max(highest number on disk, persisted counter) + 1`, so deleted
    /// numbers are never handed out again and gaps are never filled.
    pub fn next_invoice_number(&self) -> StoreResult<InvoiceNumber> {
        let on_disk = self
            .scan_numbers()?
            .into_iter()
            .map(|n| n.get())
            .max()
            .unwrap_or(0);
        let recorded = self.counter().read()?;

        next_after(on_disk.max(recorded))
    }

    // =========================================================================
    // Create
    // =========================================================================

    /// Renders and stores a new invoice under the next free number.
    ///
    /// The file is written to a temp file first and renamed into place
    /// without clobbering. If another writer took the number in between,
    /// the save moves on to the following number.
    pub fn save(&self, items: &[LineItem], totals: &InvoiceTotals) -> StoreResult<SavedInvoice> {
        let text = render(items, totals);
        let mut number = self.next_invoice_number()?;

        loop {
            let path = self.path_for(number);
            let tmp = stage(&path, text.as_bytes())?;

            match tmp.persist_noclobber(&path) {
                Ok(_) => {
                    if let Err(e) = self.counter().advance_to(number.get()) {
                        // The file itself is the record; the scan still sees it.
                        warn!(number = %number, error = %e, "Could not advance sequence counter");
                    }
                    info!(number = %number, path = %path.display(), total = %totals.grand_total, "Invoice saved");
                    return Ok(SavedInvoice { number, path });
                }
                Err(e) if e.error.kind() == io::ErrorKind::AlreadyExists => {
                    debug!(number = %number, "Invoice number taken concurrently, trying next");
                    number = next_after(number.get())?;
                }
                Err(e) => return Err(StoreError::storage("write invoice", &path, e.error)),
            }
        }
    }

    // =========================================================================
    // Read
    // =========================================================================

    /// Returns true if a file exists for `number`.
    pub fn exists(&self, number: InvoiceNumber) -> bool {
        self.path_for(number).is_file()
    }

    /// Reads the invoice file exactly as stored.
    pub fn read_raw(&self, number: InvoiceNumber) -> StoreResult<String> {
        let path = self.path_for(number);
        fs::read_to_string(&path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => StoreError::NotFound { number },
            _ => StoreError::storage("read invoice", &path, e),
        })
    }

    /// Loads the summary of one invoice without parsing its items.
    pub fn load(&self, number: InvoiceNumber) -> StoreResult<InvoiceSummary> {
        let path = self.path_for(number);
        let meta = fs::metadata(&path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => StoreError::NotFound { number },
            _ => StoreError::storage("inspect invoice", &path, e),
        })?;

        let modified_at: DateTime<Utc> = meta
            .modified()
            .map(DateTime::<Utc>::from)
            .map_err(|e| StoreError::storage("inspect invoice", &path, e))?;

        let text = self.read_raw(number)?;

        Ok(InvoiceSummary {
            number,
            file_name: self.file_name(number),
            total: extract_total(&text),
            size_bytes: meta.len(),
            modified_at,
        })
    }

    /// Parses the line items of one invoice.
    ///
    /// Unreadable rows are skipped (and logged by the codec).
    pub fn load_items(&self, number: InvoiceNumber) -> StoreResult<Vec<LineItem>> {
        let text = self.read_raw(number)?;
        Ok(parse(&text))
    }

    /// Loads an invoice with its totals recomputed from the parsed items.
    pub fn load_invoice(&self, number: InvoiceNumber) -> StoreResult<Invoice> {
        let items = self.load_items(number)?;
        Ok(Invoice::from_items(number, items))
    }

    /// All invoice summaries, sorted by number ascending.
    pub fn list(&self) -> StoreResult<Vec<InvoiceSummary>> {
        let mut numbers = self.scan_numbers()?;
        numbers.sort();

        let mut summaries = Vec::with_capacity(numbers.len());
        for number in numbers {
            match self.load(number) {
                Ok(summary) => summaries.push(summary),
                // Removed between the scan and the read
                Err(e) if e.is_not_found() => continue,
                Err(e) => return Err(e),
            }
        }

        debug!(count = summaries.len(), "Listed invoices");
        Ok(summaries)
    }

    /// Number of stored invoices.
    pub fn count(&self) -> StoreResult<usize> {
        Ok(self.scan_numbers()?.len())
    }

    /// Count, sum, average and combined file size of every stored invoice.
    ///
    /// Totals are read with the summary fast path; a total that cannot be
    /// read as an amount counts as zero.
    pub fn stats(&self) -> StoreResult<InvoiceStats> {
        let mut count = 0;
        let mut total = Money::zero();
        let mut size_bytes = 0u64;

        for number in self.scan_numbers()? {
            let text = match self.read_raw(number) {
                Ok(text) => text,
                // Removed between the scan and the read
                Err(e) if e.is_not_found() => continue,
                Err(e) => return Err(e),
            };

            count += 1;
            size_bytes += text.len() as u64;
            total += extract_total_amount(&text).unwrap_or_else(|| {
                warn!(
                    number = %number,
                    total = %extract_total(&text),
                    "Unreadable total, counted as 0.00"
                );
                Money::zero()
            });
        }

        debug!(count, size_bytes, total = %total, "Computed invoice stats");
        Ok(InvoiceStats::from_sum(count, total, size_bytes))
    }

    // =========================================================================
    // Update
    // =========================================================================

    /// Re-renders an existing invoice in place. The number never changes.
    pub fn update(
        &self,
        number: InvoiceNumber,
        items: &[LineItem],
        totals: &InvoiceTotals,
    ) -> StoreResult<()> {
        if !self.exists(number) {
            return Err(StoreError::NotFound { number });
        }

        let path = self.path_for(number);
        write_atomic(&path, render(items, totals).as_bytes())?;

        info!(number = %number, total = %totals.grand_total, "Invoice updated");
        Ok(())
    }

    // =========================================================================
    // Delete
    // =========================================================================

    /// Permanently removes an invoice. Its number is retired.
    ///
    /// A missing invoice yields `NotFound` and leaves the store untouched.
    pub fn delete(&self, number: InvoiceNumber) -> StoreResult<()> {
        let path = self.path_for(number);
        if !path.is_file() {
            return Err(StoreError::NotFound { number });
        }

        // Retire the number before the file goes away.
        self.counter().advance_to(number.get())?;

        fs::remove_file(&path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => StoreError::NotFound { number },
            _ => StoreError::storage("delete invoice", &path, e),
        })?;

        info!(number = %number, "Invoice deleted");
        Ok(())
    }

    // =========================================================================
    // Backup
    // =========================================================================

    /// Copies an invoice to the backup directory with a local timestamp.
    ///
    /// Result: `backups/factura_007_backup_20240131_235959.txt`. A second
    /// backup within the same second gets a `_1`, `_2`, ... suffix.
    pub fn backup(&self, number: InvoiceNumber) -> StoreResult<PathBuf> {
        let source = self.path_for(number);
        if !source.is_file() {
            return Err(StoreError::NotFound { number });
        }

        let dir = &self.config.backup_dir;
        fs::create_dir_all(dir).map_err(|e| StoreError::storage("create backup directory", dir, e))?;

        let stem = format!(
            "{}{}_backup_{}",
            self.config.file_prefix,
            number,
            Local::now().format("%Y%m%d_%H%M%S")
        );
        let ext = &self.config.file_extension;

        let mut target = dir.join(format!("{}{}", stem, ext));
        let mut attempt = 1;
        while target.exists() {
            target = dir.join(format!("{}_{}{}", stem, attempt, ext));
            attempt += 1;
        }

        fs::copy(&source, &target).map_err(|e| StoreError::storage("write backup", &target, e))?;

        info!(number = %number, path = %target.display(), "Backup created");
        Ok(target)
    }
}

/// The number following `current`, or `NumbersExhausted` past 999.
fn next_after(current: u32) -> StoreResult<InvoiceNumber> {
    if current >= MAX_INVOICE_NUMBER {
        return Err(StoreError::NumbersExhausted {
            max: MAX_INVOICE_NUMBER,
        });
    }

    InvoiceNumber::new(current + 1).map_err(|e| StoreError::Core(e.into()))
}

// =============================================================================
// Unit Tests
// =============================================================================
