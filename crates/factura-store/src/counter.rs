//! # Sequence Counter
//!
//! Persisted high-water mark of issued invoice numbers.
//!
//! ```text
//! cache/.factura_seq  →  "12\n"
//!
//!   save #13     counter 12 → 13
//!   delete #13   counter stays 13   (number retired)
//!   next save    max(counter 13, files 12) + 1 = 14
//! ```
//!
//! The counter only ever moves up. A missing file reads as 0, so a store
//! created by an older tool (files but no counter) keeps numbering from its
//! highest file.

use std::fs;
use std::io;
use std::path::PathBuf;

use tracing::{debug, warn};

use crate::error::{StoreError, StoreResult};
use crate::store::write_atomic;

/// Handle to the counter file.
#[derive(Debug, Clone)]
pub struct SequenceCounter {
    path: PathBuf,
}

impl SequenceCounter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        SequenceCounter { path: path.into() }
    }

    /// Reads the highest number ever issued; 0 when nothing was recorded.
    ///
    /// An unreadable value is logged and treated as 0; the directory scan
    /// still protects every number that has a file.
    pub fn read(&self) -> StoreResult<u32> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(StoreError::storage("read sequence counter", &self.path, e)),
        };

        match text.trim().parse::<u32>() {
            Ok(value) => Ok(value),
            Err(_) => {
                warn!(
                    path = %self.path.display(),
                    content = %text.trim(),
                    "Ignoring malformed sequence counter"
                );
                Ok(0)
            }
        }
    }

    /// Raises the counter to `value` if it is currently lower.
    pub fn advance_to(&self, value: u32) -> StoreResult<()> {
        let current = self.read()?;
        if value <= current {
            return Ok(());
        }

        write_atomic(&self.path, format!("{}\n", value).as_bytes())?;
        debug!(from = current, to = value, "Sequence counter advanced");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counter() -> (tempfile::TempDir, SequenceCounter) {
        let tmp = tempfile::tempdir().unwrap();
        let counter = SequenceCounter::new(tmp.path().join(".factura_seq"));
        (tmp, counter)
    }

    #[test]
    fn test_missing_counter_reads_zero() {
        let (_tmp, counter) = counter();
        assert_eq!(counter.read().unwrap(), 0);
    }

    #[test]
    fn test_advance_only_moves_up() {
        let (_tmp, counter) = counter();

        counter.advance_to(5).unwrap();
        assert_eq!(counter.read().unwrap(), 5);

        counter.advance_to(3).unwrap();
        assert_eq!(counter.read().unwrap(), 5);

        counter.advance_to(9).unwrap();
        assert_eq!(counter.read().unwrap(), 9);
    }

    #[test]
    fn test_malformed_counter_reads_zero() {
        let (tmp, counter) = counter();
        fs::write(tmp.path().join(".factura_seq"), "garbage").unwrap();
        assert_eq!(counter.read().unwrap(), 0);

        counter.advance_to(2).unwrap();
        assert_eq!(counter.read().unwrap(), 2);
    }
}
