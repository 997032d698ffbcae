//! Storage layout configuration.

use std::path::{Path, PathBuf};

/// Where and how invoice files are stored.
///
/// ## Example
/// ```rust
/// use factura_store::StoreConfig;
///
/// let config = StoreConfig::new("/var/lib/factura/cache")
///     .backup_dir("/var/lib/factura/backups")
///     .create_dirs(true);
/// assert_eq!(config.file_prefix, "factura_");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Directory holding one file per invoice.
    /// Default: `cache`
    pub invoice_dir: PathBuf,

    /// Directory receiving timestamped copies.
    /// Default: `backups`
    pub backup_dir: PathBuf,

    /// File name prefix before the 3-digit number.
    /// Default: `factura_`
    pub file_prefix: String,

    /// File name suffix after the 3-digit number.
    /// Default: `.txt`
    pub file_extension: String,

    /// Name of the sequence counter file inside `invoice_dir`.
    /// Default: `.factura_seq`
    pub counter_file: String,

    /// Whether `Store::open` creates missing directories.
    /// Default: true
    pub create_dirs: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig::new("cache")
    }
}

impl StoreConfig {
    /// Creates a configuration for the given invoice directory, with backups
    /// going to `backups` in the working directory.
    pub fn new(invoice_dir: impl Into<PathBuf>) -> Self {
        StoreConfig {
            invoice_dir: invoice_dir.into(),
            backup_dir: PathBuf::from("backups"),
            file_prefix: "factura_".to_string(),
            file_extension: ".txt".to_string(),
            counter_file: ".factura_seq".to_string(),
            create_dirs: true,
        }
    }

    /// Lays out `cache/` and `backups/` under one root directory.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let tmp = tempfile::tempdir()?;
    /// let store = Store::open(StoreConfig::in_dir(tmp.path()))?;
    /// // Store is isolated, perfect for tests
    /// ```
    pub fn in_dir(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        StoreConfig::new(root.join("cache")).backup_dir(root.join("backups"))
    }

    /// Sets the backup directory.
    pub fn backup_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.backup_dir = dir.into();
        self
    }

    /// Sets the file name prefix.
    pub fn file_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.file_prefix = prefix.into();
        self
    }

    /// Sets whether missing directories are created on open.
    pub fn create_dirs(mut self, create: bool) -> Self {
        self.create_dirs = create;
        self
    }

    /// Full path of the sequence counter file.
    pub fn counter_path(&self) -> PathBuf {
        self.invoice_dir.join(&self.counter_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = StoreConfig::default();
        assert_eq!(config.invoice_dir, PathBuf::from("cache"));
        assert_eq!(config.backup_dir, PathBuf::from("backups"));
        assert_eq!(config.file_extension, ".txt");
        assert!(config.create_dirs);
    }

    #[test]
    fn test_config_builder() {
        let config = StoreConfig::new("/tmp/inv")
            .backup_dir("/tmp/bak")
            .file_prefix("inv_")
            .create_dirs(false);

        assert_eq!(config.backup_dir, PathBuf::from("/tmp/bak"));
        assert_eq!(config.file_prefix, "inv_");
        assert!(!config.create_dirs);
        assert_eq!(config.counter_path(), PathBuf::from("/tmp/inv/.factura_seq"));
    }

    #[test]
    fn test_in_dir() {
        let config = StoreConfig::in_dir("/srv/factura");
        assert_eq!(config.invoice_dir, PathBuf::from("/srv/factura/cache"));
        assert_eq!(config.backup_dir, PathBuf::from("/srv/factura/backups"));
    }
}
