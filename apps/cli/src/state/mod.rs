//! # State Module
//!
//! State the CLI carries through one invocation.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  run()                                                                 │
//! │   │                                                                     │
//! │   ├── AppConfig ─────── loaded once, passed as &AppConfig              │
//! │   │                                                                     │
//! │   ├── Store ─────────── opened from AppConfig::store_config()          │
//! │   │                                                                     │
//! │   └── InvoiceDraft ──── built per command, passed by value             │
//! │                                                                         │
//! │  Nothing here is global: every command receives what it needs as an   │
//! │  argument and returns its result.                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod draft;

pub use config::{
    AppConfig, ConfigError, DisplaySettings, StorageSettings, ENV_BACKUP_DIR, ENV_DATA_DIR,
};
pub use draft::{InvoiceDraft, RowReport};
