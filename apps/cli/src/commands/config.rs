//! # Config Commands

use tracing::debug;

use crate::state::AppConfig;

/// Gets the effective configuration.
///
/// ## When Used
/// - `factura config` (check which directories are in use)
/// - Troubleshooting env / flag overrides
pub fn get_config(config: &AppConfig) -> AppConfig {
    debug!("get_config command");
    config.clone()
}
