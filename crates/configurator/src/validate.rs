use configurator_core::{ConfiguratorError, Result};
use tracing::warn;

/// Check that `name` can be used as an option name.
///
/// Every keyed operation calls this before touching the store, so a failed
/// validation never leaves a partial mutation behind.
pub fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() {
        warn!("rejected empty option name");
        return Err(ConfiguratorError::Validation {
            reason: "name is empty".into(),
        });
    }
    Ok(())
}
