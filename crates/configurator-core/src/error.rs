use thiserror::Error;

/// Error type shared by every configurator crate.
///
/// The first two variants are caller-misuse signals: they are returned before
/// the store is touched and are never retried internally.
#[derive(Error, Debug)]
pub enum ConfiguratorError {
    // ── Misuse errors ──────────────────────────────────────────
    #[error("option name must be a valid non-empty string: {reason}")]
    Validation { reason: String },

    #[error("{operation}: expected at least {required} argument(s), got {given}")]
    ArgumentCount {
        operation: &'static str,
        required: usize,
        given: usize,
    },

    // ── Conversion errors ──────────────────────────────────────
    #[error("opaque value of type {type_name} has no serialized form")]
    OpaqueValue { type_name: &'static str },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ConfiguratorError {
    /// Whether this error reports an invalid option name.
    pub fn is_validation(&self) -> bool {
        matches!(self, ConfiguratorError::Validation { .. })
    }

    /// Whether this error reports a missing variadic argument.
    pub fn is_argument_count(&self) -> bool {
        matches!(self, ConfiguratorError::ArgumentCount { .. })
    }
}

pub type Result<T> = std::result::Result<T, ConfiguratorError>;
