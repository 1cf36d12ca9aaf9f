//! # configurator-core
//!
//! Shared vocabulary for the configurator crates: the error taxonomy and the
//! opaque option value model stored by every configuration container.

pub mod error;
pub mod value;

pub use error::{ConfiguratorError, Result};
pub use value::{OpaqueValue, OptionMap, OptionValue};
