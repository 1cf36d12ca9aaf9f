//! # configurator
//!
//! A mutable, in-memory key-value configuration container meant to be embedded
//! in other components. Options live in one insertion-ordered mapping and are
//! manipulated through bulk operations ([`ConfigAccess`]) and per-option
//! operations ([`OptionAccess`]) that validate option names first.
//!
//! [`SharedConfigurator`] wraps a store in a lock for use across threads.

pub mod access;
pub mod shared;
pub mod store;
pub mod validate;

pub use access::{ConfigAccess, OptionAccess};
pub use configurator_core::{option_map, ConfiguratorError, OpaqueValue, OptionMap, OptionValue, Result};
pub use shared::SharedConfigurator;
pub use store::Configurator;
pub use validate::validate_name;

/// Everything needed to use a configurator, including the operation traits.
pub mod prelude {
    pub use crate::access::{ConfigAccess, OptionAccess};
    pub use crate::shared::SharedConfigurator;
    pub use crate::store::Configurator;
    pub use configurator_core::{option_map, OptionMap, OptionValue};
}
