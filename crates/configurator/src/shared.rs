use configurator_core::{OptionMap, OptionValue, Result};
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::sync::Arc;

use crate::access::{ConfigAccess, OptionAccess};
use crate::store::Configurator;

/// A [`Configurator`] shared across threads.
///
/// Each operation runs under a single lock acquisition, so a consumed option
/// is never observed by another thread once its value has been returned.
/// Clones share the same store.
#[derive(Debug, Clone, Default)]
pub struct SharedConfigurator {
    inner: Arc<RwLock<Configurator>>,
}

impl SharedConfigurator {
    pub fn new(config: Configurator) -> Self {
        Self {
            inner: Arc::new(RwLock::new(config)),
        }
    }

    /// Read guard for multi-step reads.
    pub fn read(&self) -> RwLockReadGuard<'_, Configurator> {
        self.inner.read()
    }

    /// Write guard for multi-step transactions.
    pub fn write(&self) -> RwLockWriteGuard<'_, Configurator> {
        self.inner.write()
    }

    /// Clone of the current mapping.
    pub fn snapshot(&self) -> OptionMap {
        self.inner.read().get_config().clone()
    }

    pub fn set_config(&self, values: OptionMap) -> &Self {
        self.inner.write().set_config(values);
        self
    }

    pub fn merge_config(&self, values: OptionMap, invert: bool) -> &Self {
        self.inner.write().merge_config(values, invert);
        self
    }

    pub fn flush_config<I, S>(&self, names: I) -> &Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.inner.write().flush_config(names);
        self
    }

    pub fn clear_config(&self) -> &Self {
        self.inner.write().clear_config();
        self
    }

    pub fn set_option(&self, name: &str, value: impl Into<OptionValue>) -> Result<&Self> {
        self.inner.write().set_option(name, value)?;
        Ok(self)
    }

    /// Clone of the value stored under `name`.
    pub fn get_option(&self, name: &str) -> Result<Option<OptionValue>> {
        Ok(self.inner.read().get_option(name)?.cloned())
    }

    pub fn has_option(&self, name: &str) -> Result<bool> {
        self.inner.read().has_option(name)
    }

    pub fn consume_option(&self, name: &str) -> Result<Option<OptionValue>> {
        self.inner.write().consume_option(name)
    }

    pub fn flush_option(&self, name: &str) -> Result<&Self> {
        self.inner.write().flush_option(name)?;
        Ok(self)
    }

    pub fn transient_option(&self, name: &str, value: impl Into<OptionValue>) -> Result<&Self> {
        self.inner.write().transient_option(name, value)?;
        Ok(self)
    }

    pub fn push_option<I>(&self, name: &str, fragments: I) -> Result<&Self>
    where
        I: IntoIterator,
        I::Item: Into<OptionValue>,
    {
        self.inner.write().push_option(name, fragments)?;
        Ok(self)
    }
}

impl From<Configurator> for SharedConfigurator {
    fn from(config: Configurator) -> Self {
        Self::new(config)
    }
}
