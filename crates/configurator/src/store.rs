use configurator_core::{OptionMap, OptionValue};
use serde::{Deserialize, Serialize};

use crate::access::{ConfigAccess, OptionAccess};

/// An in-memory configuration container.
///
/// Owns a single insertion-ordered mapping from option name to value. All
/// operations come from [`ConfigAccess`] and [`OptionAccess`]:
///
/// ```
/// use configurator::prelude::*;
///
/// let mut config = Configurator::new();
/// config
///     .set_option("foo", "bar")?
///     .push_option("server", [option_map! { "port" => 8080 }])?;
/// assert_eq!(config.consume_option("foo")?, Some(OptionValue::from("bar")));
/// assert!(!config.has_option("foo")?);
/// # Ok::<(), configurator::ConfiguratorError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Configurator {
    config: OptionMap,
}

impl Configurator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.config.len()
    }

    pub fn is_empty(&self) -> bool {
        self.config.is_empty()
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, OptionValue> {
        self.config.iter()
    }

    /// Take the mapping out of the container.
    pub fn into_config(self) -> OptionMap {
        self.config
    }
}

impl ConfigAccess for Configurator {
    fn config(&self) -> &OptionMap {
        &self.config
    }

    fn config_mut(&mut self) -> &mut OptionMap {
        &mut self.config
    }
}

impl OptionAccess for Configurator {}

impl From<OptionMap> for Configurator {
    fn from(config: OptionMap) -> Self {
        Self { config }
    }
}

impl<K, V> FromIterator<(K, V)> for Configurator
where
    K: Into<String>,
    V: Into<OptionValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            config: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

impl IntoIterator for Configurator {
    type Item = (String, OptionValue);
    type IntoIter = indexmap::map::IntoIter<String, OptionValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.config.into_iter()
    }
}

impl<'a> IntoIterator for &'a Configurator {
    type Item = (&'a String, &'a OptionValue);
    type IntoIter = indexmap::map::Iter<'a, String, OptionValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.config.iter()
    }
}
