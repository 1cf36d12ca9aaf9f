use configurator_core::{ConfiguratorError, OptionMap, OptionValue, Result};
use tracing::{debug, trace, warn};

use crate::validate::validate_name;

/// Bulk operations over a configuration mapping.
///
/// Implementors only provide access to the mapping they own; every operation
/// has a provided implementation. Mutators return `&mut Self` so calls chain.
pub trait ConfigAccess {
    /// The mapping backing this container.
    fn config(&self) -> &OptionMap;

    /// Mutable access to the mapping backing this container.
    fn config_mut(&mut self) -> &mut OptionMap;

    /// Replace every option with `values`. Keys are not validated.
    fn set_config(&mut self, values: OptionMap) -> &mut Self {
        debug!(count = values.len(), "replacing configuration");
        *self.config_mut() = values;
        self
    }

    /// All options with their values, in insertion order.
    fn get_config(&self) -> &OptionMap {
        self.config()
    }

    /// Shallow merge of `values` into the current options.
    ///
    /// Incoming values win on conflicting keys unless `invert` is set, in
    /// which case the current values win. Keys present on only one side are
    /// always kept, and nested maps are replaced whole, never merged.
    fn merge_config(&mut self, values: OptionMap, invert: bool) -> &mut Self {
        debug!(count = values.len(), invert, "merging configuration");
        let config = self.config_mut();
        if invert {
            let current = std::mem::take(config);
            let mut merged = values;
            merged.extend(current);
            *config = merged;
        } else {
            config.extend(values);
        }
        self
    }

    /// Remove every listed option. Unknown names are ignored.
    fn flush_config<I, S>(&mut self, names: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let config = self.config_mut();
        for name in names {
            if config.shift_remove(name.as_ref()).is_some() {
                debug!(option = %name.as_ref(), "option flushed");
            }
        }
        self
    }

    /// Remove every option.
    fn clear_config(&mut self) -> &mut Self {
        debug!("clearing configuration");
        self.config_mut().clear();
        self
    }
}

/// Per-option operations. Every method validates the option name first and
/// fails with [`ConfiguratorError::Validation`] before touching the mapping.
pub trait OptionAccess: ConfigAccess {
    /// Set `name` to `value`, replacing any previous value whole.
    fn set_option(&mut self, name: &str, value: impl Into<OptionValue>) -> Result<&mut Self> {
        validate_name(name)?;
        let value = value.into();
        debug!(option = %name, kind = value.kind(), "option set");
        self.config_mut().insert(name.to_string(), value);
        Ok(self)
    }

    /// The value stored under `name`, or `None` when the option is missing.
    ///
    /// A stored null comes back as `Some(OptionValue::Null)`.
    fn get_option(&self, name: &str) -> Result<Option<&OptionValue>> {
        validate_name(name)?;
        let value = self.config().get(name);
        trace!(option = %name, found = value.is_some(), "option read");
        Ok(value)
    }

    /// Whether `name` is present, whatever its value.
    fn has_option(&self, name: &str) -> Result<bool> {
        validate_name(name)?;
        Ok(self.config().contains_key(name))
    }

    /// Read then remove `name`. Missing options leave the mapping untouched.
    fn consume_option(&mut self, name: &str) -> Result<Option<OptionValue>> {
        validate_name(name)?;
        let value = self.config_mut().shift_remove(name);
        if value.is_some() {
            debug!(option = %name, "option consumed");
        }
        Ok(value)
    }

    /// Remove `name` if present.
    fn flush_option(&mut self, name: &str) -> Result<&mut Self> {
        validate_name(name)?;
        if self.config_mut().shift_remove(name).is_some() {
            debug!(option = %name, "option flushed");
        }
        Ok(self)
    }

    /// Upsert `name`, expressed as merging the single-entry map
    /// `{name: value}` with the new value winning.
    fn transient_option(&mut self, name: &str, value: impl Into<OptionValue>) -> Result<&mut Self> {
        validate_name(name)?;
        let single = OptionMap::from([(name.to_string(), value.into())]);
        Ok(self.merge_config(single, false))
    }

    /// Merge the top-level entries of each fragment into the map stored under
    /// `name`.
    ///
    /// The option becomes an empty map first when it is missing or holds a
    /// non-map value. Later fragments overwrite earlier ones on duplicate keys,
    /// and values are stored as-is. Fragments that are not maps are skipped.
    /// Passing no fragment at all fails with
    /// [`ConfiguratorError::ArgumentCount`].
    fn push_option<I>(&mut self, name: &str, fragments: I) -> Result<&mut Self>
    where
        I: IntoIterator,
        I::Item: Into<OptionValue>,
    {
        validate_name(name)?;
        let fragments: Vec<OptionValue> = fragments.into_iter().map(Into::into).collect();
        if fragments.is_empty() {
            warn!(option = %name, "push_option called without fragments");
            return Err(ConfiguratorError::ArgumentCount {
                operation: "push_option",
                required: 1,
                given: 0,
            });
        }

        let config = self.config_mut();
        for fragment in fragments {
            let entries = match fragment {
                OptionValue::Map(entries) => entries,
                other => {
                    debug!(option = %name, kind = other.kind(), "skipping non-map fragment");
                    continue;
                }
            };
            if entries.is_empty() {
                continue;
            }

            let slot = config.entry(name.to_string()).or_default();
            let mut target = match std::mem::take(slot) {
                OptionValue::Map(map) => map,
                OptionValue::Null => OptionMap::new(),
                previous => {
                    debug!(option = %name, kind = previous.kind(), "replacing non-map option with a map");
                    OptionMap::new()
                }
            };
            debug!(option = %name, count = entries.len(), "pushing fragment");
            target.extend(entries);
            *slot = OptionValue::Map(target);
        }
        Ok(self)
    }
}
