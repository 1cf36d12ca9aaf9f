use indexmap::IndexMap;
use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::ser::{self, Serialize, Serializer};
use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::error::{ConfiguratorError, Result};

/// Insertion-ordered mapping from option name to value.
pub type OptionMap = IndexMap<String, OptionValue>;

/// A value stored under an option name.
///
/// The store treats values as opaque: it only looks inside one when pushing
/// fragments into a nested map. `Opaque` carries arbitrary caller objects
/// which round-trip by identity.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum OptionValue {
    #[default]
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    List(Vec<OptionValue>),
    Map(OptionMap),
    Opaque(OpaqueValue),
}

impl OptionValue {
    /// Wrap an arbitrary object so it can be stored as an option.
    pub fn opaque<T: Any + Send + Sync>(value: T) -> Self {
        OptionValue::Opaque(OpaqueValue::new(value))
    }

    /// Short name of the variant, used in log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            OptionValue::Null => "null",
            OptionValue::Bool(_) => "bool",
            OptionValue::Integer(_) => "integer",
            OptionValue::Float(_) => "float",
            OptionValue::String(_) => "string",
            OptionValue::List(_) => "list",
            OptionValue::Map(_) => "map",
            OptionValue::Opaque(_) => "opaque",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, OptionValue::Null)
    }

    pub fn is_map(&self) -> bool {
        matches!(self, OptionValue::Map(_))
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            OptionValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            OptionValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            OptionValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            OptionValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[OptionValue]> {
        match self {
            OptionValue::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&OptionMap> {
        match self {
            OptionValue::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_map_mut(&mut self) -> Option<&mut OptionMap> {
        match self {
            OptionValue::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_opaque(&self) -> Option<&OpaqueValue> {
        match self {
            OptionValue::Opaque(o) => Some(o),
            _ => None,
        }
    }

    /// Borrow the wrapped object of an `Opaque` value as `T`.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.as_opaque().and_then(|o| o.downcast_ref::<T>())
    }
}

// ── Opaque objects ─────────────────────────────────────────────

/// A caller-supplied object of arbitrary type.
///
/// Clones share the same allocation, and equality is pointer identity.
#[derive(Clone)]
pub struct OpaqueValue {
    inner: Arc<dyn Any + Send + Sync>,
    type_name: &'static str,
}

impl OpaqueValue {
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self {
            inner: Arc::new(value),
            type_name: std::any::type_name::<T>(),
        }
    }

    /// Wrap an object the caller already shares.
    pub fn from_arc<T: Any + Send + Sync>(value: Arc<T>) -> Self {
        Self {
            inner: value,
            type_name: std::any::type_name::<T>(),
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        (*self.inner).downcast_ref::<T>()
    }

    pub fn ptr_eq(&self, other: &OpaqueValue) -> bool {
        std::ptr::eq(
            Arc::as_ptr(&self.inner) as *const (),
            Arc::as_ptr(&other.inner) as *const (),
        )
    }
}

impl PartialEq for OpaqueValue {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for OpaqueValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Opaque<{}>", self.type_name)
    }
}

// ── Conversions ────────────────────────────────────────────────

impl From<bool> for OptionValue {
    fn from(b: bool) -> Self {
        OptionValue::Bool(b)
    }
}

macro_rules! from_integer {
    ($($t:ty),*) => {
        $(
            impl From<$t> for OptionValue {
                fn from(i: $t) -> Self {
                    OptionValue::Integer(i64::from(i))
                }
            }
        )*
    };
}

from_integer!(i8, i16, i32, i64, u8, u16, u32);

impl From<f32> for OptionValue {
    fn from(f: f32) -> Self {
        OptionValue::Float(f64::from(f))
    }
}

impl From<f64> for OptionValue {
    fn from(f: f64) -> Self {
        OptionValue::Float(f)
    }
}

impl From<&str> for OptionValue {
    fn from(s: &str) -> Self {
        OptionValue::String(s.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(s: String) -> Self {
        OptionValue::String(s)
    }
}

impl<T: Into<OptionValue>> From<Vec<T>> for OptionValue {
    fn from(items: Vec<T>) -> Self {
        OptionValue::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<OptionValue>> From<Option<T>> for OptionValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(OptionValue::Null)
    }
}

impl From<OptionMap> for OptionValue {
    fn from(map: OptionMap) -> Self {
        OptionValue::Map(map)
    }
}

impl From<OpaqueValue> for OptionValue {
    fn from(o: OpaqueValue) -> Self {
        OptionValue::Opaque(o)
    }
}

impl From<serde_json::Value> for OptionValue {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value as Json;
        match value {
            Json::Null => OptionValue::Null,
            Json::Bool(b) => OptionValue::Bool(b),
            Json::Number(n) => match n.as_i64() {
                Some(i) => OptionValue::Integer(i),
                None => OptionValue::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Json::String(s) => OptionValue::String(s),
            Json::Array(items) => OptionValue::List(items.into_iter().map(Into::into).collect()),
            Json::Object(map) => {
                OptionValue::Map(map.into_iter().map(|(k, v)| (k, v.into())).collect())
            }
        }
    }
}

impl TryFrom<OptionValue> for serde_json::Value {
    type Error = ConfiguratorError;

    fn try_from(value: OptionValue) -> Result<Self> {
        use serde_json::Value as Json;
        Ok(match value {
            OptionValue::Null => Json::Null,
            OptionValue::Bool(b) => Json::Bool(b),
            OptionValue::Integer(i) => Json::from(i),
            OptionValue::Float(f) => Json::from(f),
            OptionValue::String(s) => Json::String(s),
            OptionValue::List(items) => Json::Array(
                items
                    .into_iter()
                    .map(serde_json::Value::try_from)
                    .collect::<Result<_>>()?,
            ),
            OptionValue::Map(map) => {
                let mut object = serde_json::Map::with_capacity(map.len());
                for (k, v) in map {
                    object.insert(k, serde_json::Value::try_from(v)?);
                }
                Json::Object(object)
            }
            OptionValue::Opaque(o) => {
                return Err(ConfiguratorError::OpaqueValue {
                    type_name: o.type_name(),
                });
            }
        })
    }
}

/// Build an [`OptionMap`] from `key => value` pairs.
///
/// ```
/// use configurator_core::option_map;
///
/// let map = option_map! { "foo" => "bar", "depth" => 3 };
/// assert_eq!(map["depth"].as_i64(), Some(3));
/// ```
#[macro_export]
macro_rules! option_map {
    () => {
        $crate::OptionMap::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut map = $crate::OptionMap::new();
        $(
            map.insert(::std::string::String::from($key), $crate::OptionValue::from($value));
        )+
        map
    }};
}

// ── Serde ──────────────────────────────────────────────────────

impl Serialize for OptionValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            OptionValue::Null => serializer.serialize_unit(),
            OptionValue::Bool(b) => serializer.serialize_bool(*b),
            OptionValue::Integer(i) => serializer.serialize_i64(*i),
            OptionValue::Float(f) => serializer.serialize_f64(*f),
            OptionValue::String(s) => serializer.serialize_str(s),
            OptionValue::List(items) => serializer.collect_seq(items),
            OptionValue::Map(map) => serializer.collect_map(map),
            OptionValue::Opaque(o) => Err(ser::Error::custom(format!(
                "opaque value of type {} has no serialized form",
                o.type_name()
            ))),
        }
    }
}

struct OptionValueVisitor;

impl<'de> Visitor<'de> for OptionValueVisitor {
    type Value = OptionValue;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("any self-describing value")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> std::result::Result<OptionValue, E> {
        Ok(OptionValue::Bool(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<OptionValue, E> {
        Ok(OptionValue::Integer(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<OptionValue, E> {
        // Out-of-range unsigned values degrade to floats rather than failing.
        Ok(match i64::try_from(v) {
            Ok(i) => OptionValue::Integer(i),
            Err(_) => OptionValue::Float(v as f64),
        })
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> std::result::Result<OptionValue, E> {
        Ok(OptionValue::Float(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<OptionValue, E> {
        Ok(OptionValue::String(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> std::result::Result<OptionValue, E> {
        Ok(OptionValue::String(v))
    }

    fn visit_unit<E: de::Error>(self) -> std::result::Result<OptionValue, E> {
        Ok(OptionValue::Null)
    }

    fn visit_none<E: de::Error>(self) -> std::result::Result<OptionValue, E> {
        Ok(OptionValue::Null)
    }

    fn visit_some<D: Deserializer<'de>>(
        self,
        deserializer: D,
    ) -> std::result::Result<OptionValue, D::Error> {
        OptionValue::deserialize(deserializer)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> std::result::Result<OptionValue, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(OptionValue::List(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<OptionValue, A::Error> {
        let mut map = OptionMap::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((key, value)) = access.next_entry::<String, OptionValue>()? {
            map.insert(key, value);
        }
        Ok(OptionValue::Map(map))
    }
}

impl<'de> Deserialize<'de> for OptionValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_any(OptionValueVisitor)
    }
}
