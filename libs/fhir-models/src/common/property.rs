//! Presence-aware property values
//!
//! JSON distinguishes a missing property from one explicitly set to `null`.
//! Merging a differential needs that distinction: a `null` overwrites, a
//! missing property does not.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A property as it appeared in a document.
///
/// Use with `#[serde(default, skip_serializing_if = "Property::is_absent")]`
/// so a missing key stays missing on output and `null` round-trips as `null`.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Property<T> {
    /// Key not present
    #[default]
    Absent,
    /// Key present with a JSON `null`
    Null,
    /// Key present with a value
    Value(T),
}

impl<T> Property<T> {
    pub fn is_absent(&self) -> bool {
        matches!(self, Property::Absent)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Property::Null)
    }

    /// The value, if there is one. Both `Absent` and `Null` give `None`.
    pub fn as_value(&self) -> Option<&T> {
        match self {
            Property::Value(v) => Some(v),
            _ => None,
        }
    }
}

impl Property<String> {
    pub fn as_str(&self) -> Option<&str> {
        self.as_value().map(String::as_str)
    }
}

impl<T> From<T> for Property<T> {
    fn from(value: T) -> Self {
        Property::Value(value)
    }
}

impl<T: Serialize> Serialize for Property<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Property::Value(v) => v.serialize(serializer),
            Property::Absent | Property::Null => serializer.serialize_none(),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Property<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(v) => Property::Value(v),
            None => Property::Null,
        })
    }
}
