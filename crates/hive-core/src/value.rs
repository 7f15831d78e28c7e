//! Concrete values supplied for options and placeholders.
//!
//! [`BeeOptions`] holds a bee's configuration as entered by the user;
//! [`Placeholders`] holds the parameters of an action or the payload of an
//! event.  Both keep insertion order and allow at most one value per name.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::descriptor::ValueType;
use crate::error::{BeeError, BeeResult};

// ─── BeeOptions ───────────────────────────────────────────────────────────────

/// A single named option value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeeOption {
    pub name: String,
    pub value: Value,
}

/// Ordered option-name → value mapping of one bee.
///
/// Serialises as a list of `{ name, value }` entries, which is also the
/// persisted form in the hive configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BeeOptions(Vec<BeeOption>);

impl BeeOptions {
    /// Creates an empty option map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `name` to `value`, replacing any previous value in place.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        let name = name.into();
        let value = value.into();
        match self.0.iter_mut().find(|o| o.name == name) {
            Some(existing) => existing.value = value,
            None => self.0.push(BeeOption { name, value }),
        }
    }

    /// Builder-style [`set`](Self::set).
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(name, value);
        self
    }

    /// Returns the raw value of `name`.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.iter().find(|o| o.name == name).map(|o| &o.value)
    }

    /// Returns `true` if `name` has a non-null value.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some_and(|v| !v.is_null())
    }

    /// Deserialises the value of `name` into `T`.
    pub fn bind<T: DeserializeOwned>(&self, name: &str) -> BeeResult<T> {
        let value = self
            .get(name)
            .filter(|v| !v.is_null())
            .ok_or_else(|| BeeError::MissingOption(name.to_string()))?;
        T::deserialize(value).map_err(|e| BeeError::invalid_option(name, e.to_string()))
    }

    /// Iterates over the options in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &BeeOption> + Clone {
        self.0.iter()
    }

    /// Returns the option names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|o| o.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for BeeOptions {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut options = Self::new();
        for (name, value) in iter {
            options.set(name, value);
        }
        options
    }
}

impl<'a> IntoIterator for &'a BeeOptions {
    type Item = &'a BeeOption;
    type IntoIter = std::slice::Iter<'a, BeeOption>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

// ─── Placeholders ─────────────────────────────────────────────────────────────

/// A single named, typed action parameter or event field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Placeholder {
    pub name: String,
    #[serde(rename = "type")]
    pub value_type: ValueType,
    pub value: Value,
}

impl Placeholder {
    pub fn new(name: impl Into<String>, value_type: ValueType, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            value_type,
            value: value.into(),
        }
    }
}

/// Ordered list of [`Placeholder`] values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Placeholders(Vec<Placeholder>);

impl Placeholders {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `placeholder`, replacing any previous value with the same name.
    pub fn set(&mut self, placeholder: Placeholder) {
        match self.0.iter_mut().find(|p| p.name == placeholder.name) {
            Some(existing) => *existing = placeholder,
            None => self.0.push(placeholder),
        }
    }

    /// Builder-style [`set`](Self::set).
    pub fn with(
        mut self,
        name: impl Into<String>,
        value_type: ValueType,
        value: impl Into<Value>,
    ) -> Self {
        self.set(Placeholder::new(name, value_type, value));
        self
    }

    pub fn get(&self, name: &str) -> Option<&Placeholder> {
        self.0.iter().find(|p| p.name == name)
    }

    /// Returns `true` if `name` has a non-null value.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some_and(|p| !p.value.is_null())
    }

    /// Deserialises the value of `name` into `T`.
    pub fn bind<T: DeserializeOwned>(&self, name: &str) -> BeeResult<T> {
        let placeholder = self
            .get(name)
            .filter(|p| !p.value.is_null())
            .ok_or_else(|| BeeError::invalid_placeholder(name, "missing"))?;
        T::deserialize(&placeholder.value)
            .map_err(|e| BeeError::invalid_placeholder(name, e.to_string()))
    }

    /// Like [`bind`](Self::bind), but an absent or `null` value yields `None`.
    pub fn bind_optional<T: DeserializeOwned>(&self, name: &str) -> BeeResult<Option<T>> {
        if self.contains(name) {
            self.bind(name).map(Some)
        } else {
            Ok(None)
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Placeholder> + Clone {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<Placeholder> for Placeholders {
    fn from_iter<I: IntoIterator<Item = Placeholder>>(iter: I) -> Self {
        let mut placeholders = Self::new();
        for placeholder in iter {
            placeholders.set(placeholder);
        }
        placeholders
    }
}

impl<'a> IntoIterator for &'a Placeholders {
    type Item = &'a Placeholder;
    type IntoIter = std::slice::Iter<'a, Placeholder>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_set_replaces_in_place() {
        let mut options = BeeOptions::new()
            .with("address", "192.168.0.1")
            .with("key", "abc");
        options.set("address", "10.0.0.2");

        let names: Vec<_> = options.names().collect();
        assert_eq!(names, ["address", "key"]);
        assert_eq!(options.get("address"), Some(&json!("10.0.0.2")));
    }

    #[test]
    fn test_bind() {
        let options = BeeOptions::new()
            .with("port", 8080)
            .with("host", "bridge.local")
            .with("empty", Value::Null);

        assert_eq!(options.bind::<u16>("port").unwrap(), 8080);
        assert_eq!(options.bind::<String>("host").unwrap(), "bridge.local");
        assert!(matches!(
            options.bind::<String>("empty"),
            Err(BeeError::MissingOption(name)) if name == "empty"
        ));
        assert!(matches!(
            options.bind::<u16>("host"),
            Err(BeeError::InvalidOption { .. })
        ));
    }

    #[test]
    fn test_options_serialize_as_list() {
        let options: BeeOptions = [("address", "192.168.0.1"), ("key", "abc")]
            .into_iter()
            .collect();
        assert_eq!(
            serde_json::to_value(&options).unwrap(),
            json!([
                {"name": "address", "value": "192.168.0.1"},
                {"name": "key", "value": "abc"},
            ])
        );

        let back: BeeOptions = serde_json::from_value(serde_json::to_value(&options).unwrap()).unwrap();
        assert_eq!(back, options);
    }

    #[test]
    fn test_placeholders_bind_optional() {
        let params = Placeholders::new()
            .with("light", ValueType::Int, 3)
            .with("color", ValueType::String, Value::Null);

        assert_eq!(params.bind::<u32>("light").unwrap(), 3);
        assert_eq!(params.bind_optional::<String>("color").unwrap(), None);
        assert_eq!(params.bind_optional::<u8>("brightness").unwrap(), None);
        assert!(params.bind::<bool>("state").is_err());
    }
}
