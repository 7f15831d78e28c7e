//! Static schema describing what a bee kind accepts and provides.
//!
//! Descriptors carry shape, never behaviour.  The host reads them to render
//! configuration forms and to validate user input (see
//! [`validation`](crate::validation)); the bees themselves never consult them.
//!
//! List order is presentation order, so every list is a `Vec`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ─── ValueType ────────────────────────────────────────────────────────────────

/// Declared type of an option or placeholder value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueType {
    #[serde(rename = "string")]
    String,
    /// A string the admin interface should mask.
    #[serde(rename = "password")]
    Password,
    /// A network address, e.g. `192.168.0.1` or `bridge.local:80`.
    #[serde(rename = "address")]
    Address,
    #[serde(rename = "url")]
    Url,
    #[serde(rename = "int")]
    Int,
    #[serde(rename = "float")]
    Float,
    #[serde(rename = "bool")]
    Bool,
    #[serde(rename = "[]string")]
    StringArray,
    #[serde(rename = "map")]
    Map,
    /// An RFC 3339 timestamp string.
    #[serde(rename = "timestamp")]
    Timestamp,
}

impl ValueType {
    /// Returns the wire tag for this type.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Password => "password",
            Self::Address => "address",
            Self::Url => "url",
            Self::Int => "int",
            Self::Float => "float",
            Self::Bool => "bool",
            Self::StringArray => "[]string",
            Self::Map => "map",
            Self::Timestamp => "timestamp",
        }
    }

    /// Returns `true` if `value` has the JSON shape this type expects.
    ///
    /// Only the shape is checked; the contents of strings (addresses, URLs,
    /// timestamps) are left to the bee.
    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            Self::String | Self::Password | Self::Address | Self::Url | Self::Timestamp => {
                value.is_string()
            }
            Self::Int => value.is_i64() || value.is_u64(),
            Self::Float => value.is_number(),
            Self::Bool => value.is_boolean(),
            Self::StringArray => value
                .as_array()
                .is_some_and(|items| items.iter().all(Value::is_string)),
            Self::Map => value.is_object(),
        }
    }
}

impl std::fmt::Display for ValueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─── OptionDescriptor ─────────────────────────────────────────────────────────

/// One configurable setting a bee instance needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionDescriptor {
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub value_type: ValueType,
    #[serde(default)]
    pub mandatory: bool,
}

impl OptionDescriptor {
    /// Creates an optional option descriptor.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        value_type: ValueType,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            value_type,
            mandatory: false,
        }
    }

    /// Marks the option as mandatory.
    pub fn mandatory(mut self) -> Self {
        self.mandatory = true;
        self
    }
}

// ─── PlaceholderDescriptor ────────────────────────────────────────────────────

/// One named parameter of an event or action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceholderDescriptor {
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub value_type: ValueType,
    #[serde(default)]
    pub mandatory: bool,
}

impl PlaceholderDescriptor {
    /// Creates an optional placeholder descriptor.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        value_type: ValueType,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            value_type,
            mandatory: false,
        }
    }

    /// Marks the placeholder as mandatory.
    pub fn mandatory(mut self) -> Self {
        self.mandatory = true;
        self
    }
}

// ─── EventDescriptor ──────────────────────────────────────────────────────────

/// One kind of event a bee can emit into the hive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDescriptor {
    pub namespace: String,
    pub name: String,
    pub description: String,
    /// Payload fields, in presentation order.
    #[serde(default)]
    pub options: Vec<PlaceholderDescriptor>,
}

impl EventDescriptor {
    /// Creates an event descriptor without payload fields.
    pub fn new(
        namespace: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
            description: description.into(),
            options: Vec::new(),
        }
    }

    /// Appends a payload field.
    pub fn placeholder(mut self, placeholder: PlaceholderDescriptor) -> Self {
        self.options.push(placeholder);
        self
    }
}

// ─── ActionDescriptor ─────────────────────────────────────────────────────────

/// One command the hive can invoke on a bee.
///
/// `(namespace, name)` identifies the action across the whole registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionDescriptor {
    /// Display grouping, conventionally the factory's display name.
    pub namespace: String,
    pub name: String,
    pub description: String,
    /// Parameters, in presentation order.
    #[serde(default)]
    pub options: Vec<PlaceholderDescriptor>,
}

impl ActionDescriptor {
    /// Creates an action descriptor without parameters.
    pub fn new(
        namespace: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
            description: description.into(),
            options: Vec::new(),
        }
    }

    /// Appends a parameter.
    pub fn placeholder(mut self, placeholder: PlaceholderDescriptor) -> Self {
        self.options.push(placeholder);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_value_type_tags() {
        assert_eq!(
            serde_json::to_value(ValueType::StringArray).unwrap(),
            json!("[]string")
        );
        let parsed: ValueType = serde_json::from_value(json!("address")).unwrap();
        assert_eq!(parsed, ValueType::Address);
        assert_eq!(ValueType::Int.to_string(), "int");
    }

    #[test]
    fn test_value_type_accepts() {
        assert!(ValueType::Address.accepts(&json!("192.168.0.1")));
        assert!(!ValueType::Address.accepts(&json!(192)));
        assert!(ValueType::Int.accepts(&json!(3)));
        assert!(!ValueType::Int.accepts(&json!(3.5)));
        assert!(!ValueType::Int.accepts(&json!("3")));
        assert!(ValueType::Float.accepts(&json!(3)));
        assert!(ValueType::Bool.accepts(&json!(false)));
        assert!(ValueType::StringArray.accepts(&json!(["a", "b"])));
        assert!(!ValueType::StringArray.accepts(&json!(["a", 1])));
        assert!(ValueType::Map.accepts(&json!({"k": 1})));
    }

    #[test]
    fn test_option_descriptor_serialization() {
        let desc = OptionDescriptor::new("key", "Key used for auth", ValueType::String).mandatory();
        let value = serde_json::to_value(&desc).unwrap();
        assert_eq!(
            value,
            json!({
                "name": "key",
                "description": "Key used for auth",
                "type": "string",
                "mandatory": true,
            })
        );
    }

    #[test]
    fn test_action_descriptor_keeps_order() {
        let action = ActionDescriptor::new("Lights", "dim", "Dims a light")
            .placeholder(PlaceholderDescriptor::new("light", "", ValueType::Int).mandatory())
            .placeholder(PlaceholderDescriptor::new("level", "", ValueType::Int));

        let names: Vec<_> = action.options.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["light", "level"]);
        assert!(action.options[0].mandatory);
        assert!(!action.options[1].mandatory);
    }
}
