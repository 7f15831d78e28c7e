//! Host-side validation of values against descriptors.
//!
//! Bees trust that their input has been checked; the hive runs these
//! functions before calling [`BeeFactory::new_bee`](crate::BeeFactory::new_bee),
//! [`Bee::reload_options`](crate::Bee::reload_options) or
//! [`Bee::action`](crate::Bee::action), and on every event a bee emits.
//!
//! Every violation is collected rather than stopping at the first, so a
//! configuration form can highlight all offending fields at once.

use serde_json::Value;

use crate::descriptor::{
    ActionDescriptor, EventDescriptor, OptionDescriptor, PlaceholderDescriptor, ValueType,
};
use crate::error::{SchemaError, SchemaViolation};
use crate::event::{Action, Event};
use crate::value::{BeeOptions, Placeholders};

/// Field view shared by option and placeholder descriptors.
struct Field<'a> {
    name: &'a str,
    value_type: ValueType,
    mandatory: bool,
}

fn check<'a>(
    context: String,
    fields: impl Iterator<Item = Field<'a>>,
    supplied: impl Iterator<Item = (&'a str, &'a Value)> + Clone,
) -> Result<(), SchemaError> {
    let mut violations = Vec::new();
    let mut declared = Vec::new();

    for field in fields {
        declared.push(field.name);
        let value = supplied
            .clone()
            .find(|(name, _)| *name == field.name)
            .map(|(_, value)| value)
            .filter(|value| !value.is_null());

        match value {
            None if field.mandatory => violations.push(SchemaViolation::Missing {
                name: field.name.to_string(),
            }),
            None => {}
            Some(value) if !field.value_type.accepts(value) => {
                violations.push(SchemaViolation::WrongType {
                    name: field.name.to_string(),
                    expected: field.value_type.as_str(),
                });
            }
            Some(_) => {}
        }
    }

    for (name, _) in supplied {
        if !declared.contains(&name) {
            violations.push(SchemaViolation::Unknown {
                name: name.to_string(),
            });
        }
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(SchemaError {
            context,
            violations,
        })
    }
}

/// Checks a bee's option map against its factory's option descriptors.
pub fn validate_options(
    descriptors: &[OptionDescriptor],
    options: &BeeOptions,
) -> Result<(), SchemaError> {
    check(
        "options".to_string(),
        descriptors.iter().map(|d| Field {
            name: &d.name,
            value_type: d.value_type,
            mandatory: d.mandatory,
        }),
        options.iter().map(|o| (o.name.as_str(), &o.value)),
    )
}

/// Checks action parameters or event fields against their descriptors.
pub fn validate_placeholders(
    descriptors: &[PlaceholderDescriptor],
    values: &Placeholders,
) -> Result<(), SchemaError> {
    check(
        "placeholders".to_string(),
        descriptors.iter().map(|d| Field {
            name: &d.name,
            value_type: d.value_type,
            mandatory: d.mandatory,
        }),
        values.iter().map(|p| (p.name.as_str(), &p.value)),
    )
}

/// Checks an emitted event against the emitting factory's event descriptors.
pub fn validate_event(descriptors: &[EventDescriptor], event: &Event) -> Result<(), SchemaError> {
    let context = format!("event '{}/{}' of bee '{}'", event.namespace, event.name, event.bee);
    let descriptor = descriptors
        .iter()
        .find(|d| d.namespace == event.namespace && d.name == event.name)
        .ok_or_else(|| SchemaError {
            context: context.clone(),
            violations: vec![SchemaViolation::Unknown {
                name: event.name.clone(),
            }],
        })?;

    validate_placeholders(&descriptor.options, &event.options).map_err(|e| e.within(context))
}

/// Checks a dispatched action against the target factory's action descriptors.
pub fn validate_action(
    descriptors: &[ActionDescriptor],
    action: &Action,
) -> Result<(), SchemaError> {
    let context = format!("action '{}/{}' for bee '{}'", action.namespace, action.name, action.bee);
    let descriptor = descriptors
        .iter()
        .find(|d| d.namespace == action.namespace && d.name == action.name)
        .ok_or_else(|| SchemaError {
            context: context.clone(),
            violations: vec![SchemaViolation::Unknown {
                name: action.name.clone(),
            }],
        })?;

    validate_placeholders(&descriptor.options, &action.options).map_err(|e| e.within(context))
}

impl SchemaError {
    /// Replaces the context describing what was validated.
    pub fn within(mut self, context: impl Into<String>) -> Self {
        self.context = context.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bridge_options() -> Vec<OptionDescriptor> {
        vec![
            OptionDescriptor::new("address", "Bridge address", ValueType::Address).mandatory(),
            OptionDescriptor::new("key", "Bridge key", ValueType::String).mandatory(),
            OptionDescriptor::new("poll", "Poll interval", ValueType::Int),
        ]
    }

    #[test]
    fn test_valid_options() {
        let options = BeeOptions::new()
            .with("address", "192.168.0.1")
            .with("key", "abc");
        assert!(validate_options(&bridge_options(), &options).is_ok());
    }

    #[test]
    fn test_missing_mandatory_option() {
        let options = BeeOptions::new().with("address", "192.168.0.1");
        let err = validate_options(&bridge_options(), &options).unwrap_err();

        assert!(err.is_missing("key"));
        assert_eq!(err.violations.len(), 1);
    }

    #[test]
    fn test_null_counts_as_missing() {
        let options = BeeOptions::new()
            .with("address", "192.168.0.1")
            .with("key", Value::Null);
        let err = validate_options(&bridge_options(), &options).unwrap_err();
        assert!(err.is_missing("key"));
    }

    #[test]
    fn test_collects_all_violations_in_order() {
        let options = BeeOptions::new()
            .with("address", 42)
            .with("poll", "often")
            .with("colour", "red");
        let err = validate_options(&bridge_options(), &options).unwrap_err();

        assert_eq!(
            err.violations,
            vec![
                SchemaViolation::WrongType {
                    name: "address".into(),
                    expected: "address",
                },
                SchemaViolation::Missing { name: "key".into() },
                SchemaViolation::WrongType {
                    name: "poll".into(),
                    expected: "int",
                },
                SchemaViolation::Unknown {
                    name: "colour".into(),
                },
            ]
        );
        assert!(err.to_string().starts_with("options: "));
    }

    #[test]
    fn test_validate_action() {
        let actions = vec![
            ActionDescriptor::new("Lights", "switch", "Switches a light")
                .placeholder(PlaceholderDescriptor::new("light", "", ValueType::Int).mandatory())
                .placeholder(PlaceholderDescriptor::new("state", "", ValueType::Bool).mandatory()),
        ];

        let ok = Action::new(
            "hall",
            "Lights",
            "switch",
            Placeholders::new()
                .with("light", ValueType::Int, 1)
                .with("state", ValueType::Bool, true),
        );
        assert!(validate_action(&actions, &ok).is_ok());

        let missing = Action::new(
            "hall",
            "Lights",
            "switch",
            Placeholders::new().with("light", ValueType::Int, 1),
        );
        let err = validate_action(&actions, &missing).unwrap_err();
        assert!(err.is_missing("state"));
        assert_eq!(err.context, "action 'Lights/switch' for bee 'hall'");

        let unknown = Action::new("hall", "Lights", "explode", Placeholders::new());
        let err = validate_action(&actions, &unknown).unwrap_err();
        assert_eq!(
            err.violations,
            vec![SchemaViolation::Unknown {
                name: "explode".into()
            }]
        );
    }

    #[test]
    fn test_validate_event() {
        let events = vec![EventDescriptor::new("Door", "opened", "A door was opened")
            .placeholder(PlaceholderDescriptor::new("door", "", ValueType::String).mandatory())];

        let event = Event::new(
            "front",
            "Door",
            "opened",
            Placeholders::new().with("door", ValueType::String, "front"),
        );
        assert!(validate_event(&events, &event).is_ok());

        let wrong = Event::new(
            "front",
            "Door",
            "opened",
            Placeholders::new().with("door", ValueType::String, 7),
        );
        assert!(validate_event(&events, &wrong).is_err());
        assert!(validate_event(&[], &event).is_err());
    }
}
