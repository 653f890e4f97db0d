//! Value validation against a property schema.

use serde_json::{Map, Value};

use crate::description::{NodeProperty, PropertyKind};
use crate::error::SchemaError;

/// Validate supplied values against the declared properties.
///
/// Only properties currently shown (per their display conditions) are
/// checked, matching how the configuration surface is rendered. Values for
/// hidden or undeclared fields are ignored.
pub fn validate_values(
  properties: &[NodeProperty],
  values: &Map<String, Value>,
) -> Result<(), SchemaError> {
  for property in properties {
    let shown = property
      .display_options
      .as_ref()
      .map(|d| d.is_shown(values))
      .unwrap_or(true);
    if !shown {
      continue;
    }

    let Some(value) = values.get(&property.name) else {
      if property.required {
        if property.default.is_null() {
          return Err(SchemaError::MissingRequired {
            field: property.name.clone(),
          });
        }
        // The host falls back to the declared default, so that is what
        // must hold up (an empty-string default fails a required field).
        validate_value(property, &property.default)?;
      }
      continue;
    };

    validate_value(property, value)?;
  }

  Ok(())
}

fn validate_value(property: &NodeProperty, value: &Value) -> Result<(), SchemaError> {
  match property.kind {
    PropertyKind::String => {
      let s = value.as_str().ok_or_else(|| SchemaError::InvalidType {
        field: property.name.clone(),
        expected: "string",
      })?;
      if property.required && s.is_empty() {
        return Err(SchemaError::MissingRequired {
          field: property.name.clone(),
        });
      }
    }
    PropertyKind::Number => {
      let n = value.as_i64().ok_or_else(|| SchemaError::InvalidType {
        field: property.name.clone(),
        expected: "number",
      })?;
      if let Some(type_options) = &property.type_options {
        let min = type_options.min_value.unwrap_or(i64::MIN);
        let max = type_options.max_value.unwrap_or(i64::MAX);
        if n < min || n > max {
          return Err(SchemaError::OutOfRange {
            field: property.name.clone(),
            min,
            max,
            value: n,
          });
        }
      }
    }
    PropertyKind::Boolean => {
      if !value.is_boolean() {
        return Err(SchemaError::InvalidType {
          field: property.name.clone(),
          expected: "boolean",
        });
      }
    }
    PropertyKind::Options => {
      if !property.options.iter().any(|o| &o.value == value) {
        return Err(SchemaError::InvalidOption {
          field: property.name.clone(),
          value: value.clone(),
        });
      }
    }
    PropertyKind::FixedCollection => {
      // Group contents are shaped by the UI; only the outer value is checked.
      if !value.is_object() {
        return Err(SchemaError::InvalidType {
          field: property.name.clone(),
          expected: "object",
        });
      }
    }
  }

  Ok(())
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  fn count_property() -> NodeProperty {
    NodeProperty::number("count", "Count")
      .required()
      .default_value(1)
      .range(1, 10)
  }

  fn values(entries: &[(&str, Value)]) -> Map<String, Value> {
    entries
      .iter()
      .map(|(k, v)| (k.to_string(), v.clone()))
      .collect()
  }

  #[test]
  fn number_out_of_range_is_rejected() {
    let properties = vec![count_property()];
    let err = validate_values(&properties, &values(&[("count", json!(11))])).unwrap_err();
    assert!(matches!(err, SchemaError::OutOfRange { value: 11, .. }));

    validate_values(&properties, &values(&[("count", json!(10))])).unwrap();
    validate_values(&properties, &values(&[("count", json!(1))])).unwrap();
  }

  #[test]
  fn option_outside_choices_is_rejected() {
    let properties = vec![
      NodeProperty::options("launchType", "Launch Type")
        .choice("EC2", "EC2")
        .choice("Fargate", "FARGATE"),
    ];
    let err =
      validate_values(&properties, &values(&[("launchType", json!("MOON"))])).unwrap_err();
    assert!(matches!(err, SchemaError::InvalidOption { .. }));

    validate_values(&properties, &values(&[("launchType", json!("FARGATE"))])).unwrap();
  }

  #[test]
  fn hidden_properties_are_not_validated() {
    let properties = vec![
      NodeProperty::options("propagateTags", "Propagate Tags")
        .choice("None", "NONE")
        .show_when("enableECSManagedTags", &[json!(true)]),
    ];
    // Invalid value, but the property is hidden so it passes.
    validate_values(
      &properties,
      &values(&[
        ("enableECSManagedTags", json!(false)),
        ("propagateTags", json!("EVERYWHERE")),
      ]),
    )
    .unwrap();
  }

  #[test]
  fn required_string_must_be_non_empty() {
    let properties = vec![NodeProperty::string("taskDefinition", "Task Definition").required()];
    let err =
      validate_values(&properties, &values(&[("taskDefinition", json!(""))])).unwrap_err();
    assert!(matches!(err, SchemaError::MissingRequired { .. }));
  }
}
