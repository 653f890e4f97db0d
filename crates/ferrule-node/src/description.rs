use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Static description of a node: identity, wiring, and its property schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeDescription {
  pub display_name: String,
  pub name: String,
  pub group: Vec<String>,
  pub version: u32,
  pub description: String,
  pub inputs: Vec<String>,
  pub outputs: Vec<String>,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub credentials: Vec<CredentialRequirement>,
  pub properties: Vec<NodeProperty>,
}

/// A named credential bundle the node needs at run time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CredentialRequirement {
  pub name: String,
  pub required: bool,
}

/// One configurable field of a node.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeProperty {
  pub display_name: String,
  pub name: String,
  #[serde(rename = "type")]
  pub kind: PropertyKind,
  #[serde(default, skip_serializing_if = "std::ops::Not::not")]
  pub required: bool,
  pub default: serde_json::Value,
  #[serde(default, skip_serializing_if = "String::is_empty")]
  pub description: String,
  /// Choices for `Options` properties.
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub options: Vec<PropertyOption>,
  /// Repeatable sub-groups for `FixedCollection` properties.
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub groups: Vec<CollectionGroup>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub type_options: Option<TypeOptions>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub display_options: Option<DisplayOptions>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PropertyKind {
  String,
  Number,
  Boolean,
  Options,
  FixedCollection,
}

/// A single choice of an `Options` property.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyOption {
  pub name: String,
  pub value: serde_json::Value,
  #[serde(default, skip_serializing_if = "String::is_empty")]
  pub description: String,
}

/// A named sub-group of a `FixedCollection` property.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionGroup {
  pub name: String,
  pub display_name: String,
  /// Whether the group repeats (a list of entries) or appears at most once.
  #[serde(default)]
  pub multiple: bool,
  pub values: Vec<NodeProperty>,
}

/// Rendering constraints that also bind during validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeOptions {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub min_value: Option<i64>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub max_value: Option<i64>,
}

/// Conditions under which a property is shown (and therefore validated).
///
/// Every listed field must currently hold one of the allowed values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DisplayOptions {
  pub show: HashMap<String, Vec<serde_json::Value>>,
}

impl DisplayOptions {
  pub fn is_shown(&self, values: &serde_json::Map<String, serde_json::Value>) -> bool {
    self
      .show
      .iter()
      .all(|(field, allowed)| values.get(field).is_some_and(|v| allowed.contains(v)))
  }
}

impl NodeProperty {
  fn new(kind: PropertyKind, name: &str, display_name: &str) -> Self {
    Self {
      display_name: display_name.to_string(),
      name: name.to_string(),
      kind,
      required: false,
      default: serde_json::Value::Null,
      description: String::new(),
      options: Vec::new(),
      groups: Vec::new(),
      type_options: None,
      display_options: None,
    }
  }

  pub fn string(name: &str, display_name: &str) -> Self {
    Self::new(PropertyKind::String, name, display_name).default_value("")
  }

  pub fn number(name: &str, display_name: &str) -> Self {
    Self::new(PropertyKind::Number, name, display_name).default_value(0)
  }

  pub fn boolean(name: &str, display_name: &str) -> Self {
    Self::new(PropertyKind::Boolean, name, display_name).default_value(false)
  }

  pub fn options(name: &str, display_name: &str) -> Self {
    Self::new(PropertyKind::Options, name, display_name)
  }

  pub fn fixed_collection(name: &str, display_name: &str) -> Self {
    Self::new(PropertyKind::FixedCollection, name, display_name)
      .default_value(serde_json::json!({}))
  }

  pub fn required(mut self) -> Self {
    self.required = true;
    self
  }

  pub fn default_value(mut self, value: impl Into<serde_json::Value>) -> Self {
    self.default = value.into();
    self
  }

  pub fn describe(mut self, description: &str) -> Self {
    self.description = description.to_string();
    self
  }

  /// Add one choice to an `Options` property.
  pub fn choice(mut self, name: &str, value: impl Into<serde_json::Value>) -> Self {
    self.options.push(PropertyOption {
      name: name.to_string(),
      value: value.into(),
      description: String::new(),
    });
    self
  }

  pub fn group(mut self, group: CollectionGroup) -> Self {
    self.groups.push(group);
    self
  }

  pub fn range(mut self, min: i64, max: i64) -> Self {
    self.type_options = Some(TypeOptions {
      min_value: Some(min),
      max_value: Some(max),
    });
    self
  }

  /// Show this property only when `field` holds one of `values`.
  pub fn show_when(mut self, field: &str, values: &[serde_json::Value]) -> Self {
    let display = self.display_options.get_or_insert_with(DisplayOptions::default);
    display.show.insert(field.to_string(), values.to_vec());
    self
  }
}

impl CollectionGroup {
  pub fn new(name: &str, display_name: &str, values: Vec<NodeProperty>) -> Self {
    Self {
      name: name.to_string(),
      display_name: display_name.to_string(),
      multiple: false,
      values,
    }
  }

  pub fn repeating(mut self) -> Self {
    self.multiple = true;
    self
  }
}
