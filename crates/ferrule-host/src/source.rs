//! Resolved parameter lookup.

use std::collections::HashMap;

use serde::de::DeserializeOwned;

use crate::error::ParamError;

/// Resolved parameter values, addressed by field name and record index.
///
/// The host evaluates any per-record expressions before the node sees a
/// value, so the same field may resolve differently at different indexes.
pub trait ParameterSource: Send + Sync {
  /// The resolved value of `field` for the record at `index`, if any.
  fn get(&self, field: &str, index: usize) -> Option<serde_json::Value>;
}

/// A [`ParameterSource`] view bound to one record index, with typed access.
pub struct Parameters<'a> {
  source: &'a dyn ParameterSource,
  index: usize,
}

impl<'a> Parameters<'a> {
  pub fn new(source: &'a dyn ParameterSource, index: usize) -> Self {
    Self { source, index }
  }

  pub fn index(&self) -> usize {
    self.index
  }

  /// The raw resolved value, if set.
  pub fn value(&self, field: &str) -> Option<serde_json::Value> {
    self.source.get(field, self.index)
  }

  /// A typed value; the field must be set.
  pub fn typed<T: DeserializeOwned>(&self, field: &str) -> Result<T, ParamError> {
    let value = self.value(field).ok_or_else(|| ParamError::Missing {
      field: field.to_string(),
    })?;
    serde_json::from_value(value).map_err(|e| ParamError::Invalid {
      field: field.to_string(),
      message: e.to_string(),
    })
  }

  /// A typed value, falling back to `default` when the field is unset.
  pub fn typed_or<T: DeserializeOwned>(&self, field: &str, default: T) -> Result<T, ParamError> {
    match self.value(field) {
      None => Ok(default),
      Some(value) => serde_json::from_value(value).map_err(|e| ParamError::Invalid {
        field: field.to_string(),
        message: e.to_string(),
      }),
    }
  }
}

/// In-memory parameter source: base values plus per-index overrides.
///
/// Overrides stand in for per-record expression results; the CLI and tests
/// use this in place of a live host.
#[derive(Debug, Clone, Default)]
pub struct StaticParameterSource {
  base: serde_json::Map<String, serde_json::Value>,
  overrides: HashMap<usize, serde_json::Map<String, serde_json::Value>>,
}

impl StaticParameterSource {
  pub fn new(base: serde_json::Map<String, serde_json::Value>) -> Self {
    Self {
      base,
      overrides: HashMap::new(),
    }
  }

  /// Override `field` for the record at `index` only.
  pub fn override_at(mut self, index: usize, field: &str, value: serde_json::Value) -> Self {
    self
      .overrides
      .entry(index)
      .or_default()
      .insert(field.to_string(), value);
    self
  }
}

impl ParameterSource for StaticParameterSource {
  fn get(&self, field: &str, index: usize) -> Option<serde_json::Value> {
    self
      .overrides
      .get(&index)
      .and_then(|fields| fields.get(field))
      .or_else(|| self.base.get(field))
      .cloned()
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  fn source() -> StaticParameterSource {
    let mut base = serde_json::Map::new();
    base.insert("cluster".to_string(), json!("default"));
    base.insert("count".to_string(), json!(2));
    StaticParameterSource::new(base).override_at(1, "cluster", json!("staging"))
  }

  #[test]
  fn overrides_apply_per_index() {
    let source = source();
    assert_eq!(source.get("cluster", 0), Some(json!("default")));
    assert_eq!(source.get("cluster", 1), Some(json!("staging")));
    assert_eq!(source.get("cluster", 2), Some(json!("default")));
    assert_eq!(source.get("missing", 0), None);
  }

  #[test]
  fn typed_access_coerces_and_falls_back() {
    let source = source();
    let params = Parameters::new(&source, 0);

    let count: i64 = params.typed("count").unwrap();
    assert_eq!(count, 2);

    let reason: String = params.typed_or("reason", String::new()).unwrap();
    assert_eq!(reason, "");

    let err = params.typed::<String>("count").unwrap_err();
    assert!(matches!(err, ParamError::Invalid { .. }));

    let err = params.typed::<String>("reason").unwrap_err();
    assert!(matches!(err, ParamError::Missing { .. }));
  }
}
