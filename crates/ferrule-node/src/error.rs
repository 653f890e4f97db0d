//! Schema validation errors.

/// Errors raised while validating supplied values against a node's schema.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
  /// A required property has no value.
  #[error("required field '{field}' is missing")]
  MissingRequired { field: String },

  /// A value does not match the property's declared type.
  #[error("field '{field}' expects a {expected}")]
  InvalidType { field: String, expected: &'static str },

  /// A value is not one of the declared choices.
  #[error("field '{field}' does not accept {value}")]
  InvalidOption { field: String, value: serde_json::Value },

  /// A numeric value is outside the declared bounds.
  #[error("field '{field}' must be between {min} and {max}, got {value}")]
  OutOfRange {
    field: String,
    min: i64,
    max: i64,
    value: i64,
  },
}
