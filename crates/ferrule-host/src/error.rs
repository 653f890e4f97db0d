//! Parameter resolution errors.

/// Errors raised while reading resolved parameter values.
#[derive(Debug, thiserror::Error)]
pub enum ParamError {
  /// The field has no resolved value and no fallback applies.
  #[error("parameter '{field}' is not set")]
  Missing { field: String },

  /// The resolved value does not match the expected shape.
  #[error("parameter '{field}' is invalid: {message}")]
  Invalid { field: String, message: String },
}
