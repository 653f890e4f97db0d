//! Node execution errors.
//!
//! Every variant carries the index of the record that produced it. Errors
//! are tagged exactly once: the dispatch loop wraps untagged resolver and
//! client errors at the point of failure and never re-wraps.

use ferrule_aws::AwsError;
use ferrule_host::ParamError;

#[derive(Debug, thiserror::Error)]
pub enum NodeError {
  /// The operation field held a value outside the four supported
  /// operations. Always fatal for the run.
  #[error("unsupported operation '{operation}' for item {item_index}")]
  UnsupportedOperation { operation: String, item_index: usize },

  /// A parameter failed to resolve for a record.
  #[error("item {item_index}: {source}")]
  Parameter {
    item_index: usize,
    #[source]
    source: ParamError,
  },

  /// The remote call failed. All control-plane failures are treated
  /// uniformly; no error code is inspected or retried.
  #[error("item {item_index}: {source}")]
  Api {
    item_index: usize,
    #[source]
    source: AwsError,
  },
}

impl NodeError {
  /// Index of the record that produced this error.
  pub fn item_index(&self) -> usize {
    match self {
      Self::UnsupportedOperation { item_index, .. }
      | Self::Parameter { item_index, .. }
      | Self::Api { item_index, .. } => *item_index,
    }
  }
}
