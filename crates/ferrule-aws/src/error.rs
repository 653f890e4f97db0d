//! Client errors.

/// Errors raised by the ECS control-plane client.
#[derive(Debug, thiserror::Error)]
pub enum AwsError {
  /// The control plane rejected the request.
  #[error("ECS {action} failed ({code}): {message}")]
  Api {
    action: String,
    code: String,
    message: String,
  },

  /// The endpoint URL could not be built from the configured region.
  #[error("invalid endpoint: {message}")]
  Endpoint { message: String },

  /// SigV4 signing failed.
  #[error("failed to sign request: {message}")]
  Signing { message: String },

  /// The HTTP request itself failed.
  #[error("transport error: {source}")]
  Transport {
    #[from]
    source: reqwest::Error,
  },

  /// The control plane returned a body that is not valid JSON.
  #[error("invalid response body: {message}")]
  InvalidResponse { message: String },
}
