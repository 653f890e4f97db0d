//! SigV4-signed JSON client for the ECS control plane.

use std::time::SystemTime;

use async_trait::async_trait;
use aws_sigv4::http_request::{SignableBody, SignableRequest, SigningSettings, sign};
use aws_sigv4::sign::v4::SigningParams;
use aws_smithy_runtime_api::client::identity::Identity;
use tracing::{debug, trace, warn};

use crate::credentials::Credentials;
use crate::error::AwsError;

/// JSON 1.1 target prefix for the ECS API (version 2014-11-13).
const TARGET_PREFIX: &str = "AmazonEC2ContainerServiceV20141113";
const SIGNING_NAME: &str = "ecs";
const CONTENT_TYPE: &str = "application/x-amz-json-1.1";

/// A single ECS control-plane call.
///
/// This is the remote seam of the node: transport, signing, and the service
/// endpoint live behind it, so the dispatch loop can be exercised against a
/// scripted implementation.
#[async_trait]
pub trait EcsApi: Send + Sync {
  /// Invoke `action` with the given JSON request body and return the raw
  /// response object.
  async fn call(
    &self,
    action: &str,
    body: &serde_json::Value,
  ) -> Result<serde_json::Value, AwsError>;
}

/// HTTP client for the ECS regional endpoint.
pub struct EcsClient {
  http: reqwest::Client,
  credentials: Credentials,
  endpoint: String,
}

impl EcsClient {
  /// Create a client for the region named in the credential bundle.
  pub fn new(credentials: Credentials) -> Self {
    let endpoint = format!("https://ecs.{}.amazonaws.com/", credentials.region);
    Self::with_endpoint(credentials, endpoint)
  }

  /// Create a client against an explicit endpoint (LocalStack and friends).
  pub fn with_endpoint(credentials: Credentials, endpoint: impl Into<String>) -> Self {
    Self {
      http: reqwest::Client::new(),
      credentials,
      endpoint: endpoint.into(),
    }
  }

  pub fn endpoint(&self) -> &str {
    &self.endpoint
  }
}

#[async_trait]
impl EcsApi for EcsClient {
  async fn call(
    &self,
    action: &str,
    body: &serde_json::Value,
  ) -> Result<serde_json::Value, AwsError> {
    let target = format!("{}.{}", TARGET_PREFIX, action);
    let payload = body.to_string();
    debug!(action, endpoint = %self.endpoint, "ECS request");
    trace!(body = %payload, "ECS request body");

    let url = url::Url::parse(&self.endpoint).map_err(|e| AwsError::Endpoint {
      message: e.to_string(),
    })?;
    let host = url.host_str().ok_or_else(|| AwsError::Endpoint {
      message: format!("endpoint '{}' has no host", self.endpoint),
    })?;

    // Headers participating in the signature.
    let headers = vec![
      ("host".to_string(), host.to_string()),
      ("x-amz-target".to_string(), target.clone()),
      ("content-type".to_string(), CONTENT_TYPE.to_string()),
    ];

    let identity: Identity = aws_credential_types::Credentials::new(
      &self.credentials.access_key_id,
      &self.credentials.secret_access_key,
      self.credentials.session_token.clone(),
      None,
      "ferrule",
    )
    .into();

    let signing_params = SigningParams::builder()
      .identity(&identity)
      .region(&self.credentials.region)
      .name(SIGNING_NAME)
      .time(SystemTime::now())
      .settings(SigningSettings::default())
      .build()
      .map_err(|e| AwsError::Signing {
        message: e.to_string(),
      })?
      .into();

    let signable = SignableRequest::new(
      "POST",
      url.path(),
      headers.iter().map(|(k, v)| (k.as_str(), v.as_str())),
      SignableBody::Bytes(payload.as_bytes()),
    )
    .map_err(|e| AwsError::Signing {
      message: e.to_string(),
    })?;

    let (instructions, _signature) = sign(signable, &signing_params)
      .map_err(|e| AwsError::Signing {
        message: e.to_string(),
      })?
      .into_parts();

    let mut request = self
      .http
      .post(self.endpoint.clone())
      .header("X-Amz-Target", &target)
      .header("Content-Type", CONTENT_TYPE)
      .body(payload);
    for (name, value) in instructions.headers() {
      request = request.header(name.to_string(), value.to_string());
    }

    let response = request.send().await?;
    let status = response.status();
    let text = response.text().await?;

    if !status.is_success() {
      let (code, message) = parse_api_error(&text);
      warn!(action, %status, code = %code, "ECS request failed");
      return Err(AwsError::Api {
        action: action.to_string(),
        code,
        message,
      });
    }

    if text.is_empty() {
      return Ok(serde_json::Value::Object(serde_json::Map::new()));
    }
    serde_json::from_str(&text).map_err(|e| AwsError::InvalidResponse {
      message: e.to_string(),
    })
  }
}

/// Extract the error code and message from a JSON 1.1 error body.
///
/// The code arrives in `__type`, optionally prefixed with the service shape
/// namespace (`com.amazonaws.ecs#ClusterNotFoundException`).
fn parse_api_error(body: &str) -> (String, String) {
  let parsed: serde_json::Value = match serde_json::from_str(body) {
    Ok(value) => value,
    Err(_) => {
      return (
        "Unknown".to_string(),
        body.chars().take(500).collect::<String>(),
      );
    }
  };

  let code = parsed["__type"]
    .as_str()
    .map(|t| t.rsplit('#').next().unwrap_or(t).to_string())
    .unwrap_or_else(|| "Unknown".to_string());
  let message = parsed["message"]
    .as_str()
    .or_else(|| parsed["Message"].as_str())
    .unwrap_or("")
    .to_string();

  (code, message)
}
