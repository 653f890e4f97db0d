use serde::Deserialize;

/// AWS credential bundle supplied by the host's credential store.
///
/// Stored bundles routinely pick up surrounding whitespace from copy-paste;
/// every field is trimmed before use.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
  pub access_key_id: String,
  pub secret_access_key: String,
  pub region: String,
  #[serde(default)]
  pub session_token: Option<String>,
}

impl Credentials {
  pub fn new(access_key_id: &str, secret_access_key: &str, region: &str) -> Self {
    Self {
      access_key_id: access_key_id.trim().to_string(),
      secret_access_key: secret_access_key.trim().to_string(),
      region: region.trim().to_string(),
      session_token: None,
    }
  }

  pub fn with_session_token(mut self, token: &str) -> Self {
    self.session_token = Some(token.trim().to_string());
    self
  }

  /// Trim all fields; deserialized bundles bypass [`Credentials::new`].
  pub fn trimmed(self) -> Self {
    let trimmed = Self::new(&self.access_key_id, &self.secret_access_key, &self.region);
    match self.session_token {
      Some(token) => trimmed.with_session_token(&token),
      None => trimmed,
    }
  }
}
