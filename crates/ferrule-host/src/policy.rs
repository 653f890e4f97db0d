use serde::{Deserialize, Serialize};

/// Run-level execution policy supplied by the host.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunPolicy {
  /// Convert per-record failures into appended error records instead of
  /// aborting the whole run.
  #[serde(default)]
  pub continue_on_fail: bool,
}

impl RunPolicy {
  pub fn continue_on_fail() -> Self {
    Self {
      continue_on_fail: true,
    }
  }
}
