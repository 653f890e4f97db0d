//! Per-record execution loop.

use ferrule_aws::EcsApi;
use ferrule_host::{ParameterSource, Parameters, RunPolicy};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, error, info, instrument};

use crate::builder::build_request;
use crate::error::NodeError;
use crate::operation::Operation;
use crate::params::RequestParameters;

/// One unit of workflow data flowing through the node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionData {
  /// The record payload.
  pub json: Value,
  /// Error message, set on appended failure records.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub error: Option<String>,
  /// Index of the input record a failure record was produced from.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub paired_item: Option<usize>,
}

impl ExecutionData {
  pub fn new(json: Value) -> Self {
    Self {
      json,
      error: None,
      paired_item: None,
    }
  }
}

/// The ECS node: executes the selected operation once per input record.
///
/// Strictly sequential; one call is in flight at a time and record order is
/// preserved. The client (and with it the credential bundle) is constructed
/// once per run, outside the loop.
pub struct EcsNode<A> {
  api: A,
}

impl<A: EcsApi> EcsNode<A> {
  pub fn new(api: A) -> Self {
    Self { api }
  }

  /// The underlying control-plane client.
  pub fn api(&self) -> &A {
    &self.api
  }

  /// Execute over all records, in input order.
  ///
  /// On success a record's payload is replaced with the raw response. On
  /// failure the run aborts with an index-tagged error, unless the policy
  /// continues past failures, in which case a diagnostic record carrying
  /// the original payload is appended after all input records and the
  /// failed record's own slot is left untouched. Unsupported operations
  /// abort regardless of policy.
  #[instrument(name = "ecs_node_execute", skip_all, fields(items = items.len()))]
  pub async fn execute(
    &self,
    mut items: Vec<ExecutionData>,
    source: &dyn ParameterSource,
    policy: RunPolicy,
  ) -> Result<Vec<ExecutionData>, NodeError> {
    let mut failures: Vec<ExecutionData> = Vec::new();

    for index in 0..items.len() {
      match self.execute_item(index, source).await {
        Ok(response) => {
          info!(item_index = index, "item completed");
          items[index].json = response;
        }
        Err(err) => {
          let fatal = matches!(err, NodeError::UnsupportedOperation { .. });
          if policy.continue_on_fail && !fatal {
            error!(item_index = index, error = %err, "item failed, continuing");
            failures.push(ExecutionData {
              json: items[index].json.clone(),
              error: Some(err.to_string()),
              paired_item: Some(index),
            });
          } else {
            error!(item_index = index, error = %err, "item failed, aborting run");
            return Err(err);
          }
        }
      }
    }

    items.extend(failures);
    Ok(items)
  }

  /// Resolve, build, and call for a single record.
  async fn execute_item(
    &self,
    index: usize,
    source: &dyn ParameterSource,
  ) -> Result<Value, NodeError> {
    let params = Parameters::new(source, index);

    let selected: String = params
      .typed_or("operation", String::new())
      .map_err(|source| NodeError::Parameter {
        item_index: index,
        source,
      })?;
    let operation =
      Operation::parse(&selected).ok_or_else(|| NodeError::UnsupportedOperation {
        operation: selected.clone(),
        item_index: index,
      })?;

    let resolved = RequestParameters::resolve(operation, &params).map_err(|source| {
      NodeError::Parameter {
        item_index: index,
        source,
      }
    })?;

    let body = build_request(&resolved);
    debug!(
      item_index = index,
      action = operation.action_name(),
      body = %body,
      "built request"
    );

    self
      .api
      .call(operation.action_name(), &body)
      .await
      .map_err(|source| NodeError::Api {
        item_index: index,
        source,
      })
  }
}
