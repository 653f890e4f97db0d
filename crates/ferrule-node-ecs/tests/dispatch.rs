//! Dispatch-loop tests against a scripted control-plane client.

use std::sync::Mutex;

use async_trait::async_trait;
use ferrule_aws::{AwsError, EcsApi};
use ferrule_host::{RunPolicy, StaticParameterSource};
use ferrule_node_ecs::{EcsNode, ExecutionData, NodeError};
use serde_json::{Value, json};

/// Scripted client: records every call in order and fails on the given call
/// numbers.
struct ScriptedApi {
  calls: Mutex<Vec<(String, Value)>>,
  fail_on: Vec<usize>,
}

impl ScriptedApi {
  fn new(fail_on: &[usize]) -> Self {
    Self {
      calls: Mutex::new(Vec::new()),
      fail_on: fail_on.to_vec(),
    }
  }

  fn calls(&self) -> Vec<(String, Value)> {
    self.calls.lock().unwrap().clone()
  }
}

#[async_trait]
impl EcsApi for ScriptedApi {
  async fn call(&self, action: &str, body: &Value) -> Result<Value, AwsError> {
    let mut calls = self.calls.lock().unwrap();
    let call_index = calls.len();
    calls.push((action.to_string(), body.clone()));

    if self.fail_on.contains(&call_index) {
      return Err(AwsError::Api {
        action: action.to_string(),
        code: "ClusterNotFoundException".to_string(),
        message: "Cluster not found.".to_string(),
      });
    }
    Ok(json!({"tasks": [{"lastStatus": "PROVISIONING"}], "failures": [], "call": call_index}))
  }
}

fn run_task_source() -> StaticParameterSource {
  StaticParameterSource::new(
    json!({
      "operation": "runTask",
      "taskDefinition": "worker:3",
      "count": 1,
      "launchType": "FARGATE",
    })
    .as_object()
    .unwrap()
    .clone(),
  )
}

fn items(n: usize) -> Vec<ExecutionData> {
  (0..n)
    .map(|i| ExecutionData::new(json!({"id": i})))
    .collect()
}

#[tokio::test]
async fn success_replaces_each_payload_in_order() {
  let api = ScriptedApi::new(&[]);
  let node = EcsNode::new(api);
  let source = run_task_source();

  let output = node
    .execute(items(3), &source, RunPolicy::default())
    .await
    .unwrap();

  assert_eq!(output.len(), 3);
  for (i, record) in output.iter().enumerate() {
    assert_eq!(record.json["call"], json!(i));
    assert!(record.error.is_none());
  }
}

#[tokio::test]
async fn failure_with_continue_appends_a_diagnostic_record() {
  let api = ScriptedApi::new(&[1]);
  let node = EcsNode::new(api);
  let source = run_task_source();

  let output = node
    .execute(items(3), &source, RunPolicy::continue_on_fail())
    .await
    .unwrap();

  assert_eq!(output.len(), 4);
  // Records 0 and 2 carry responses in their original positions.
  assert_eq!(output[0].json["call"], json!(0));
  assert_eq!(output[2].json["call"], json!(2));
  // The failed record's own slot is untouched.
  assert_eq!(output[1].json, json!({"id": 1}));
  assert!(output[1].error.is_none());
  // The appended record carries the original payload, the error, and the
  // source index.
  assert_eq!(output[3].json, json!({"id": 1}));
  assert_eq!(output[3].paired_item, Some(1));
  let message = output[3].error.as_deref().unwrap();
  assert!(message.contains("ClusterNotFoundException"), "{message}");
}

#[tokio::test]
async fn failure_without_continue_aborts_before_later_records() {
  let api = ScriptedApi::new(&[1]);
  let node = EcsNode::new(api);
  let source = run_task_source();

  let err = node
    .execute(items(3), &source, RunPolicy::default())
    .await
    .unwrap_err();

  assert_eq!(err.item_index(), 1);
  assert!(matches!(err, NodeError::Api { item_index: 1, .. }));
  // Record 2 was never dispatched.
  assert_eq!(node.api().calls().len(), 2);
}

#[tokio::test]
async fn unsupported_operation_aborts_and_names_the_value() {
  let api = ScriptedApi::new(&[]);
  let node = EcsNode::new(api);
  let source = run_task_source().override_at(1, "operation", json!("deleteTask"));

  let err = node
    .execute(items(3), &source, RunPolicy::default())
    .await
    .unwrap_err();

  match err {
    NodeError::UnsupportedOperation {
      operation,
      item_index,
    } => {
      assert_eq!(operation, "deleteTask");
      assert_eq!(item_index, 1);
    }
    other => panic!("expected UnsupportedOperation, got {other}"),
  }
}

#[tokio::test]
async fn unsupported_operation_aborts_even_when_continuing_past_failures() {
  let api = ScriptedApi::new(&[]);
  let node = EcsNode::new(api);
  let source = run_task_source().override_at(0, "operation", json!("deleteTask"));

  let err = node
    .execute(items(2), &source, RunPolicy::continue_on_fail())
    .await
    .unwrap_err();
  assert!(matches!(err, NodeError::UnsupportedOperation { .. }));
}

#[tokio::test]
async fn operations_resolve_per_record_index() {
  let api = ScriptedApi::new(&[]);
  let node = EcsNode::new(api);
  let source = run_task_source()
    .override_at(1, "operation", json!("stopTask"))
    .override_at(1, "task", json!("task-arn"))
    .override_at(2, "operation", json!("listTasks"))
    .override_at(2, "desiredStatus", json!("STOPPED"));

  node
    .execute(items(3), &source, RunPolicy::default())
    .await
    .unwrap();

  let calls = node.api().calls();
  assert_eq!(calls.len(), 3);
  assert_eq!(calls[0].0, "RunTask");
  assert_eq!(calls[1].0, "StopTask");
  assert_eq!(calls[1].1["task"], json!("task-arn"));
  assert_eq!(calls[2].0, "ListTasks");
  assert_eq!(calls[2].1["desiredStatus"], json!("STOPPED"));
}

#[tokio::test]
async fn network_configuration_resolves_at_the_current_index() {
  let api = ScriptedApi::new(&[]);
  let node = EcsNode::new(api);
  let vpc = json!({
    "awsvpcConfiguration": {
      "assignPublicIp": "ENABLED",
      "subnets": {"subnets": [{"subnet": "subnet-b"}]},
    }
  });
  // Only record 1 configures a VPC; record 0 must not pick it up.
  let source = run_task_source().override_at(1, "networkConfiguration", vpc);

  node
    .execute(items(2), &source, RunPolicy::default())
    .await
    .unwrap();

  let calls = node.api().calls();
  assert!(calls[0].1.get("networkConfiguration").is_none());
  assert_eq!(
    calls[1].1["networkConfiguration"]["awsvpcConfiguration"]["subnets"],
    json!(["subnet-b"])
  );
}

#[tokio::test]
async fn empty_input_completes_without_calls() {
  let api = ScriptedApi::new(&[]);
  let node = EcsNode::new(api);
  let source = run_task_source();

  let output = node
    .execute(Vec::new(), &source, RunPolicy::default())
    .await
    .unwrap();
  assert!(output.is_empty());
  assert!(node.api().calls().is_empty());
}
