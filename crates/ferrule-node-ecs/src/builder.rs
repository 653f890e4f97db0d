//! Request-body construction.
//!
//! Pure mapping from resolved parameters to the JSON body the control plane
//! expects. Optional string fields left at their empty default are omitted
//! rather than sent as empty strings, because the API distinguishes
//! "unspecified" from "empty". Repeatable wrapper groups are flattened to
//! plain arrays of their scalar values here.

use serde_json::{Map, Value, json};

use crate::params::{
  DescribeTasksParams, ListTasksParams, RequestParameters, RunTaskParams, StopTaskParams,
};

/// Build the JSON request body for one record's resolved parameters.
pub fn build_request(params: &RequestParameters) -> Value {
  match params {
    RequestParameters::RunTask(p) => build_run_task(p),
    RequestParameters::StopTask(p) => build_stop_task(p),
    RequestParameters::DescribeTasks(p) => build_describe_tasks(p),
    RequestParameters::ListTasks(p) => build_list_tasks(p),
  }
}

fn build_run_task(p: &RunTaskParams) -> Value {
  let mut body = Map::new();
  body.insert("taskDefinition".to_string(), json!(p.task_definition));
  body.insert("count".to_string(), json!(p.count));
  body.insert("launchType".to_string(), json!(p.launch_type));
  body.insert(
    "enableECSManagedTags".to_string(),
    json!(p.enable_ecs_managed_tags),
  );
  body.insert("propagateTags".to_string(), json!(p.propagate_tags));
  insert_if_set(&mut body, "cluster", &p.cluster);

  if let Some(vpc) = &p.network_configuration {
    let subnets: Vec<&str> = vpc.subnets.subnets.iter().map(|s| s.subnet.as_str()).collect();
    let security_groups: Vec<&str> = vpc
      .security_groups
      .security_groups
      .iter()
      .map(|g| g.security_group.as_str())
      .collect();
    body.insert(
      "networkConfiguration".to_string(),
      json!({
        "awsvpcConfiguration": {
          "assignPublicIp": vpc.assign_public_ip,
          "subnets": subnets,
          "securityGroups": security_groups,
        }
      }),
    );
  }

  Value::Object(body)
}

fn build_stop_task(p: &StopTaskParams) -> Value {
  let mut body = Map::new();
  body.insert("task".to_string(), json!(p.task));
  insert_if_set(&mut body, "cluster", &p.cluster);
  insert_if_set(&mut body, "reason", &p.reason);
  Value::Object(body)
}

fn build_describe_tasks(p: &DescribeTasksParams) -> Value {
  let tasks: Vec<&str> = p.tasks.tasks.iter().map(|t| t.task.as_str()).collect();
  let include: Vec<&str> = p.include.include.iter().map(|i| i.tag.as_str()).collect();

  let mut body = Map::new();
  body.insert("tasks".to_string(), json!(tasks));
  body.insert("include".to_string(), json!(include));
  insert_if_set(&mut body, "cluster", &p.cluster);
  Value::Object(body)
}

fn build_list_tasks(p: &ListTasksParams) -> Value {
  let mut body = Map::new();
  body.insert("launchType".to_string(), json!(p.launch_type));
  body.insert("desiredStatus".to_string(), json!(p.desired_status));
  insert_if_set(&mut body, "cluster", &p.cluster);
  Value::Object(body)
}

fn insert_if_set(body: &mut Map<String, Value>, field: &str, value: &str) {
  if !value.is_empty() {
    body.insert(field.to_string(), Value::String(value.to_string()));
  }
}
