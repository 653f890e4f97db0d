//! The node's configuration surface.

use ferrule_node::{CollectionGroup, CredentialRequirement, NodeDescription, NodeProperty};
use serde_json::json;

/// Build the full description of the ECS node: identity, credential
/// requirement, and the property schema for all four operations.
pub fn description() -> NodeDescription {
  NodeDescription {
    display_name: "AWS ECS".to_string(),
    name: "awsEcs".to_string(),
    group: vec!["transform".to_string()],
    version: 1,
    description: "Consume the AWS ECS API".to_string(),
    inputs: vec!["main".to_string()],
    outputs: vec!["main".to_string()],
    credentials: vec![CredentialRequirement {
      name: "aws".to_string(),
      required: true,
    }],
    properties: properties(),
  }
}

fn properties() -> Vec<NodeProperty> {
  let run_task = [json!("runTask")];
  let stop_task = [json!("stopTask")];
  let describe_tasks = [json!("describeTasks")];
  let list_tasks = [json!("listTasks")];
  let run_or_list = [json!("runTask"), json!("listTasks")];
  let any_operation = [
    json!("runTask"),
    json!("stopTask"),
    json!("describeTasks"),
    json!("listTasks"),
  ];

  vec![
    NodeProperty::options("operation", "Operation")
      .choice("Run Task", "runTask")
      .choice("Stop Task", "stopTask")
      .choice("Describe Tasks", "describeTasks")
      .choice("List Tasks", "listTasks")
      .default_value("runTask"),
    // Shared across all operations; the API falls back to the default
    // cluster when left empty.
    NodeProperty::string("cluster", "Cluster")
      .describe("The short name or full ARN of the cluster. If you do not specify a cluster, the default cluster is assumed.")
      .show_when("operation", &any_operation),
    NodeProperty::options("launchType", "Launch Type")
      .required()
      .choice("EC2", "EC2")
      .choice("Fargate", "FARGATE")
      .choice("External", "EXTERNAL")
      .default_value("FARGATE")
      .describe("The infrastructure to run your standalone task on")
      .show_when("operation", &run_or_list),
    // RunTask
    NodeProperty::string("taskDefinition", "Task Definition")
      .required()
      .describe("The family and revision (family:revision) or full ARN of the task definition to run. If a revision isn't specified, the latest ACTIVE revision is used.")
      .show_when("operation", &run_task),
    NodeProperty::number("count", "Count")
      .required()
      .default_value(1)
      .range(1, 10)
      .describe("The number of instantiations of the specified task to place on your cluster. You can specify up to 10 tasks for each call.")
      .show_when("operation", &run_task),
    NodeProperty::boolean("enableECSManagedTags", "Enable ECS Managed Tags")
      .describe("Whether to use Amazon ECS managed tags for the task")
      .show_when("operation", &run_task),
    NodeProperty::options("propagateTags", "Propagate Tags")
      .choice("None", "NONE")
      .choice("Service", "SERVICE")
      .choice("Task Definition", "TASK_DEFINITION")
      .default_value("NONE")
      .describe("Whether to propagate the tags from the task definition to the task. Tags can only be propagated during task creation.")
      .show_when("operation", &run_task)
      .show_when("enableECSManagedTags", &[json!(true)]),
    network_configuration().show_when("operation", &run_task),
    // StopTask
    NodeProperty::string("task", "Task")
      .required()
      .describe("The task ID or full ARN of the task to stop")
      .show_when("operation", &stop_task),
    NodeProperty::string("reason", "Reason")
      .describe("An optional message of up to 255 characters, returned with DescribeTasks")
      .show_when("operation", &stop_task),
    // DescribeTasks
    NodeProperty::fixed_collection("tasks", "Tasks")
      .group(
        CollectionGroup::new(
          "tasks",
          "Task",
          vec![
            NodeProperty::string("task", "Task ID")
              .required()
              .describe("The task ID or full ARN of a task to describe, up to 100 per call"),
          ],
        )
        .repeating(),
      )
      .show_when("operation", &describe_tasks),
    NodeProperty::fixed_collection("include", "Include")
      .group(
        CollectionGroup::new(
          "include",
          "Tag",
          vec![NodeProperty::string("tag", "Tag").describe("Extra detail to include, e.g. TAGS")],
        )
        .repeating(),
      )
      .show_when("operation", &describe_tasks),
    // ListTasks
    NodeProperty::options("desiredStatus", "Desired Status")
      .choice("Pending", "PENDING")
      .choice("Running", "RUNNING")
      .choice("Stopped", "STOPPED")
      .default_value("RUNNING")
      .describe("The task desired lifecycle status to filter the results by")
      .show_when("operation", &list_tasks),
  ]
}

fn network_configuration() -> NodeProperty {
  NodeProperty::fixed_collection("networkConfiguration", "Network Configuration").group(
    CollectionGroup::new(
      "awsvpcConfiguration",
      "VPC Configuration",
      vec![
        NodeProperty::options("assignPublicIp", "Assign Public IP")
          .choice("Enabled", "ENABLED")
          .choice("Disabled", "DISABLED")
          .default_value("DISABLED")
          .describe("Whether the task's elastic network interface receives a public IP address"),
        NodeProperty::fixed_collection("subnets", "Subnets")
          .required()
          .group(
            CollectionGroup::new(
              "subnets",
              "Subnet",
              vec![
                NodeProperty::string("subnet", "Subnet ID")
                  .required()
                  .describe("The ID of the subnet. All specified subnets must be from the same VPC."),
              ],
            )
            .repeating(),
          ),
        NodeProperty::fixed_collection("securityGroups", "Security Groups").group(
          CollectionGroup::new(
            "securityGroups",
            "Security Group",
            vec![
              NodeProperty::string("securityGroup", "Security Group ID")
                .describe("The ID of the security group. If none is given, the VPC default security group is used."),
            ],
          )
          .repeating(),
        ),
      ],
    ),
  )
}

#[cfg(test)]
mod tests {
  use ferrule_node::validate_values;
  use serde_json::json;

  use super::*;

  fn values(fields: serde_json::Value) -> serde_json::Map<String, serde_json::Value> {
    let serde_json::Value::Object(map) = fields else {
      panic!("fields must be an object");
    };
    map
  }

  #[test]
  fn run_task_configuration_validates() {
    let description = description();
    validate_values(
      &description.properties,
      &values(json!({
        "operation": "runTask",
        "taskDefinition": "worker:3",
        "count": 4,
        "launchType": "FARGATE",
      })),
    )
    .unwrap();
  }

  #[test]
  fn count_above_ten_is_rejected() {
    let description = description();
    validate_values(
      &description.properties,
      &values(json!({
        "operation": "runTask",
        "taskDefinition": "worker:3",
        "count": 11,
        "launchType": "FARGATE",
      })),
    )
    .unwrap_err();
  }

  #[test]
  fn propagate_tags_only_validated_when_managed_tags_enabled() {
    let description = description();
    // Hidden: passes even with a bogus value.
    validate_values(
      &description.properties,
      &values(json!({
        "operation": "runTask",
        "taskDefinition": "worker:3",
        "launchType": "EC2",
        "enableECSManagedTags": false,
        "propagateTags": "EVERYWHERE",
      })),
    )
    .unwrap();
    // Shown: the same value is rejected.
    validate_values(
      &description.properties,
      &values(json!({
        "operation": "runTask",
        "taskDefinition": "worker:3",
        "launchType": "EC2",
        "enableECSManagedTags": true,
        "propagateTags": "EVERYWHERE",
      })),
    )
    .unwrap_err();
  }

  #[test]
  fn stop_task_fields_are_hidden_for_other_operations() {
    let description = description();
    // `task` is required for stopTask but not for listTasks.
    validate_values(
      &description.properties,
      &values(json!({
        "operation": "listTasks",
        "launchType": "EC2",
        "desiredStatus": "STOPPED",
      })),
    )
    .unwrap();
    validate_values(
      &description.properties,
      &values(json!({"operation": "stopTask"})),
    )
    .unwrap_err();
  }
}
