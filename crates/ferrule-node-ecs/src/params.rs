//! Per-operation request parameters.
//!
//! Each operation carries its own typed field set, resolved per record
//! index from the host's parameter source. Repeatable UI groups (subnets,
//! security groups, task IDs, include list) keep their wrapper shape here;
//! the request builder flattens them when the body is built.

use ferrule_host::{ParamError, Parameters};
use serde::{Deserialize, Serialize};

use crate::operation::Operation;

/// Resolved parameters for one record, tagged by the selected operation.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestParameters {
  RunTask(RunTaskParams),
  StopTask(StopTaskParams),
  DescribeTasks(DescribeTasksParams),
  ListTasks(ListTasksParams),
}

impl RequestParameters {
  /// Resolve the parameter set for `operation` at the record index the
  /// given view is bound to.
  pub fn resolve(operation: Operation, params: &Parameters<'_>) -> Result<Self, ParamError> {
    match operation {
      Operation::RunTask => Ok(Self::RunTask(RunTaskParams::resolve(params)?)),
      Operation::StopTask => Ok(Self::StopTask(StopTaskParams::resolve(params)?)),
      Operation::DescribeTasks => Ok(Self::DescribeTasks(DescribeTasksParams::resolve(params)?)),
      Operation::ListTasks => Ok(Self::ListTasks(ListTasksParams::resolve(params)?)),
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LaunchType {
  Ec2,
  Fargate,
  External,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PropagateTags {
  None,
  Service,
  TaskDefinition,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IpAssignment {
  Enabled,
  Disabled,
}

impl Default for IpAssignment {
  fn default() -> Self {
    Self::Disabled
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DesiredStatus {
  Pending,
  Running,
  Stopped,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunTaskParams {
  pub task_definition: String,
  /// Number of task instantiations, 1-10 (bounded by the schema layer).
  pub count: i64,
  pub launch_type: LaunchType,
  pub cluster: String,
  pub enable_ecs_managed_tags: bool,
  pub propagate_tags: PropagateTags,
  pub network_configuration: Option<VpcConfigurationInput>,
}

impl RunTaskParams {
  fn resolve(params: &Parameters<'_>) -> Result<Self, ParamError> {
    // The VPC group is optional; an empty object means the user never
    // populated it.
    let network_configuration = match params.value("networkConfiguration") {
      Some(value) if !value.is_null() => {
        let input: NetworkConfigurationInput =
          serde_json::from_value(value).map_err(|e| ParamError::Invalid {
            field: "networkConfiguration".to_string(),
            message: e.to_string(),
          })?;
        input.awsvpc_configuration
      }
      _ => None,
    };

    Ok(Self {
      task_definition: params.typed("taskDefinition")?,
      count: params.typed_or("count", 1)?,
      launch_type: params.typed_or("launchType", LaunchType::Fargate)?,
      cluster: params.typed_or("cluster", String::new())?,
      enable_ecs_managed_tags: params.typed_or("enableECSManagedTags", false)?,
      propagate_tags: params.typed_or("propagateTags", PropagateTags::None)?,
      network_configuration,
    })
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StopTaskParams {
  pub task: String,
  pub cluster: String,
  /// Optional stop reason; length limits are enforced by the API itself.
  pub reason: String,
}

impl StopTaskParams {
  fn resolve(params: &Parameters<'_>) -> Result<Self, ParamError> {
    Ok(Self {
      task: params.typed("task")?,
      cluster: params.typed_or("cluster", String::new())?,
      reason: params.typed_or("reason", String::new())?,
    })
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DescribeTasksParams {
  pub tasks: TaskIdGroup,
  pub include: IncludeGroup,
  pub cluster: String,
}

impl DescribeTasksParams {
  fn resolve(params: &Parameters<'_>) -> Result<Self, ParamError> {
    Ok(Self {
      tasks: params.typed_or("tasks", TaskIdGroup::default())?,
      include: params.typed_or("include", IncludeGroup::default())?,
      cluster: params.typed_or("cluster", String::new())?,
    })
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListTasksParams {
  pub launch_type: LaunchType,
  pub desired_status: DesiredStatus,
  pub cluster: String,
}

impl ListTasksParams {
  fn resolve(params: &Parameters<'_>) -> Result<Self, ParamError> {
    Ok(Self {
      launch_type: params.typed_or("launchType", LaunchType::Fargate)?,
      desired_status: params.typed_or("desiredStatus", DesiredStatus::Running)?,
      cluster: params.typed_or("cluster", String::new())?,
    })
  }
}

/// The `networkConfiguration` field as it arrives from the UI.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkConfigurationInput {
  #[serde(default)]
  pub awsvpc_configuration: Option<VpcConfigurationInput>,
}

/// The VPC configuration group, lists still in wrapper form.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VpcConfigurationInput {
  #[serde(default)]
  pub assign_public_ip: IpAssignment,
  #[serde(default)]
  pub subnets: SubnetGroup,
  #[serde(default)]
  pub security_groups: SecurityGroupGroup,
}

/// Repeatable subnet group: `{"subnets": [{"subnet": "subnet-..."}]}`.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct SubnetGroup {
  #[serde(default)]
  pub subnets: Vec<SubnetEntry>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SubnetEntry {
  pub subnet: String,
}

/// Repeatable security-group group, same wrapper shape as subnets.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityGroupGroup {
  #[serde(default)]
  pub security_groups: Vec<SecurityGroupEntry>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityGroupEntry {
  pub security_group: String,
}

/// Repeatable task-ID group for DescribeTasks.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct TaskIdGroup {
  #[serde(default)]
  pub tasks: Vec<TaskIdEntry>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TaskIdEntry {
  pub task: String,
}

/// Repeatable include group for DescribeTasks (`TAGS` is the only value the
/// API currently accepts).
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct IncludeGroup {
  #[serde(default)]
  pub include: Vec<IncludeEntry>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct IncludeEntry {
  pub tag: String,
}
