//! AWS ECS node.
//!
//! Exposes four ECS control-plane operations (RunTask, StopTask,
//! DescribeTasks, ListTasks) as a per-record workflow step. For each input
//! record the node resolves the configured parameters at that record's
//! index, builds the matching JSON request body, issues the call, and
//! replaces the record's payload with the raw response.

mod builder;
mod description;
mod error;
mod execute;
mod operation;
mod params;

pub use builder::build_request;
pub use description::description;
pub use error::NodeError;
pub use execute::{EcsNode, ExecutionData};
pub use operation::Operation;
pub use params::{
  DescribeTasksParams, DesiredStatus, IncludeEntry, IncludeGroup, IpAssignment, LaunchType,
  ListTasksParams, NetworkConfigurationInput, PropagateTags, RequestParameters, RunTaskParams,
  SecurityGroupEntry, SecurityGroupGroup, StopTaskParams, SubnetEntry, SubnetGroup,
  TaskIdEntry, TaskIdGroup, VpcConfigurationInput,
};
