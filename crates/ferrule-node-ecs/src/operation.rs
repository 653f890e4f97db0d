use serde::{Deserialize, Serialize};

/// The ECS control-plane operation selected for a record.
///
/// The selection is resolved independently per record index, so a single
/// run may mix operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Operation {
  RunTask,
  StopTask,
  DescribeTasks,
  ListTasks,
}

impl Operation {
  /// Parse the operation field value as it appears in node configuration.
  pub fn parse(value: &str) -> Option<Self> {
    match value {
      "runTask" => Some(Self::RunTask),
      "stopTask" => Some(Self::StopTask),
      "describeTasks" => Some(Self::DescribeTasks),
      "listTasks" => Some(Self::ListTasks),
      _ => None,
    }
  }

  /// The action name used on the wire (`X-Amz-Target` suffix).
  pub fn action_name(&self) -> &'static str {
    match self {
      Self::RunTask => "RunTask",
      Self::StopTask => "StopTask",
      Self::DescribeTasks => "DescribeTasks",
      Self::ListTasks => "ListTasks",
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parses_configuration_values() {
    assert_eq!(Operation::parse("runTask"), Some(Operation::RunTask));
    assert_eq!(Operation::parse("stopTask"), Some(Operation::StopTask));
    assert_eq!(
      Operation::parse("describeTasks"),
      Some(Operation::DescribeTasks)
    );
    assert_eq!(Operation::parse("listTasks"), Some(Operation::ListTasks));
    assert_eq!(Operation::parse("RunTask"), None);
    assert_eq!(Operation::parse("deleteTask"), None);
  }

  #[test]
  fn action_names_match_the_wire() {
    assert_eq!(Operation::RunTask.action_name(), "RunTask");
    assert_eq!(Operation::ListTasks.action_name(), "ListTasks");
  }
}
