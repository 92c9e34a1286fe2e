use serde::{Deserialize, Serialize};

use crate::domain::{
    entities::{common::RelativePath, operation::OperationDescriptor},
    error::DomainError,
};

/// Where the existing generated files live inside an app.
///
/// - schema file: `proto/{app}/{module}/{group}.{schema_ext}`
/// - command file: `x/{module}/client/cli/{group}.{command_ext}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetLayout {
    pub group: String,
    pub schema_ext: String,
    pub command_ext: String,
}

impl Default for TargetLayout {
    fn default() -> Self {
        Self {
            group: "query".into(),
            schema_ext: "proto".into(),
            command_ext: "go".into(),
        }
    }
}

impl TargetLayout {
    pub fn schema_path(&self, op: &OperationDescriptor) -> Result<RelativePath, DomainError> {
        RelativePath::try_new(format!(
            "proto/{}/{}/{}.{}",
            op.app_name(),
            op.module_name(),
            self.group,
            self.schema_ext
        ))
    }

    pub fn command_path(&self, op: &OperationDescriptor) -> Result<RelativePath, DomainError> {
        RelativePath::try_new(format!(
            "x/{}/client/cli/{}.{}",
            op.module_name(),
            self.group,
            self.command_ext
        ))
    }
}
