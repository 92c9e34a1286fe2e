use crate::domain::{
    entities::{
        common::RelativePath, layout::TargetLayout, operation::OperationDescriptor,
        patch::FilePatch,
    },
    error::DomainError,
    mutators::Mutator,
    value_objects::Marker,
};

const INDENT: &str = "\t";

/// Registers the operation's command with the module's query command.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommandMutator;

impl CommandMutator {
    pub fn registration_fragment(op: &OperationDescriptor) -> String {
        format!("cmd.AddCommand(Cmd{}())\n\n{INDENT}", op.name().upper_camel())
    }
}

impl Mutator for CommandMutator {
    fn name(&self) -> &'static str {
        "command"
    }

    fn target(
        &self,
        layout: &TargetLayout,
        op: &OperationDescriptor,
    ) -> Result<RelativePath, DomainError> {
        layout.command_path(op)
    }

    fn patch(&self, op: &OperationDescriptor) -> FilePatch {
        FilePatch::new().insert(Marker::COMMAND_REGISTRATION, Self::registration_fragment(op))
    }
}
