//! Edits to existing generated files, one mutator per target file.
//!
//! A mutator knows which file it edits and which fragments go at which
//! marker. It never reads or writes; the application layer feeds it content
//! and persists the result. Mutators run in the order [`query_mutators`]
//! returns them.

mod command;
mod schema;

pub use command::CommandMutator;
pub use schema::SchemaMutator;

use crate::domain::{
    entities::{
        common::RelativePath, layout::TargetLayout, operation::OperationDescriptor,
        patch::FilePatch,
    },
    error::DomainError,
};

pub trait Mutator: Send + Sync {
    /// Short label used in plans, logs and events.
    fn name(&self) -> &'static str;

    /// File this mutator edits, relative to the app root.
    fn target(
        &self,
        layout: &TargetLayout,
        op: &OperationDescriptor,
    ) -> Result<RelativePath, DomainError>;

    /// The ordered edits for `op`.
    fn patch(&self, op: &OperationDescriptor) -> FilePatch;
}

/// Mutators for scaffolding a query, in application order.
pub fn query_mutators() -> Vec<Box<dyn Mutator>> {
    vec![Box::new(SchemaMutator), Box::new(CommandMutator)]
}
