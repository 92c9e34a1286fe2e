//! Core domain layer for Graft.
//!
//! Pure logic only: the field model, naming, the render context, marker
//! replacement, import dedup and the mutators that describe file edits.
//! Reading and writing files happens through ports in the application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No I/O**: no filesystem, network, or logging
//! - **Few crates**: std, thiserror, serde derives, sha2 for bundle digests
//! - **Immutable entities**: descriptors and bundles are built once and shared
//! - **Auditable edits**: every file change is a [`FilePatch`] of ordered steps

pub mod entities;
pub mod error;
pub mod events;
pub mod imports;
pub mod mutators;
pub mod placeholder;
pub mod value_objects;

mod validation;

pub use entities::{
    command_args::CommandArgs,
    common::RelativePath,
    field::{Field, FieldList, PAGINATION_FIELD},
    layout::TargetLayout,
    naming::CaseVariants,
    operation::{OperationBuilder, OperationDescriptor},
    patch::{FilePatch, PatchStep},
    project_structure::{FileToWrite, ProjectStructure},
    render_context::RenderContext,
    template::{TemplateAsset, TemplateBundle},
};

pub use error::{DomainError, ErrorCategory};
pub use events::{Event, ProgressIndication};
pub use mutators::{CommandMutator, Mutator, SchemaMutator, query_mutators};
pub use value_objects::{FieldKind, Marker};

pub use validation::DomainValidator;
