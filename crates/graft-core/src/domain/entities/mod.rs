pub mod command_args;
pub mod common;
pub mod field;
pub mod layout;
pub mod naming;
pub mod operation;
pub mod patch;
pub mod project_structure;
pub mod render_context;
pub mod template;

pub use crate::domain::DomainError;
pub use command_args::CommandArgs;
pub use field::{Field, FieldList};
pub use layout::TargetLayout;
pub use operation::OperationDescriptor;
pub use patch::{FilePatch, PatchStep};
pub use project_structure::ProjectStructure;
pub use render_context::RenderContext;
pub use template::{TemplateAsset, TemplateBundle};
