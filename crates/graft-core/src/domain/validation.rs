use crate::domain::{
    entities::{OperationDescriptor, ProjectStructure, TemplateBundle},
    error::DomainError,
};

/// Centralized domain validation.
///
/// The service calls these at its boundaries instead of reaching into each
/// entity.
pub struct DomainValidator;

impl DomainValidator {
    pub fn validate_operation(op: &OperationDescriptor) -> Result<(), DomainError> {
        op.validate()
    }

    pub fn validate_bundle(bundle: &TemplateBundle) -> Result<(), DomainError> {
        if bundle.is_empty() {
            return Err(DomainError::InvalidTemplate(format!(
                "bundle '{}' has no templates",
                bundle.name()
            )));
        }
        Ok(())
    }

    pub fn validate_project_structure(structure: &ProjectStructure) -> Result<(), DomainError> {
        structure.validate()
    }
}
