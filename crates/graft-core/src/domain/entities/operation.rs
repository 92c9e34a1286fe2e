//! The `OperationDescriptor` aggregate root and its typestate builder.
//!
//! An `OperationDescriptor` is the fully-validated, declarative input of one
//! scaffold invocation: a named operation with typed request/response fields
//! and its module/app context. Once built it is immutable.
//!
//! # Typestate builder
//!
//! The builder uses two phantom marker types (`NoName` / `HasName`) to
//! enforce at *compile time* that the operation name is set before anything
//! else. Runtime validation still runs at `build()` for what the type system
//! cannot express (identifier syntax, duplicate fields, reserved names).
//!
//! # Domain purity
//!
//! This module must not import `tracing`.

use std::fmt;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use crate::domain::{
    entities::{
        field::{FieldList, PAGINATION_FIELD},
        naming::{CaseVariants, validate_identifier},
    },
    error::DomainError,
};

// ── Aggregate root ────────────────────────────────────────────────────────────

/// A fully-validated description of one operation to scaffold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationDescriptor {
    name: CaseVariants,
    description: String,
    module_path: String,
    module_name: String,
    app_name: String,
    app_path: PathBuf,
    request: FieldList,
    response: FieldList,
    paginated: bool,
}

impl OperationDescriptor {
    /// Start building a new descriptor.
    pub fn builder() -> OperationBuilder<NoName> {
        OperationBuilder::new()
    }

    pub fn name(&self) -> &CaseVariants {
        &self.name
    }
    pub fn description(&self) -> &str {
        &self.description
    }
    /// Go-style module path of the app, e.g. `github.com/alice/myapp`.
    pub fn module_path(&self) -> &str {
        &self.module_path
    }
    pub fn module_name(&self) -> &str {
        &self.module_name
    }
    pub fn app_name(&self) -> &str {
        &self.app_name
    }
    /// Root directory of the app on disk.
    pub fn app_path(&self) -> &Path {
        &self.app_path
    }
    pub fn request_fields(&self) -> &FieldList {
        &self.request
    }
    pub fn response_fields(&self) -> &FieldList {
        &self.response
    }
    pub const fn paginated(&self) -> bool {
        self.paginated
    }

    /// Module path with a leading domain segment removed.
    ///
    /// `github.com/alice/myapp` → `alice/myapp`; `myapp` → `myapp`.
    pub fn app_module_path(&self) -> String {
        let mut segments: Vec<&str> = self
            .module_path
            .split('/')
            .filter(|s| !s.is_empty())
            .collect();
        if segments.len() > 1 && segments[0].contains('.') {
            segments.remove(0);
        }
        segments.join("/")
    }

    /// Validate internal consistency.
    ///
    /// Called automatically by the builder.
    pub fn validate(&self) -> Result<(), DomainError> {
        validate_identifier(&self.module_name)?;
        validate_app_name(&self.app_name)?;

        if self.module_path.trim().is_empty() {
            return Err(DomainError::MissingRequiredField {
                field: "module_path",
            });
        }

        if self.paginated {
            for list in [&self.request, &self.response] {
                if list.contains(PAGINATION_FIELD) {
                    return Err(DomainError::ReservedField {
                        name: PAGINATION_FIELD.into(),
                    });
                }
            }
        }

        Ok(())
    }
}

impl fmt::Display for OperationDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}.{}",
            self.app_name,
            self.module_name,
            self.name.upper_camel()
        )?;
        if self.paginated {
            write!(f, " (paginated)")?;
        }
        Ok(())
    }
}

/// App names come from module paths and may carry `-`; they still end up as
/// directory names, so separators and whitespace are rejected.
fn validate_app_name(name: &str) -> Result<(), DomainError> {
    let invalid = |reason: &str| DomainError::InvalidName {
        name: name.to_string(),
        reason: reason.to_string(),
    };

    if name.is_empty() {
        return Err(invalid("app name cannot be empty"));
    }
    if !name.starts_with(|c: char| c.is_ascii_alphabetic()) {
        return Err(invalid("must start with an ASCII letter"));
    }
    if let Some(bad) = name
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || *c == '_' || *c == '-'))
    {
        return Err(invalid(&format!("contains '{bad}'")));
    }
    Ok(())
}

// ── Typestate markers ─────────────────────────────────────────────────────────

/// Marker: the operation name has not been set.
pub struct NoName;
/// Marker: the operation name is set; other fields may now be configured.
pub struct HasName;

// ── Builder ───────────────────────────────────────────────────────────────────

/// Typestate builder for [`OperationDescriptor`].
pub struct OperationBuilder<N> {
    name: Option<String>,
    description: Option<String>,
    module_path: Option<String>,
    module_name: Option<String>,
    app_name: Option<String>,
    app_path: PathBuf,
    request: FieldList,
    response: FieldList,
    paginated: bool,
    _marker: PhantomData<N>,
}

impl OperationBuilder<NoName> {
    fn new() -> Self {
        Self {
            name: None,
            description: None,
            module_path: None,
            module_name: None,
            app_name: None,
            app_path: PathBuf::from("."),
            request: FieldList::default(),
            response: FieldList::default(),
            paginated: false,
            _marker: PhantomData,
        }
    }

    /// Set the canonical operation name (any casing).
    pub fn name(self, name: impl Into<String>) -> OperationBuilder<HasName> {
        OperationBuilder {
            name: Some(name.into()),
            description: self.description,
            module_path: self.module_path,
            module_name: self.module_name,
            app_name: self.app_name,
            app_path: self.app_path,
            request: self.request,
            response: self.response,
            paginated: self.paginated,
            _marker: PhantomData,
        }
    }
}

impl OperationBuilder<HasName> {
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn module(mut self, module_name: impl Into<String>) -> Self {
        self.module_name = Some(module_name.into());
        self
    }

    pub fn app(mut self, app_name: impl Into<String>) -> Self {
        self.app_name = Some(app_name.into());
        self
    }

    /// Go-style module path. Defaults to the app name.
    pub fn module_path(mut self, module_path: impl Into<String>) -> Self {
        self.module_path = Some(module_path.into());
        self
    }

    /// App root on disk. Defaults to `.`.
    pub fn app_path(mut self, app_path: impl Into<PathBuf>) -> Self {
        self.app_path = app_path.into();
        self
    }

    pub fn request_fields(mut self, fields: FieldList) -> Self {
        self.request = fields;
        self
    }

    pub fn response_fields(mut self, fields: FieldList) -> Self {
        self.response = fields;
        self
    }

    pub fn paginated(mut self, paginated: bool) -> Self {
        self.paginated = paginated;
        self
    }

    /// Validate and build.
    ///
    /// # Errors
    /// - `InvalidName` for a bad operation, module or app name
    /// - `MissingRequiredField` when module or app is unset
    /// - `ReservedField` when a paginated operation declares `pagination`
    pub fn build(self) -> Result<OperationDescriptor, DomainError> {
        let name = CaseVariants::new(self.name.unwrap_or_default())?;
        let module_name = self
            .module_name
            .ok_or(DomainError::MissingRequiredField { field: "module" })?;
        let app_name = self
            .app_name
            .ok_or(DomainError::MissingRequiredField { field: "app" })?;
        let module_path = self.module_path.unwrap_or_else(|| app_name.clone());
        let description = self
            .description
            .unwrap_or_else(|| format!("Query {}", name.lower_camel()));

        let descriptor = OperationDescriptor {
            name,
            description,
            module_path,
            module_name,
            app_name,
            app_path: self.app_path,
            request: self.request,
            response: self.response,
            paginated: self.paginated,
        };
        descriptor.validate()?;
        Ok(descriptor)
    }
}
