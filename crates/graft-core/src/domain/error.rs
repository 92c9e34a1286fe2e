// ============================================================================
// domain/error.rs - DOMAIN ERROR TAXONOMY
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (plans are recomputed, errors are compared in tests)
/// - Categorizable (for CLI display and exit codes)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors (malformed descriptor / field)
    // ========================================================================
    #[error("Unknown field type '{token}' for field '{field}'")]
    UnknownFieldType { field: String, token: String },

    #[error("Malformed field '{token}': {reason}")]
    MalformedField { token: String, reason: String },

    #[error("Duplicate field '{name}' in {list} fields")]
    DuplicateField { name: String, list: &'static str },

    #[error("Field '{name}' is reserved for the pagination field")]
    ReservedField { name: String },

    #[error("Required field missing: {field}")]
    MissingRequiredField { field: &'static str },

    // ========================================================================
    // Naming Errors
    // ========================================================================
    #[error("Invalid name '{name}': {reason}")]
    InvalidName { name: String, reason: String },

    // ========================================================================
    // Render Errors
    // ========================================================================
    #[error("Unresolved variable '{{{{{variable}}}}}' in template '{template}'")]
    UnresolvedVariable { variable: String, template: String },

    #[error("Invalid template: {0}")]
    InvalidTemplate(String),

    #[error("Duplicate path in rendered output: {path}")]
    DuplicatePath { path: String },

    #[error("Absolute paths not allowed: {path}")]
    AbsolutePathNotAllowed { path: String },

    // ========================================================================
    // Marker Errors
    // ========================================================================
    #[error("Marker '{marker}' not found{}", at_path(.path))]
    MarkerNotFound {
        marker: String,
        path: Option<String>,
    },

    #[error("Marker '{marker}' occurs {count} times{}; expected exactly one", at_path(.path))]
    AmbiguousMarker {
        marker: String,
        count: usize,
        path: Option<String>,
    },
}

fn at_path(path: &Option<String>) -> String {
    path.as_ref()
        .map(|p| format!(" in {p}"))
        .unwrap_or_default()
}

impl DomainError {
    /// Attach the file a marker error was raised against.
    ///
    /// The replacer works on bare content and has no idea which file it came
    /// from; the pipeline calls this once it knows.
    pub fn at(self, file: impl Into<String>) -> Self {
        match self {
            Self::MarkerNotFound { marker, path: None } => Self::MarkerNotFound {
                marker,
                path: Some(file.into()),
            },
            Self::AmbiguousMarker {
                marker,
                count,
                path: None,
            } => Self::AmbiguousMarker {
                marker,
                count,
                path: Some(file.into()),
            },
            other => other,
        }
    }

    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::UnknownFieldType { token, .. } => vec![
                format!("'{}' is not a known field type", token),
                "Primitive types: string, bool, int, uint, coin".into(),
                "Lists: array.string, array.int, array.uint, array.coin".into(),
                "Custom message types start with an upper-case letter, e.g. author:User".into(),
            ],
            Self::MalformedField { .. } => vec![
                "Fields are written as name or name:type".into(),
                "Example: id:uint title:string".into(),
            ],
            Self::DuplicateField { name, .. } => {
                vec![format!("Field '{}' is listed twice; remove one", name)]
            }
            Self::ReservedField { .. } => vec![
                "Paginated operations add their own 'pagination' field".into(),
                "Rename the field or drop --paginated".into(),
            ],
            Self::InvalidName { name, reason } => vec![
                format!("'{}' cannot be used as an identifier: {}", name, reason),
                "Use ASCII letters, digits and underscores, starting with a letter".into(),
            ],
            Self::UnresolvedVariable { variable, template } => vec![
                format!("Template '{}' references '{}'", template, variable),
                "Check the template for typos or use a bundle matching this version".into(),
            ],
            Self::MarkerNotFound { marker, path } => vec![
                format!("The scaffolding marker '{}' is missing", marker),
                match path {
                    Some(p) => format!("Restore the marker line in {}", p),
                    None => "Restore the marker line in the target file".into(),
                },
                "Markers are planted by the app template; do not edit or delete them".into(),
            ],
            Self::AmbiguousMarker { marker, .. } => vec![
                format!("The marker '{}' must appear exactly once", marker),
                "Remove the duplicated marker line".into(),
            ],
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::UnknownFieldType { .. }
            | Self::MalformedField { .. }
            | Self::DuplicateField { .. }
            | Self::ReservedField { .. }
            | Self::MissingRequiredField { .. } => ErrorCategory::Validation,
            Self::InvalidName { .. } => ErrorCategory::Naming,
            Self::UnresolvedVariable { .. }
            | Self::InvalidTemplate(_)
            | Self::DuplicatePath { .. }
            | Self::AbsolutePathNotAllowed { .. } => ErrorCategory::Render,
            Self::MarkerNotFound { .. } | Self::AmbiguousMarker { .. } => {
                ErrorCategory::MarkerNotFound
            }
        }
    }
}

/// Error taxonomy shared by every layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Malformed descriptor or field.
    Validation,
    /// Invalid identifier.
    Naming,
    /// Unresolved template variable or bad rendered output.
    Render,
    /// A new file would overwrite an existing path.
    Conflict,
    /// Target file lacks (or duplicates) an expected anchor.
    MarkerNotFound,
    /// Target file unreadable or unwritable.
    Io,
    /// Configuration or setup problem.
    Configuration,
    /// A bug.
    Internal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marker_error_mentions_path_once_attached() {
        let err = DomainError::MarkerNotFound {
            marker: "schema-rpc".into(),
            path: None,
        };
        assert_eq!(err.to_string(), "Marker 'schema-rpc' not found");

        let err = err.at("proto/myapp/blog/query.proto");
        assert_eq!(
            err.to_string(),
            "Marker 'schema-rpc' not found in proto/myapp/blog/query.proto"
        );
    }

    #[test]
    fn at_keeps_an_existing_path() {
        let err = DomainError::MarkerNotFound {
            marker: "m".into(),
            path: Some("a.proto".into()),
        }
        .at("b.proto");
        assert!(err.to_string().ends_with("a.proto"));
    }

    #[test]
    fn unresolved_variable_renders_braces() {
        let err = DomainError::UnresolvedVariable {
            variable: "NOPE".into(),
            template: "x.go".into(),
        };
        assert_eq!(
            err.to_string(),
            "Unresolved variable '{{NOPE}}' in template 'x.go'"
        );
    }

    #[test]
    fn categories_follow_taxonomy() {
        assert_eq!(
            DomainError::UnknownFieldType {
                field: "a".into(),
                token: "float".into()
            }
            .category(),
            ErrorCategory::Validation
        );
        assert_eq!(
            DomainError::InvalidName {
                name: "1x".into(),
                reason: "r".into()
            }
            .category(),
            ErrorCategory::Naming
        );
        assert_eq!(
            DomainError::AmbiguousMarker {
                marker: "m".into(),
                count: 2,
                path: None
            }
            .category(),
            ErrorCategory::MarkerNotFound
        );
    }
}
