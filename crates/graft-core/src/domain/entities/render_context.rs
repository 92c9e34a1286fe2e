//! Context binder and strict `{{VARIABLE}}` substitution.
//!
//! [`RenderContext::bind`] is a pure function of an [`OperationDescriptor`]:
//! it produces exactly the variables below and nothing else.
//!
//! | Variable | Example |
//! |----------|---------|
//! | `APP_NAME` | `myapp` |
//! | `APP_PATH` | `./myapp` |
//! | `MODULE_NAME` | `blog` |
//! | `MODULE_PATH` | `github.com/alice/myapp` |
//! | `DESCRIPTION` | `Query showPost` |
//! | `OPERATION_NAME` | `showPost` |
//! | `OPERATION_NAME_PASCAL` | `ShowPost` |
//! | `OPERATION_NAME_CAMEL` | `showPost` |
//! | `OPERATION_NAME_SNAKE` | `show_post` |
//! | `OPERATION_NAME_KEBAB` | `show-post` |
//! | `REQ_FIELDS` | `id:uint, title:string` |
//! | `REQ_FIELDS_COUNT` | `2` |
//! | `RES_FIELDS` | `post:Post` |
//! | `RES_FIELDS_COUNT` | `1` |
//! | `PAGINATED` | `true` |
//! | `CLI_IMPORTS` | extra Go imports of the command |
//! | `CLI_ARGS` | statements reading `args` into request values |
//! | `CLI_PARAMS` | fields of the request literal |
//! | `CLI_PAGE_REQUEST` | page request read from flags, if paginated |
//! | `CLI_PAGE_FLAGS` | page flag registration, if paginated |

use std::collections::BTreeMap;

use crate::domain::{
    entities::{command_args::CommandArgs, operation::OperationDescriptor},
    error::DomainError,
};

/// Immutable name → value mapping consumed by the renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderContext {
    // BTreeMap keeps substitution order (and debug output) deterministic.
    variables: BTreeMap<&'static str, String>,
}

impl RenderContext {
    /// Every variable name `bind` produces.
    pub const VARIABLES: [&'static str; 20] = [
        "APP_NAME",
        "APP_PATH",
        "MODULE_NAME",
        "MODULE_PATH",
        "DESCRIPTION",
        "OPERATION_NAME",
        "OPERATION_NAME_PASCAL",
        "OPERATION_NAME_CAMEL",
        "OPERATION_NAME_SNAKE",
        "OPERATION_NAME_KEBAB",
        "REQ_FIELDS",
        "REQ_FIELDS_COUNT",
        "RES_FIELDS",
        "RES_FIELDS_COUNT",
        "PAGINATED",
        "CLI_IMPORTS",
        "CLI_ARGS",
        "CLI_PARAMS",
        "CLI_PAGE_REQUEST",
        "CLI_PAGE_FLAGS",
    ];

    /// Bind every descriptor field to its template variable.
    pub fn bind(op: &OperationDescriptor) -> Self {
        let name = op.name();
        let args = CommandArgs::of(op);
        let values = [
            op.app_name().to_string(),
            op.app_path().display().to_string(),
            op.module_name().to_string(),
            op.module_path().to_string(),
            op.description().to_string(),
            name.original().to_string(),
            name.upper_camel().to_string(),
            name.lower_camel().to_string(),
            name.snake().to_string(),
            name.kebab().to_string(),
            op.request_fields().describe(),
            op.request_fields().len().to_string(),
            op.response_fields().describe(),
            op.response_fields().len().to_string(),
            op.paginated().to_string(),
            args.imports,
            args.parse,
            args.params,
            args.page_request,
            args.page_flags,
        ];

        Self {
            variables: Self::VARIABLES.into_iter().zip(values).collect(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.variables.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    /// Substitute every `{{VARIABLE}}` in `source`.
    ///
    /// `template` names the source in errors. Any `{{IDENT}}` left after
    /// substitution is fatal: bound values are never rescanned, so an
    /// unresolved reference can only come from the template itself.
    pub fn render(&self, source: &str, template: &str) -> Result<String, DomainError> {
        let mut out = String::with_capacity(source.len());
        let mut rest = source;

        while let Some(start) = rest.find("{{") {
            out.push_str(&rest[..start]);
            let after = &rest[start + 2..];

            match after.find("}}") {
                Some(end) if is_variable_name(&after[..end]) => {
                    let key = &after[..end];
                    let value = self.get(key).ok_or_else(|| DomainError::UnresolvedVariable {
                        variable: key.to_string(),
                        template: template.to_string(),
                    })?;
                    out.push_str(value);
                    rest = &after[end + 2..];
                }
                // Not a variable reference (e.g. Go composite literal `{{`).
                _ => {
                    out.push_str("{{");
                    rest = after;
                }
            }
        }

        out.push_str(rest);
        Ok(out)
    }
}

fn is_variable_name(s: &str) -> bool {
    s.starts_with(|c: char| c.is_ascii_alphabetic() || c == '_')
        && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}
