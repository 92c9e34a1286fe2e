//! Templates compiled into the binary.
//!
//! Each file under `templates/` is pulled in with [`include_str!`] and
//! mapped to the output path it renders to. Both the path and the content
//! may use `{{VARIABLE}}`s.
//!
//! # Adding a template
//!
//! 1. Create the `.tpl` file under `templates/query/`
//! 2. Add a `(output path, include_str!(..))` entry to [`QUERY`]

use graft_core::{
    application::ports::TemplateSource,
    domain::{TemplateAsset, TemplateBundle},
    error::GraftResult,
};
use tracing::{debug, instrument};

/// Bundle name reported by `graft templates`.
pub const QUERY_BUNDLE: &str = "query";

/// The query operation templates: (output path, source).
pub const QUERY: &[(&str, &str)] = &[
    (
        "x/{{MODULE_NAME}}/client/cli/query_{{OPERATION_NAME_SNAKE}}.go",
        include_str!("../templates/query/cli_command.go.tpl"),
    ),
    (
        "x/{{MODULE_NAME}}/keeper/grpc_query_{{OPERATION_NAME_SNAKE}}.go",
        include_str!("../templates/query/keeper_handler.go.tpl"),
    ),
];

/// [`TemplateSource`] over [`QUERY`].
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedTemplates;

impl EmbeddedTemplates {
    pub fn new() -> Self {
        Self
    }
}

impl TemplateSource for EmbeddedTemplates {
    #[instrument(skip_all)]
    fn load(&self) -> GraftResult<TemplateBundle> {
        let assets = QUERY
            .iter()
            .map(|&(path, source)| TemplateAsset::embedded(path, source))
            .collect::<Result<Vec<_>, _>>()?;

        let bundle = TemplateBundle::new(QUERY_BUNDLE, assets)?;
        debug!(assets = bundle.len(), "embedded templates loaded");
        Ok(bundle)
    }

    fn describe(&self) -> String {
        "built-in".into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use graft_core::domain::{FieldList, OperationDescriptor, RenderContext};

    #[test]
    fn bundle_loads_with_stable_fingerprint() {
        let a = EmbeddedTemplates.load().unwrap();
        let b = EmbeddedTemplates.load().unwrap();
        assert_eq!(a.len(), QUERY.len());
        assert_eq!(a.fingerprint(), b.fingerprint());
        assert_eq!(a.name(), QUERY_BUNDLE);
    }

    #[test]
    fn every_template_renders_with_bound_context() {
        let op = OperationDescriptor::builder()
            .name("ShowPost")
            .module("blog")
            .app("myapp")
            .module_path("github.com/alice/myapp")
            .request_fields(FieldList::parse(&["id:uint"], "request").unwrap())
            .build()
            .unwrap();
        let ctx = RenderContext::bind(&op);

        for asset in EmbeddedTemplates.load().unwrap().assets() {
            let name = asset.path().as_str();
            let path = ctx.render(name, name).unwrap();
            let body = ctx.render(asset.source(), name).unwrap();
            assert!(path.ends_with("show_post.go"), "{path}");
            assert!(body.contains("ShowPost"));
            assert!(!body.contains("{{"), "{name} left a placeholder");
        }
    }
}
