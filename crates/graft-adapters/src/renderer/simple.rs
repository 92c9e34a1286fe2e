//! Strict `{{VARIABLE}}` substitution renderer.

use std::path::Path;

use graft_core::{
    application::ports::TemplateRenderer,
    domain::{
        DomainValidator as validator, ProjectStructure, RelativePath, RenderContext,
        TemplateBundle,
    },
    error::GraftResult,
};
use tracing::{debug, instrument};

/// Renders asset paths and contents with [`RenderContext::render`].
///
/// Any variable left unresolved in either fails the whole render.
pub struct SimpleRenderer;

impl SimpleRenderer {
    /// Create a new simple renderer.
    pub fn new() -> Self {
        Self
    }
}

impl Default for SimpleRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateRenderer for SimpleRenderer {
    #[instrument(skip_all, fields(bundle = %bundle.name()))]
    fn render(
        &self,
        bundle: &TemplateBundle,
        context: &RenderContext,
        output_root: &Path,
    ) -> GraftResult<ProjectStructure> {
        let mut structure = ProjectStructure::new(output_root);

        for asset in bundle.assets() {
            let template = asset.path().as_str();
            let path = RelativePath::try_new(context.render(template, template)?)?;
            let content = context.render(asset.source(), template)?;
            debug!(template, output = %path, "rendered");
            structure.add_file(path, content);
        }

        validator::validate_project_structure(&structure)?;

        Ok(structure)
    }
}
