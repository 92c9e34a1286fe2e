//! One module per subcommand. Handlers translate arguments into core calls
//! and render the result; no business logic lives here.

pub mod completions;
pub mod config;
pub mod init;
pub mod scaffold;
pub mod templates;

use graft_adapters::{DirectoryTemplates, EmbeddedTemplates};
use graft_core::application::ports::TemplateSource;

use crate::config::AppConfig;

/// The configured template directory, or the built-in bundle.
pub(crate) fn template_source(config: &AppConfig) -> Box<dyn TemplateSource> {
    match &config.templates.local_path {
        Some(dir) => Box::new(DirectoryTemplates::new(dir)),
        None => Box::new(EmbeddedTemplates),
    }
}
