//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `graft-adapters` crate provides implementations.

use std::path::Path;

use crate::domain::{Event, ProjectStructure, RenderContext, TemplateBundle};
use crate::error::GraftResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `graft_adapters::filesystem::LocalFilesystem` (production)
/// - `graft_adapters::filesystem::MemoryFilesystem` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> GraftResult<()>;

    /// Read a whole UTF-8 file.
    fn read_to_string(&self, path: &Path) -> GraftResult<String>;

    /// Write content to a file, replacing what was there.
    fn write_file(&self, path: &Path, content: &str) -> GraftResult<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;
}

/// Port for template rendering.
///
/// Implemented by:
/// - `graft_adapters::renderer::SimpleRenderer` (strict `{{VAR}}` substitution)
pub trait TemplateRenderer: Send + Sync {
    /// Render every asset of `bundle` (paths and contents) into files
    /// relative to `output_root`.
    fn render(
        &self,
        bundle: &TemplateBundle,
        context: &RenderContext,
        output_root: &Path,
    ) -> GraftResult<ProjectStructure>;
}

/// Port for obtaining the template bundle.
///
/// Implemented by:
/// - `graft_adapters::builtin_templates::EmbeddedTemplates` (compiled in)
/// - `graft_adapters::template_loader::DirectoryTemplates` (a local directory)
pub trait TemplateSource: Send + Sync {
    /// Load the bundle. Called once per process.
    fn load(&self) -> GraftResult<TemplateBundle>;

    /// Where the bundle comes from, for display.
    fn describe(&self) -> String;
}

/// Port for progress events.
#[cfg_attr(test, mockall::automock)]
pub trait EventSink: Send + Sync {
    fn send(&self, event: Event);
}

/// Sink that drops every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopEvents;

impl EventSink for NoopEvents {
    fn send(&self, _event: Event) {}
}
