//! Infrastructure adapters for Graft.
//!
//! This crate implements the ports defined in `graft-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod builtin_templates;
pub mod events;
pub mod filesystem;
pub mod renderer;
pub mod template_loader;

// Re-export commonly used adapters
pub use builtin_templates::EmbeddedTemplates;
pub use events::MemoryEvents;
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use renderer::SimpleRenderer;
pub use template_loader::DirectoryTemplates;
