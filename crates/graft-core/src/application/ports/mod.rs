//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `graft-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: reading target files, writing results
//!   - `TemplateRenderer`: bundle + context into new files
//!   - `TemplateSource`: where the bundle comes from
//!   - `EventSink`: progress reporting
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (Defined in CLI layer, implemented by services)

pub mod output;

pub use output::{EventSink, Filesystem, NoopEvents, TemplateRenderer, TemplateSource};

#[cfg(test)]
pub use output::{MockEventSink, MockFilesystem};
