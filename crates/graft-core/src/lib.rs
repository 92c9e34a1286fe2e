//! Graft Core - Hexagonal Architecture Implementation
//!
//! Domain and application layers for Graft, a scaffolder that renders new
//! files from templates and splices fragments into existing generated files
//! at marker lines.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            graft-cli (CLI)              │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │   (ScaffoldService, TemplateService)    │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (Filesystem, Renderer, Source, Events)  │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     graft-adapters (Infrastructure)     │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │ (Field, OperationDescriptor, FilePatch) │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use graft_core::prelude::*;
//!
//! let op = OperationDescriptor::builder()
//!     .name("ShowPost")
//!     .module("blog")
//!     .app("myapp")
//!     .request_fields(FieldList::parse(&["id:uint"], "request").unwrap())
//!     .build()
//!     .unwrap();
//!
//! // With injected adapters:
//! let service = ScaffoldService::new(bundle, renderer, filesystem, events);
//! service.scaffold(&op).unwrap();
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        ScaffoldPlan, ScaffoldReport, ScaffoldService, TemplateService,
        ports::{EventSink, Filesystem, TemplateRenderer, TemplateSource},
    };
    pub use crate::domain::{
        Event, Field, FieldKind, FieldList, Marker, OperationDescriptor, ProjectStructure,
        RenderContext, TargetLayout, TemplateAsset, TemplateBundle,
    };
    pub use crate::error::{GraftError, GraftResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
