//! Template Service - bundle loading and inspection.
//!
//! Separated from ScaffoldService for single responsibility: this one knows
//! where templates come from, the scaffold service only consumes a bundle.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, instrument};

use crate::{
    application::ports::TemplateSource,
    domain::{DomainValidator as validator, TemplateBundle},
    error::GraftResult,
};

/// Information about a template asset for display purposes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateInfo {
    pub path: String,
    pub digest: String,
    pub size: usize,
}

/// Service for template operations.
pub struct TemplateService {
    source: Box<dyn TemplateSource>,
}

impl TemplateService {
    /// Create a new template service.
    pub fn new(source: Box<dyn TemplateSource>) -> Self {
        Self { source }
    }

    /// Load and validate the bundle.
    #[instrument(skip_all, fields(source = %self.source.describe()))]
    pub fn load(&self) -> GraftResult<Arc<TemplateBundle>> {
        let bundle = self.source.load()?;
        validator::validate_bundle(&bundle)?;
        debug!(
            assets = bundle.len(),
            fingerprint = %bundle.fingerprint(),
            "Template bundle loaded"
        );
        Ok(Arc::new(bundle))
    }

    /// Where templates are loaded from.
    pub fn describe(&self) -> String {
        self.source.describe()
    }

    /// List assets of a loaded bundle.
    pub fn list(bundle: &TemplateBundle) -> Vec<TemplateInfo> {
        bundle
            .assets()
            .map(|asset| TemplateInfo {
                path: asset.path().to_string(),
                digest: asset.digest().to_string(),
                size: asset.source().len(),
            })
            .collect()
    }
}
