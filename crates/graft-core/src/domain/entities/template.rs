//! Template assets and the immutable, content-addressed bundle.
//!
//! A [`TemplateBundle`] is loaded once (embedded in the binary or walked from
//! a directory by an adapter) and handed to the renderer explicitly. Each
//! asset is identified by the SHA-256 of its content; the bundle fingerprint
//! digests all assets in path order, so two bundles with equal fingerprints
//! render identically.

use std::borrow::Cow;
use std::collections::BTreeMap;

use sha2::{Digest, Sha256};

use crate::domain::{entities::common::RelativePath, error::DomainError};

/// One template file: a parameterised output path and its source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateAsset {
    /// Output path relative to the app root; may contain `{{VARIABLE}}`s.
    path: RelativePath,
    source: Cow<'static, str>,
    digest: String,
}

impl TemplateAsset {
    pub fn new(
        path: impl Into<std::path::PathBuf>,
        source: impl Into<Cow<'static, str>>,
    ) -> Result<Self, DomainError> {
        let path = RelativePath::try_new(path)?;
        let source = source.into();
        let digest = hex::encode(Sha256::digest(source.as_bytes()));
        Ok(Self {
            path,
            source,
            digest,
        })
    }

    /// Asset backed by a compile-time string.
    pub fn embedded(path: &'static str, source: &'static str) -> Result<Self, DomainError> {
        Self::new(path, Cow::Borrowed(source))
    }

    pub fn path(&self) -> &RelativePath {
        &self.path
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Hex SHA-256 of the source.
    pub fn digest(&self) -> &str {
        &self.digest
    }
}

/// An immutable set of template assets keyed by output path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateBundle {
    name: String,
    assets: BTreeMap<String, TemplateAsset>,
    fingerprint: String,
}

impl TemplateBundle {
    /// Build a bundle.
    ///
    /// # Errors
    /// - `InvalidTemplate` when `assets` is empty
    /// - `DuplicatePath` when two assets share an output path
    pub fn new(
        name: impl Into<String>,
        assets: impl IntoIterator<Item = TemplateAsset>,
    ) -> Result<Self, DomainError> {
        let name = name.into();
        let mut map = BTreeMap::new();

        for asset in assets {
            let key = asset.path.as_str().to_string();
            if map.insert(key.clone(), asset).is_some() {
                return Err(DomainError::DuplicatePath { path: key });
            }
        }

        if map.is_empty() {
            return Err(DomainError::InvalidTemplate(format!(
                "bundle '{name}' has no templates"
            )));
        }

        let mut hasher = Sha256::new();
        for (path, asset) in &map {
            hasher.update(path.as_bytes());
            hasher.update([0u8]);
            hasher.update(asset.digest.as_bytes());
        }
        let fingerprint = hex::encode(hasher.finalize());

        Ok(Self {
            name,
            assets: map,
            fingerprint,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Assets in path order.
    pub fn assets(&self) -> impl Iterator<Item = &TemplateAsset> {
        self.assets.values()
    }

    pub fn get(&self, path: &str) -> Option<&TemplateAsset> {
        self.assets.get(path)
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    /// Hex SHA-256 over every (path, digest) pair.
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }
}
