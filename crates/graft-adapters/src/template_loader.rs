//! Filesystem-based template loader.
//!
//! Replaces the embedded bundle with a directory of templates, set through
//! `[templates] local_path` in the config.
//!
//! # Directory layout expected
//!
//! ```text
//! my-templates/
//! ├── template.toml                                  ← manifest (optional)
//! ├── cli_command.go.tpl                             ← mapped in the manifest
//! └── x/{{MODULE_NAME}}/types/{{OPERATION_NAME_SNAKE}}.go.tpl
//! ```
//!
//! Every `*.tpl` file becomes one asset. Its output path is its path relative
//! to the root with `.tpl` removed, unless the manifest maps it elsewhere.
//!
//! # `template.toml` format
//!
//! ```toml
//! [bundle]
//! name = "my-query"
//!
//! [[files]]
//! source = "cli_command.go.tpl"
//! path   = "x/{{MODULE_NAME}}/client/cli/query_{{OPERATION_NAME_SNAKE}}.go"
//! ```

use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, instrument, warn};
use walkdir::WalkDir;

use graft_core::{
    application::ports::TemplateSource,
    domain::{DomainError, TemplateAsset, TemplateBundle},
    error::GraftResult,
};

const MANIFEST: &str = "template.toml";
const TEMPLATE_EXT: &str = "tpl";

/// Why a template directory could not be loaded.
#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("templates directory not found: {0}")]
    NotFound(PathBuf),

    #[error("failed to read '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to walk '{path}': {reason}")]
    Walk { path: PathBuf, reason: String },

    #[error("invalid manifest '{path}': {reason}")]
    Manifest { path: PathBuf, reason: String },

    #[error("manifest maps '{0}' but no such template file exists")]
    UnknownSource(String),
}

impl From<LoaderError> for DomainError {
    fn from(e: LoaderError) -> Self {
        DomainError::InvalidTemplate(e.to_string())
    }
}

// ── Manifest types ────────────────────────────────────────────────────────────

/// Deserialised `template.toml`.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct TemplateManifest {
    #[serde(default)]
    pub bundle: BundleSection,
    #[serde(default)]
    pub files: Vec<FileEntry>,
}

/// `[bundle]` section.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct BundleSection {
    pub name: Option<String>,
}

/// One entry under `[[files]]`.
#[derive(Debug, Deserialize, Clone)]
pub struct FileEntry {
    /// Template file, relative to the directory root.
    pub source: String,
    /// Output path, relative to the app root; may use `{{VARIABLE}}`s.
    pub path: String,
}

// ── Loader ────────────────────────────────────────────────────────────────────

/// [`TemplateSource`] over a local directory.
#[derive(Debug, Clone)]
pub struct DirectoryTemplates {
    root: PathBuf,
}

impl DirectoryTemplates {
    /// The directory does not need to exist until [`TemplateSource::load`].
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn read_manifest(&self) -> Result<TemplateManifest, LoaderError> {
        let path = self.root.join(MANIFEST);
        if !path.exists() {
            return Ok(TemplateManifest::default());
        }

        let raw = fs::read_to_string(&path).map_err(|source| LoaderError::Read {
            path: path.clone(),
            source,
        })?;
        toml::from_str(&raw).map_err(|e| LoaderError::Manifest {
            path,
            reason: e.to_string(),
        })
    }

    /// Relative paths of every `*.tpl` file, sorted.
    fn template_files(&self) -> Result<Vec<String>, LoaderError> {
        let mut files = Vec::new();

        for entry in WalkDir::new(&self.root).sort_by_file_name() {
            let entry = entry.map_err(|e| LoaderError::Walk {
                path: self.root.clone(),
                reason: e.to_string(),
            })?;
            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some(TEMPLATE_EXT) {
                if path.file_name().and_then(|n| n.to_str()) != Some(MANIFEST) {
                    warn!(file = %path.display(), "ignoring non-template file");
                }
                continue;
            }

            let relative = path
                .strip_prefix(&self.root)
                .unwrap_or(path)
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");
            files.push(relative);
        }

        Ok(files)
    }

    fn load_bundle(&self) -> Result<TemplateBundle, DomainError> {
        if !self.root.is_dir() {
            return Err(LoaderError::NotFound(self.root.clone()).into());
        }

        let manifest = self.read_manifest()?;
        let files = self.template_files()?;

        let mut mapped: HashMap<&str, &str> = HashMap::new();
        for entry in &manifest.files {
            if !files.iter().any(|f| f == &entry.source) {
                return Err(LoaderError::UnknownSource(entry.source.clone()).into());
            }
            mapped.insert(entry.source.as_str(), entry.path.as_str());
        }

        let mut assets = Vec::with_capacity(files.len());
        for file in &files {
            let full = self.root.join(file);
            let source = fs::read_to_string(&full).map_err(|source| LoaderError::Read {
                path: full.clone(),
                source,
            })?;

            let output = match mapped.get(file.as_str()) {
                Some(path) => (*path).to_string(),
                None => file
                    .strip_suffix(&format!(".{TEMPLATE_EXT}"))
                    .unwrap_or(file)
                    .to_string(),
            };

            debug!(template = %file, output = %output, "template discovered");
            assets.push(TemplateAsset::new(output, source)?);
        }

        let name = manifest.bundle.name.unwrap_or_else(|| {
            self.root
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "local".into())
        });

        TemplateBundle::new(name, assets)
    }
}

impl TemplateSource for DirectoryTemplates {
    #[instrument(skip(self), fields(dir = %self.root.display()))]
    fn load(&self) -> GraftResult<TemplateBundle> {
        let bundle = self.load_bundle()?;
        debug!(count = bundle.len(), "finished loading templates");
        Ok(bundle)
    }

    fn describe(&self) -> String {
        self.root.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &TempDir, rel: &str, content: &str) {
        let path = dir.path().join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn tpl_files_map_to_their_own_paths() {
        let dir = tempfile::tempdir().unwrap();
        write(&dir, "x/{{MODULE_NAME}}/types/{{OPERATION_NAME_SNAKE}}.go.tpl", "package types\n");
        write(&dir, "README.md", "not a template");

        let bundle = DirectoryTemplates::new(dir.path()).load().unwrap();

        assert_eq!(bundle.len(), 1);
        assert!(
            bundle
                .get("x/{{MODULE_NAME}}/types/{{OPERATION_NAME_SNAKE}}.go")
                .is_some()
        );
    }

    #[test]
    fn manifest_names_bundle_and_remaps_files() {
        let dir = tempfile::tempdir().unwrap();
        write(&dir, "cli.go.tpl", "package cli\n");
        write(
            &dir,
            MANIFEST,
            r#"
[bundle]
name = "custom"

[[files]]
source = "cli.go.tpl"
path = "x/{{MODULE_NAME}}/client/cli/query_{{OPERATION_NAME_SNAKE}}.go"
"#,
        );

        let bundle = DirectoryTemplates::new(dir.path()).load().unwrap();

        assert_eq!(bundle.name(), "custom");
        let asset = bundle
            .get("x/{{MODULE_NAME}}/client/cli/query_{{OPERATION_NAME_SNAKE}}.go")
            .unwrap();
        assert_eq!(asset.source(), "package cli\n");
    }

    #[test]
    fn manifest_with_unknown_source_fails() {
        let dir = tempfile::tempdir().unwrap();
        write(&dir, "a.go.tpl", "");
        write(&dir, MANIFEST, "[[files]]\nsource = \"b.go.tpl\"\npath = \"b.go\"\n");

        let err = DirectoryTemplates::new(dir.path()).load().unwrap_err();
        assert!(err.to_string().contains("b.go.tpl"));
    }

    #[test]
    fn missing_directory_fails() {
        let err = DirectoryTemplates::new("/definitely/not/here")
            .load()
            .unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn empty_directory_is_an_empty_bundle_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(DirectoryTemplates::new(dir.path()).load().is_err());
    }
}
