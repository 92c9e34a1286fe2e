//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value. The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. `GRAFT__SECTION__KEY` environment variables
//! 3. `--config <FILE>`, or `.graft.toml` in the current directory over the
//!    platform config file
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use tracing::debug;

use graft_core::domain::TargetLayout;

use crate::error::{CliError, CliResult};

/// File name of a per-project config in the current directory.
pub const LOCAL_CONFIG: &str = ".graft.toml";

const ENV_PREFIX: &str = "GRAFT";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Fallbacks for `scaffold` flags.
    pub defaults: Defaults,
    /// Output settings.
    pub output: OutputConfig,
    /// Template settings.
    pub templates: TemplateConfig,
    /// Where the existing generated files live.
    pub layout: TargetLayout,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    /// App root used when `--path` is omitted.
    pub path: Option<PathBuf>,
    /// Module used when `--module` is omitted.
    pub module: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
    pub format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            no_color: false,
            format: "auto".into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    /// Directory of `*.tpl` files replacing the built-in bundle.
    pub local_path: Option<PathBuf>,
}

impl AppConfig {
    /// Load configuration.
    ///
    /// An explicit `config_file` must exist. Without one, the platform file
    /// and `.graft.toml` are read when present.
    pub fn load(config_file: Option<&Path>) -> CliResult<Self> {
        let mut builder = Config::builder();

        match config_file {
            Some(path) => {
                if !path.is_file() {
                    return Err(CliError::ConfigError {
                        message: format!("config file '{}' does not exist", path.display()),
                        source: None,
                    });
                }
                debug!(file = %path.display(), "using explicit config file");
                builder = builder.add_source(File::from(path).format(FileFormat::Toml));
            }
            None => {
                if let Some(global) = Self::global_path() {
                    builder = builder
                        .add_source(File::from(global).format(FileFormat::Toml).required(false));
                }
                builder = builder.add_source(
                    File::from(Path::new(LOCAL_CONFIG))
                        .format(FileFormat::Toml)
                        .required(false),
                );
            }
        }

        builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .and_then(Config::try_deserialize::<AppConfig>)
            .map_err(|e| CliError::ConfigError {
                message: e.to_string(),
                source: Some(Box::new(e)),
            })
    }

    /// Platform config file, e.g. `~/.config/graft/config.toml`.
    pub fn global_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("dev", "graft", "graft")
            .map(|d| d.config_dir().join("config.toml"))
    }

    /// The file a config-less invocation would read with highest priority.
    pub fn config_path() -> PathBuf {
        let local = PathBuf::from(LOCAL_CONFIG);
        if local.exists() {
            return local;
        }
        Self::global_path().unwrap_or(local)
    }

    /// Value of a dotted key, rendered as text.
    pub fn get(&self, key: &str) -> Option<String> {
        let path = |p: &Option<PathBuf>| {
            p.as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default()
        };
        let value = match key {
            "defaults.path" => path(&self.defaults.path),
            "defaults.module" => self.defaults.module.clone().unwrap_or_default(),
            "output.no_color" => self.output.no_color.to_string(),
            "output.format" => self.output.format.clone(),
            "templates.local_path" => path(&self.templates.local_path),
            "layout.group" => self.layout.group.clone(),
            "layout.schema_ext" => self.layout.schema_ext.clone(),
            "layout.command_ext" => self.layout.command_ext.clone(),
            _ => return None,
        };
        Some(value)
    }

    pub fn to_toml(&self) -> CliResult<String> {
        toml::to_string_pretty(self).map_err(|e| CliError::ConfigError {
            message: format!("Failed to serialise config: {e}"),
            source: Some(Box::new(e)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn default_layout_targets_query_files() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.layout.group, "query");
        assert_eq!(cfg.layout.schema_ext, "proto");
    }

    #[test]
    fn default_no_color_is_false() {
        assert!(!AppConfig::default().output.no_color);
    }

    #[test]
    fn explicit_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("graft.toml");
        fs::write(
            &file,
            "[defaults]\nmodule = \"blog\"\n\n[layout]\ngroup = \"queries\"\n",
        )
        .unwrap();

        let cfg = AppConfig::load(Some(&file)).unwrap();

        assert_eq!(cfg.defaults.module.as_deref(), Some("blog"));
        assert_eq!(cfg.layout.group, "queries");
        assert_eq!(cfg.layout.command_ext, "go");
        assert_eq!(cfg.output.format, "auto");
    }

    #[test]
    fn missing_explicit_file_is_config_error() {
        let err = AppConfig::load(Some(Path::new("/nope/graft.toml"))).unwrap_err();
        assert_eq!(err.exit_code(), 4);
    }

    #[test]
    fn malformed_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("graft.toml");
        fs::write(&file, "[defaults\n").unwrap();

        assert!(matches!(
            AppConfig::load(Some(&file)),
            Err(CliError::ConfigError { .. })
        ));
    }

    #[test]
    fn get_known_and_unknown_keys() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.get("output.no_color").as_deref(), Some("false"));
        assert_eq!(cfg.get("layout.command_ext").as_deref(), Some("go"));
        assert_eq!(cfg.get("defaults.module").as_deref(), Some(""));
        assert!(cfg.get("does.not.exist").is_none());
    }

    #[test]
    fn toml_round_trips_through_loader() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("graft.toml");
        let mut cfg = AppConfig::default();
        cfg.defaults.module = Some("blog".into());
        fs::write(&file, cfg.to_toml().unwrap()).unwrap();

        assert_eq!(AppConfig::load(Some(&file)).unwrap(), cfg);
    }
}
