//! Engine configuration (`plate.config.json`).
//!
//! Controls how [`TemplateRenderer`](crate::templates::renderer::TemplateRenderer) sets
//! up its Handlebars registry. Every field has a default, so an empty JSON object is
//! a valid config.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{PlateError, Result};

/// Default config file name looked up by the CLI.
pub const CONFIG_FILE: &str = "plate.config.json";

/// How rendered values are escaped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EscapeMode {
    /// HTML-escape every `{{value}}` (Handlebars default).
    #[default]
    Html,
    /// Emit values verbatim, for plain-text templates.
    None,
}

/// Settings for the Handlebars engine wrapped by the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Fail on variables missing from the context instead of rendering them empty.
    pub strict_mode: bool,
    /// Escaping applied to interpolated values.
    pub escape: EscapeMode,
    /// Named sub-templates to register, by name. Relative paths are resolved
    /// against the config file's directory.
    pub partials: BTreeMap<String, PathBuf>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            strict_mode: true,
            escape: EscapeMode::Html,
            partials: BTreeMap::new(),
        }
    }
}

impl EngineConfig {
    /// Load a config from `path`, resolving partial paths relative to its directory.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| PlateError::ConfigNotFound {
            path: path.to_path_buf(),
            source: e,
        })?;
        let mut config: EngineConfig =
            serde_json::from_str(&contents).map_err(|e| PlateError::ConfigParse {
                path: path.to_path_buf(),
                source: e,
            })?;

        if let Some(base) = path.parent() {
            for partial in config.partials.values_mut() {
                if partial.is_relative() {
                    *partial = base.join(&*partial);
                }
            }
        }
        Ok(config)
    }

    /// Write the config to `path` as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(|e| {
            anyhow::Error::new(e)
                .context(format!("failed to serialize config for {}", path.display()))
        })?;
        std::fs::write(path, json)?;
        Ok(())
    }
}
