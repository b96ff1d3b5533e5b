//! Handlebars-backed [`Renderable`] implementation.
//!
//! Wraps a [`handlebars::Handlebars`] registry holding one *root* template plus any
//! number of named sub-templates. `render` renders the root, `render_named` renders a
//! registered sub-template by name. Sub-templates are also available to the root (and
//! to each other) as partials, e.g. `{{> footer}}`.
//!
//! **Strict mode** is on by default: a `{{variable}}` missing from the context fails
//! the render instead of producing empty output, which is what makes a broken context
//! visible in the recorder's failed executions.
//!
//! ## Usage
//!
//! ```ignore
//! use plate_core::templates::renderer::TemplateRenderer;
//!
//! let mut renderer = TemplateRenderer::from_source("Hi, {{name}}")?;
//! renderer.register("farewell", "Bye, {{name}}")?;
//! let output = renderer.render_to_string(&serde_json::json!({ "name": "John" }))?;
//! ```

use std::io::Write;
use std::path::Path;

use handlebars::Handlebars;
use serde::Serialize;

use crate::config::{EngineConfig, EscapeMode};
use crate::error::{PlateError, RenderFailure, Result};
use crate::renderable::Renderable;

/// Registry name of the root template. Not reported by [`TemplateRenderer::template_names`].
const ROOT_TEMPLATE: &str = "__root__";

/// Template renderer using Handlebars.
pub struct TemplateRenderer {
    hbs: Handlebars<'static>,
}

impl TemplateRenderer {
    /// Create an empty renderer with strict mode and HTML escaping.
    pub fn new() -> Self {
        Self::with_config(&EngineConfig::default())
    }

    /// Create an empty renderer with the engine settings from `config`.
    ///
    /// Partials listed in the config are not registered here, see
    /// [`from_config`](Self::from_config).
    pub fn with_config(config: &EngineConfig) -> Self {
        let mut hbs = Handlebars::new();
        hbs.set_strict_mode(config.strict_mode);
        if config.escape == EscapeMode::None {
            hbs.register_escape_fn(handlebars::no_escape);
        }
        Self { hbs }
    }

    /// Create a renderer whose root template is `source`, with default settings.
    pub fn from_source(source: &str) -> Result<Self> {
        let mut renderer = Self::new();
        renderer.set_root(source)?;
        Ok(renderer)
    }

    /// Create a renderer from `config`, registering its partials from disk.
    pub fn from_config(config: &EngineConfig) -> Result<Self> {
        let mut renderer = Self::with_config(config);
        for (name, path) in &config.partials {
            renderer.register_file(name, path)?;
        }
        Ok(renderer)
    }

    /// Replace the root template.
    pub fn set_root(&mut self, source: &str) -> Result<()> {
        self.register_raw(ROOT_TEMPLATE, source)
    }

    /// Register (or replace) the named sub-template `name`.
    pub fn register(&mut self, name: &str, source: &str) -> Result<()> {
        if name == ROOT_TEMPLATE {
            return Err(PlateError::TemplateRegister {
                name: name.into(),
                message: "name is reserved for the root template".into(),
            });
        }
        self.register_raw(name, source)
    }

    /// Read `path` and register its contents as the sub-template `name`.
    pub fn register_file(&mut self, name: &str, path: &Path) -> Result<()> {
        let source = std::fs::read_to_string(path).map_err(|e| PlateError::TemplateRead {
            name: name.into(),
            path: path.to_path_buf(),
            source: e,
        })?;
        self.register(name, &source)
    }

    /// Whether a root template has been set.
    pub fn has_root(&self) -> bool {
        self.hbs.has_template(ROOT_TEMPLATE)
    }

    /// Whether the sub-template `name` is registered.
    pub fn has_template(&self, name: &str) -> bool {
        name != ROOT_TEMPLATE && self.hbs.has_template(name)
    }

    /// Names of all registered sub-templates, sorted.
    pub fn template_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .hbs
            .get_templates()
            .keys()
            .filter(|name| name.as_str() != ROOT_TEMPLATE)
            .cloned()
            .collect();
        names.sort();
        names
    }

    /// Render the root template to a `String`.
    pub fn render_to_string<T: Serialize>(
        &self,
        context: &T,
    ) -> std::result::Result<String, RenderFailure> {
        self.ensure_root()?;
        Ok(self.hbs.render(ROOT_TEMPLATE, context)?)
    }

    fn register_raw(&mut self, name: &str, source: &str) -> Result<()> {
        self.hbs
            .register_template_string(name, source)
            .map_err(|e| PlateError::TemplateRegister {
                name: name.into(),
                message: e.to_string(),
            })?;
        tracing::debug!(template = name, "registered template");
        Ok(())
    }

    fn ensure_root(&self) -> std::result::Result<(), RenderFailure> {
        if self.has_root() {
            Ok(())
        } else {
            Err(RenderFailure::new("no root template has been set"))
        }
    }
}

impl Default for TemplateRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Serialize> Renderable<T> for TemplateRenderer {
    type Error = RenderFailure;

    fn render(
        &self,
        sink: &mut dyn Write,
        context: &T,
    ) -> std::result::Result<(), RenderFailure> {
        self.ensure_root()?;
        self.hbs.render_to_write(ROOT_TEMPLATE, context, sink)?;
        Ok(())
    }

    fn render_named(
        &self,
        sink: &mut dyn Write,
        name: &str,
        context: &T,
    ) -> std::result::Result<(), RenderFailure> {
        if !self.has_template(name) {
            return Err(RenderFailure::new(format!("template not found: {name}")));
        }
        self.hbs.render_to_write(name, context, sink)?;
        Ok(())
    }
}
