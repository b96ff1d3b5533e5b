//! CLI command implementations for plate.
//!
//! Each module corresponds to a subcommand (`plate <command>`). Loading helpers shared
//! by both commands live here.

pub mod check;
pub mod render;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use serde_json::Value;

use plate_core::config::EngineConfig;
use plate_core::{PlateError, Recorder, RenderFailure, Renderable, TemplateRenderer};

use crate::output;

/// The recorder type every command works with. Contexts are shared, so recording one
/// only bumps a reference count.
pub type ValueRecorder = Recorder<TemplateRenderer, Arc<Value>>;

/// Build a renderer from the config at `config_path` (if present) with `template` as root.
pub fn load_renderer(config_path: &Path, template: &Path) -> Result<TemplateRenderer> {
    let config = if config_path.exists() {
        EngineConfig::load(config_path)?
    } else {
        tracing::debug!(path = %config_path.display(), "no config file, using defaults");
        EngineConfig::default()
    };

    let mut renderer = TemplateRenderer::from_config(&config)?;
    let source = std::fs::read_to_string(template)
        .with_context(|| format!("failed to read template {}", template.display()))?;
    renderer.set_root(&source)?;
    Ok(renderer)
}

/// Parse each path as a JSON context. With no paths, yields a single empty object.
pub fn load_contexts(paths: &[PathBuf]) -> Result<Vec<Arc<Value>>> {
    if paths.is_empty() {
        return Ok(vec![Arc::new(Value::Object(Default::default()))]);
    }

    paths
        .iter()
        .map(|path| -> Result<Arc<Value>> {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read context {}", path.display()))?;
            let value: Value =
                serde_json::from_str(&contents).map_err(|e| PlateError::ContextParse {
                    path: path.clone(),
                    source: e,
                })?;
            Ok(Arc::new(value))
        })
        .collect()
}

/// Render `context` through the recorder, picking the root or a named sub-template.
pub fn render_one(
    recorder: &ValueRecorder,
    sink: &mut dyn std::io::Write,
    name: Option<&str>,
    context: &Arc<Value>,
) -> std::result::Result<(), RenderFailure> {
    match name {
        Some(name) => recorder.render_named(sink, name, context),
        None => recorder.render(sink, context),
    }
}

/// Print the recorded history counts and every failure.
pub fn print_summary(recorder: &ValueRecorder) {
    let total = recorder.execution_count();
    let failed = recorder.failed_executions();

    output::print_key_value("executions", &total.to_string());
    output::print_key_value("failed", &failed.len().to_string());
    for exec in &failed {
        if let Some(err) = &exec.error {
            output::print_error(&format!("{err} (context: {})", exec.context));
        }
    }

    if failed.is_empty() {
        output::print_success(&format!("{total} render(s) succeeded"));
    } else {
        output::print_warning(&format!("{} of {total} render(s) failed", failed.len()));
    }
}
