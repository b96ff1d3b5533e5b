//! JSON export of a recorder's history (`plate render --report`).

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;

use plate_core::{Execution, RenderFailure};

/// One recorded execution in serializable form.
#[derive(Debug, Serialize)]
pub struct ExecutionReport {
    pub index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
    pub context: Arc<Value>,
    /// Output decoded as UTF-8, with invalid sequences replaced.
    pub output: String,
    pub error: Option<String>,
}

impl ExecutionReport {
    fn from_execution(index: usize, exec: &Execution<Arc<Value>, RenderFailure>) -> Self {
        Self {
            index,
            template: exec.template.clone(),
            context: Arc::clone(&exec.context),
            output: String::from_utf8_lossy(&exec.output).into_owned(),
            error: exec.error.as_ref().map(ToString::to_string),
        }
    }
}

/// Convert a history into reports, keeping its order.
pub fn build(history: &[Execution<Arc<Value>, RenderFailure>]) -> Vec<ExecutionReport> {
    history
        .iter()
        .enumerate()
        .map(|(i, exec)| ExecutionReport::from_execution(i, exec))
        .collect()
}

/// Write reports to `path` as pretty-printed JSON.
pub fn write(path: &Path, reports: &[ExecutionReport]) -> Result<()> {
    let json = serde_json::to_string_pretty(reports)?;
    std::fs::write(path, json)
        .with_context(|| format!("failed to write report to {}", path.display()))?;
    Ok(())
}
