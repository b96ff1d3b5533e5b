use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use tokio::task::JoinSet;

use crate::commands::{self, ValueRecorder};
use crate::output;

/// Render every context, discarding output, and fail if any render failed.
///
/// Contexts are split across `jobs` blocking workers that all share one recorder, so
/// the history order follows completion rather than the order of the context files.
pub async fn run(
    config: &Path,
    template: &Path,
    contexts: &[PathBuf],
    name: Option<&str>,
    jobs: usize,
) -> Result<()> {
    output::print_header(&format!("plate check: {}", template.display()));

    let renderer = commands::load_renderer(config, template)?;
    let values = commands::load_contexts(contexts)?;
    let recorder = Arc::new(ValueRecorder::new(Arc::new(renderer)));

    check_all(&recorder, values, name, jobs).await?;
    commands::print_summary(&recorder);

    let failed = recorder.failed_executions().len();
    if failed > 0 {
        anyhow::bail!(
            "{failed} of {} render(s) failed",
            recorder.execution_count()
        );
    }
    Ok(())
}

async fn check_all(
    recorder: &Arc<ValueRecorder>,
    values: Vec<Arc<serde_json::Value>>,
    name: Option<&str>,
    jobs: usize,
) -> Result<()> {
    let chunk_size = values.len().div_ceil(jobs.max(1)).max(1);
    tracing::info!(contexts = values.len(), chunk_size, "checking template");

    let mut workers = JoinSet::new();
    for batch in values.chunks(chunk_size) {
        let batch = batch.to_vec();
        let recorder = Arc::clone(recorder);
        let name = name.map(str::to_owned);
        workers.spawn_blocking(move || {
            let mut sink = std::io::sink();
            for ctx in &batch {
                let _ = commands::render_one(&recorder, &mut sink, name.as_deref(), ctx);
            }
        });
    }

    while let Some(joined) = workers.join_next().await {
        joined?;
    }
    Ok(())
}
