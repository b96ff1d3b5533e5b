use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;

use crate::commands::{self, ValueRecorder};
use crate::{output, report};

/// Render `template` once per context, writing each result to stdout.
///
/// Renders run sequentially through a single recorder; a failed render does not stop
/// the remaining ones. The recorded history is summarized on stderr and, if `report`
/// is given, exported as JSON.
pub fn run(
    config: &Path,
    template: &Path,
    contexts: &[PathBuf],
    name: Option<&str>,
    report: Option<&Path>,
) -> Result<()> {
    output::print_header(&format!("plate render: {}", template.display()));

    let renderer = commands::load_renderer(config, template)?;
    let values = commands::load_contexts(contexts)?;
    let recorder = ValueRecorder::new(Arc::new(renderer));

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for ctx in &values {
        // Failures are kept in the recorder and reported below.
        let _ = commands::render_one(&recorder, &mut out, name, ctx);
        writeln!(out)?;
    }
    out.flush()?;
    drop(out);

    commands::print_summary(&recorder);

    if let Some(path) = report {
        report::write(path, &report::build(&recorder.history()))?;
        output::print_key_value("report", &path.display().to_string());
    }

    Ok(())
}
