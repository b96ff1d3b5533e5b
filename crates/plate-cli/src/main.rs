//! plate CLI — render Handlebars templates through a recorder and report what happened.
//!
//! Two commands:
//! - `render` prints each rendering to stdout and summarizes the recorded history.
//! - `check` renders every context concurrently, discarding output, and fails if any
//!   render failed.
//!
//! Both commands share one [`plate_core::Recorder`] per invocation.

mod commands;
mod output;
mod report;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "plate",
    about = "Render templates through a recorder and inspect every execution",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to plate.config.json (defaults are used if the file does not exist)
    #[arg(long, global = true, default_value = plate_core::config::CONFIG_FILE)]
    config: PathBuf,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a template once per context file and print the output
    Render {
        /// Root template file
        template: PathBuf,

        /// JSON context file (repeatable; renders with `{}` if omitted)
        #[arg(long = "context", short)]
        contexts: Vec<PathBuf>,

        /// Render this registered sub-template instead of the root
        #[arg(long)]
        name: Option<String>,

        /// Write the recorded history as JSON to this path
        #[arg(long)]
        report: Option<PathBuf>,
    },

    /// Render every context concurrently and fail if any render fails
    Check {
        /// Root template file
        template: PathBuf,

        /// JSON context file (repeatable; renders with `{}` if omitted)
        #[arg(long = "context", short)]
        contexts: Vec<PathBuf>,

        /// Render this registered sub-template instead of the root
        #[arg(long)]
        name: Option<String>,

        /// Number of concurrent render workers
        #[arg(long, short, default_value = "4")]
        jobs: usize,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Render {
            template,
            contexts,
            name,
            report,
        } => {
            commands::render::run(
                &cli.config,
                &template,
                &contexts,
                name.as_deref(),
                report.as_deref(),
            )?;
        }
        Commands::Check {
            template,
            contexts,
            name,
            jobs,
        } => {
            commands::check::run(&cli.config, &template, &contexts, name.as_deref(), jobs).await?;
        }
    }

    Ok(())
}
