//! Error types for plate.
//!
//! Two families live here and they are deliberately unrelated:
//! - [`PlateError`] covers everything plate itself can get wrong (config files,
//!   template registration, querying an empty history through the fallible accessor).
//! - [`RenderFailure`] is the failure value produced by the Handlebars adapter while
//!   rendering. The recorder stores it and hands it back untouched, so it must be `Clone`.

use std::path::PathBuf;
use thiserror::Error;

/// All errors that can occur while setting up or querying plate.
#[derive(Error, Debug)]
pub enum PlateError {
    // --- Configuration ---

    /// The configuration file (`plate.config.json`) was not found or could not be read.
    #[error("config file not found at {path}")]
    ConfigNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file exists but contains invalid JSON.
    #[error("failed to parse config at {path}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A context file handed to the CLI is not valid JSON.
    #[error("failed to parse context at {path}")]
    ContextParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    // --- Templates ---

    /// Handlebars rejected a template source at registration time.
    #[error("failed to register template '{name}': {message}")]
    TemplateRegister { name: String, message: String },

    /// A template file (e.g. a partial listed in `plate.config.json`) could not be read.
    #[error("failed to read template '{name}' from {path}")]
    TemplateRead {
        name: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // --- History ---

    /// The history was queried for its latest execution before anything was rendered.
    #[error("no executions have been recorded yet")]
    EmptyHistory,

    // --- General ---

    /// A filesystem I/O error.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// A catch-all for errors from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Alias for `Result<T, PlateError>`.
pub type Result<T> = std::result::Result<T, PlateError>;

/// A rendering failure reported by
/// [`TemplateRenderer`](crate::templates::renderer::TemplateRenderer).
///
/// Handlebars errors are flattened to their display text, the same way they
/// surface to a user, so the value can be cloned into the execution history.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("template rendering failed: {message}")]
pub struct RenderFailure {
    pub message: String,
}

impl RenderFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<handlebars::RenderError> for RenderFailure {
    fn from(e: handlebars::RenderError) -> Self {
        Self::new(e.to_string())
    }
}
