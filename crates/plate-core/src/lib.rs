//! Core library for plate, a recorder for testing template rendering.
//!
//! Provides the [`renderable::Renderable`] trait that templates implement, and the
//! [`recorder::Recorder`] decorator that wraps any `Renderable` and keeps a history of
//! every render call: the bytes produced, the context passed in, and the failure
//! returned. The recorder is a drop-in replacement for the template it wraps, so code
//! that only knows about `Renderable` can be tested without changes.
//!
//! A Handlebars-backed implementation lives in [`templates::renderer`].

pub mod config;
pub mod error;
pub mod execution;
pub mod recorder;
pub mod renderable;
mod tee;
pub mod templates;

pub use error::{PlateError, RenderFailure, Result};
pub use execution::Execution;
pub use recorder::Recorder;
pub use renderable::Renderable;
pub use templates::renderer::TemplateRenderer;
