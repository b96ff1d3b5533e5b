//! The recording decorator.
//!
//! [`Recorder`] implements [`Renderable`] by forwarding every call to the template it
//! wraps. The caller's sink is swapped for a [`Tee`] so the produced bytes can be kept
//! alongside the context and the returned failure. The result of the wrapped call is
//! handed back as-is.
//!
//! ## Usage
//!
//! ```ignore
//! use std::sync::Arc;
//! use plate_core::{Recorder, Renderable, TemplateRenderer};
//!
//! let tpl = Arc::new(TemplateRenderer::from_source("Hi, {{name}}")?);
//! let recorder = Recorder::new(tpl);
//!
//! let mut out = Vec::new();
//! recorder.render(&mut out, &serde_json::json!({ "name": "John" }))?;
//!
//! assert_eq!(recorder.execution_count(), 1);
//! assert_eq!(recorder.last_execution().output, b"Hi, John");
//! ```

use std::io::Write;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::error::{PlateError, Result};
use crate::execution::Execution;
use crate::renderable::Renderable;
use crate::tee::Tee;

/// Wraps a [`Renderable`] and records the result of every render call for later checks.
///
/// The recorder never serializes calls into the wrapped template; it only guards its
/// own history. Appends and clears take the write lock, every query takes the read
/// lock and returns an owned copy.
pub struct Recorder<R, C>
where
    R: Renderable<C> + ?Sized,
{
    template: Arc<R>,
    execs: RwLock<Vec<Execution<C, R::Error>>>,
}

impl<R, C> Recorder<R, C>
where
    R: Renderable<C> + ?Sized,
    C: Clone,
    R::Error: Clone,
{
    /// Wrap a template shared with the caller.
    pub fn new(template: Arc<R>) -> Self {
        Self {
            template,
            execs: RwLock::new(Vec::new()),
        }
    }

    /// The wrapped template.
    pub fn template(&self) -> &Arc<R> {
        &self.template
    }

    /// All executions since construction or the last [`reset`](Self::reset), oldest first.
    ///
    /// The returned vector is a copy; changing it does not affect the recorder.
    pub fn history(&self) -> Vec<Execution<C, R::Error>> {
        self.execs.read().clone()
    }

    /// The most recent execution.
    ///
    /// # Panics
    ///
    /// Panics if nothing has been rendered since construction or the last
    /// [`reset`](Self::reset). Asking for the last execution of a template that was
    /// never rendered is a mistake in the calling test, not a runtime condition.
    /// Use [`try_last_execution`](Self::try_last_execution) to check instead.
    pub fn last_execution(&self) -> Execution<C, R::Error> {
        let last = self.execs.read().last().cloned();
        match last {
            Some(exec) => exec,
            None => panic!("no executions have been recorded yet"),
        }
    }

    /// Like [`last_execution`](Self::last_execution), but returns
    /// [`PlateError::EmptyHistory`] instead of panicking.
    pub fn try_last_execution(&self) -> Result<Execution<C, R::Error>> {
        self.execs.read().last().cloned().ok_or(PlateError::EmptyHistory)
    }

    /// Number of executions since construction or the last [`reset`](Self::reset).
    pub fn execution_count(&self) -> usize {
        self.execs.read().len()
    }

    /// Executions whose render call returned a failure, oldest first.
    pub fn failed_executions(&self) -> Vec<Execution<C, R::Error>> {
        self.filtered(|exec| exec.is_failure())
    }

    /// Executions whose render call succeeded, oldest first.
    pub fn successful_executions(&self) -> Vec<Execution<C, R::Error>> {
        self.filtered(|exec| !exec.is_failure())
    }

    /// Executions produced by `render_named` calls for the sub-template `name`.
    pub fn executions_of(&self, name: &str) -> Vec<Execution<C, R::Error>> {
        self.filtered(|exec| exec.template.as_deref() == Some(name))
    }

    /// Drop all recorded executions, restoring the recorder to its initial state.
    pub fn reset(&self) {
        let mut execs = self.execs.write();
        let dropped = execs.len();
        execs.clear();
        drop(execs);
        tracing::debug!(dropped, "execution history cleared");
    }

    fn filtered<F>(&self, keep: F) -> Vec<Execution<C, R::Error>>
    where
        F: Fn(&Execution<C, R::Error>) -> bool,
    {
        self.execs
            .read()
            .iter()
            .filter(|exec| keep(exec))
            .cloned()
            .collect()
    }

    /// Run `call` against a tee of `sink`, then append what it produced.
    fn capture<F>(
        &self,
        sink: &mut dyn Write,
        context: &C,
        name: Option<&str>,
        call: F,
    ) -> std::result::Result<(), R::Error>
    where
        F: FnOnce(&mut dyn Write) -> std::result::Result<(), R::Error>,
    {
        let mut tee = Tee::new(sink);
        let result = call(&mut tee);

        let exec = Execution {
            output: tee.into_captured(),
            context: context.clone(),
            error: result.as_ref().err().cloned(),
            template: name.map(str::to_owned),
        };
        let bytes = exec.output.len();

        let mut execs = self.execs.write();
        execs.push(exec);
        let index = execs.len() - 1;
        drop(execs);

        tracing::trace!(index, bytes, template = name, "recorded template execution");
        result
    }
}

impl<R, C> Renderable<C> for Recorder<R, C>
where
    R: Renderable<C> + ?Sized,
    C: Clone + Send + Sync,
    R::Error: Clone + Send + Sync,
{
    type Error = R::Error;

    fn render(&self, sink: &mut dyn Write, context: &C) -> std::result::Result<(), Self::Error> {
        self.capture(sink, context, None, |tee| self.template.render(tee, context))
    }

    fn render_named(
        &self,
        sink: &mut dyn Write,
        name: &str,
        context: &C,
    ) -> std::result::Result<(), Self::Error> {
        self.capture(sink, context, Some(name), |tee| {
            self.template.render_named(tee, name, context)
        })
    }
}
