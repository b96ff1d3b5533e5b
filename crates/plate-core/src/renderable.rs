use std::io::Write;
use std::sync::Arc;

/// Anything that can render itself, or one of its named sub-templates, into a byte sink.
///
/// The context is a type parameter rather than an associated type so that one engine
/// can accept many context shapes, e.g. the Handlebars adapter accepts any
/// `T: Serialize`.
///
/// The trait is object safe: production code can hold an
/// `Arc<dyn Renderable<Value, Error = RenderFailure>>` and tests can substitute a
/// [`Recorder`](crate::recorder::Recorder) for it.
pub trait Renderable<C: ?Sized>: Send + Sync {
    /// Failure indicator returned by a render call.
    type Error;

    /// Render the template with `context`, writing output into `sink`.
    fn render(&self, sink: &mut dyn Write, context: &C) -> Result<(), Self::Error>;

    /// Render the sub-template registered as `name` with `context`.
    fn render_named(&self, sink: &mut dyn Write, name: &str, context: &C)
        -> Result<(), Self::Error>;
}

impl<C, R> Renderable<C> for Arc<R>
where
    C: ?Sized,
    R: Renderable<C> + ?Sized,
{
    type Error = R::Error;

    fn render(&self, sink: &mut dyn Write, context: &C) -> Result<(), Self::Error> {
        (**self).render(sink, context)
    }

    fn render_named(
        &self,
        sink: &mut dyn Write,
        name: &str,
        context: &C,
    ) -> Result<(), Self::Error> {
        (**self).render_named(sink, name, context)
    }
}
