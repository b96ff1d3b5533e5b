//! Template engines that plug into the recorder.
//!
//! Only Handlebars is provided, via [`renderer::TemplateRenderer`]. Any other engine
//! works with [`Recorder`](crate::recorder::Recorder) as long as it implements
//! [`Renderable`](crate::renderable::Renderable).
//!
//! ## Template names
//!
//! A renderer has one root template, rendered by `render`, and any number of named
//! sub-templates, rendered by `render_named` and usable from other templates as
//! partials (`{{> name}}`). The root is stored under a reserved registry name that
//! cannot be registered directly.

pub mod renderer;
