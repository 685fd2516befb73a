//! Tera integration and the render pipeline hook.
//!
//! Templates declare assets wherever they are needed and emit a single
//! placeholder in `<head>`:
//!
//! ```text
//! {# base.html #}
//! <head>
//!   {{ head_placeholder() }}
//! </head>
//! <body>{% block body %}{% endblock %}</body>
//!
//! {# page.html #}
//! {% extends "base.html" %}
//! {% block body %}
//!   {{ push_js(src="/static/chart.js", mode="defer") }}
//!   {{ push_css(href="/static/chart.css") }}
//!   <canvas id="chart"></canvas>
//! {% endblock %}
//! ```
//!
//! The head is written before the body declares anything, so the output is
//! produced in one pass with a token in it, and [`render_scoped`] swaps the
//! token for the collected markup once the outermost render has finished.

pub mod functions;
mod renderer;

pub use renderer::HeadRenderer;

use crate::context::RenderScope;
use crate::core::HeadContextError;

/// Run `assemble` (which produces one render's complete output) inside a head context.
///
/// - If no context is active, this call is the owner: it installs a fresh one,
///   and after `assemble` returns it replaces every occurrence of the
///   placeholder token with [`crate::context::HeadContext::render_media`].
/// - If a context is already active, this is a nested render: the output is
///   returned untouched and substitution is left to the owner.
///
/// The owner always removes its context before returning, including when
/// `assemble` fails or panics.
///
/// # Errors
///
/// Propagates errors from `assemble`. The owner returns
/// [`HeadContextError::UnrenderedAssets`] when assets were declared but the
/// output contains no placeholder.
///
/// # Examples
///
/// ```
/// use head_context::assets::Stylesheet;
/// use head_context::context;
/// use head_context::core::HeadContextError;
/// use head_context::templating::render_scoped;
///
/// let html = render_scoped(|| {
///     let head = context::head_placeholder()?;
///     context::declare_stylesheet(Stylesheet::new("/site.css"))?;
///     Ok::<_, HeadContextError>(format!("<head>{head}</head>"))
/// })
/// .unwrap();
/// assert_eq!(html, r#"<head><link href="/site.css" rel="stylesheet"></head>"#);
/// ```
pub fn render_scoped<F, E>(assemble: F) -> Result<String, E>
where
    F: FnOnce() -> Result<String, E>,
    E: From<HeadContextError>,
{
    let scope = RenderScope::enter();
    let rendered = assemble()?;

    if !scope.is_owner() {
        return Ok(rendered);
    }

    let ctx = scope.context();
    let token = ctx.replacement_token();

    if rendered.contains(token) {
        tracing::debug!("Substituting {} asset(s) into head placeholder", ctx.len());
        return Ok(rendered.replace(token, &ctx.render_media()));
    }

    if !ctx.is_empty() {
        tracing::warn!(
            "{} asset(s) declared but the head placeholder was never emitted",
            ctx.len()
        );
        return Err(HeadContextError::UnrenderedAssets {
            count: ctx.len(),
        }
        .into());
    }

    Ok(rendered)
}
