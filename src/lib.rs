//! head-context - render-scoped collection of page assets for Tera templates
//!
//! Template fragments declare the scripts, stylesheets and preloads they need
//! while they are being rendered, no matter how deeply nested they are in the
//! template hierarchy. The outermost render emits all of them at one point in
//! the document, typically `<head>`, even though that point was written out
//! before the declarations happened.
//!
//! # Architecture Overview
//!
//! - A [`context::HeadContext`] is created lazily for each outermost render and
//!   holds the ordered, de-duplicated assets plus a unique placeholder token.
//! - The ambient scope ([`context::RenderScope`]) makes that context visible to
//!   every template function running on the same call stack, and only there.
//! - [`templating::render_scoped`] wraps the step that produces the final
//!   output string: the owner replaces the token with the collected markup,
//!   nested renders pass their output through untouched.
//!
//! # Core Modules
//!
//! - [`assets`] - `Script`, `Stylesheet`, `Preload` and their markup
//! - [`context`] - the render context, ambient scope and declaration functions
//! - [`templating`] - the pipeline hook and the Tera-backed [`templating::HeadRenderer`]
//! - [`config`] - renderer configuration (`head-context.toml`)
//! - [`core`] - error types and user-facing error formatting
//! - [`cli`] - the `head-context` command line
//!
//! # Template Usage
//!
//! ```text
//! <head>{{ head_placeholder() }}</head>
//! ...
//! {{ push_js(src="/static/app.js", mode="defer") }}
//! {{ push_css(href="/static/app.css", crossorigin="anonymous") }}
//! {{ push_preload(href="/static/hero.png", as_="image") }}
//! ```
//!
//! # Command-Line Usage
//!
//! ```bash
//! # Render a template to stdout
//! head-context --templates "templates/**/*.html" render page.html --context vars.json
//!
//! # List loaded templates
//! head-context --config head-context.toml templates
//! ```

pub mod assets;
pub mod cli;
pub mod config;
pub mod context;
pub mod core;
pub mod templating;

// test_utils module is available for both unit tests and integration tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
