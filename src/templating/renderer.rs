//! Tera wrapper whose renders run inside a head context.

use tera::{Context as TeraContext, Tera};

use super::{functions, render_scoped};
use crate::config::RendererConfig;
use crate::core::{HeadContextError, Result};

/// Template renderer with the head-context functions installed.
///
/// Every render goes through [`render_scoped`]: the outermost render owns a
/// fresh [`crate::context::HeadContext`], and the `{{ head_placeholder() }}`
/// token in its output is replaced with the markup of all assets declared
/// anywhere in the template hierarchy (blocks, includes, macros).
///
/// # Examples
///
/// ```
/// use head_context::templating::HeadRenderer;
/// use tera::Context;
///
/// let mut renderer = HeadRenderer::default();
/// renderer
///     .add_raw_template(
///         "base.html",
///         "<head>{{ head_placeholder() }}</head>{% block body %}{% endblock body %}",
///     )
///     .unwrap();
/// renderer
///     .add_raw_template(
///         "page.html",
///         r#"{% extends "base.html" %}{% block body %}{{ push_js(src="/app.js") }}hi{% endblock body %}"#,
///     )
///     .unwrap();
///
/// let html = renderer.render("page.html", &Context::new()).unwrap();
/// assert_eq!(html, r#"<head><script src="/app.js"></script></head>hi"#);
/// ```
pub struct HeadRenderer {
    tera: Tera,
    globals: TeraContext,
}

impl HeadRenderer {
    /// Load every template matching `glob`.
    ///
    /// # Errors
    ///
    /// Returns [`HeadContextError::Template`] if a template fails to parse.
    pub fn new(glob: &str) -> Result<Self> {
        tracing::debug!("Loading templates from {}", glob);
        Ok(Self::from_tera(Tera::new(glob)?))
    }

    /// Install the head-context functions on an existing Tera instance.
    pub fn from_tera(mut tera: Tera) -> Self {
        functions::register(&mut tera);
        Self {
            tera,
            globals: TeraContext::new(),
        }
    }

    /// Build a renderer from configuration.
    pub fn from_config(config: &RendererConfig) -> Result<Self> {
        let mut renderer = Self::new(&config.templates_glob())?;
        if !config.autoescape {
            renderer.tera.autoescape_on(vec![]);
        }
        renderer.globals = config.tera_context().map_err(|e| HeadContextError::Config {
            message: format!("[context] table cannot be used as template variables: {e}"),
        })?;
        Ok(renderer)
    }

    /// Variables visible to every render, underneath the per-render context.
    #[must_use]
    pub fn with_globals(mut self, globals: TeraContext) -> Self {
        self.globals = globals;
        self
    }

    /// Add or replace a template from source.
    pub fn add_raw_template(&mut self, name: &str, content: &str) -> Result<()> {
        self.tera.add_raw_template(name, content)?;
        Ok(())
    }

    /// Render a loaded template.
    ///
    /// # Errors
    ///
    /// - [`HeadContextError::Template`] if Tera fails, including argument errors
    ///   raised by the head-context functions ([`HeadContextError::root_cause`]
    ///   recovers those)
    /// - [`HeadContextError::UnrenderedAssets`] if this is the outermost render,
    ///   assets were declared, and the output has no placeholder
    pub fn render(&self, name: &str, context: &TeraContext) -> Result<String> {
        let context = self.merged(context);
        render_scoped(|| {
            tracing::debug!("Rendering template '{}'", name);
            self.tera.render(name, &context).map_err(HeadContextError::from)
        })
    }

    /// Render a one-off template from source. It may extend or include loaded templates.
    pub fn render_str(&mut self, source: &str, context: &TeraContext) -> Result<String> {
        let context = self.merged(context);
        let tera = &mut self.tera;
        render_scoped(|| {
            tracing::debug!("Rendering one-off template ({} bytes)", source.len());
            tera.render_str(source, &context).map_err(HeadContextError::from)
        })
    }

    /// Names of all loaded templates, sorted.
    pub fn template_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tera.get_template_names().map(str::to_string).collect();
        names.sort();
        names
    }

    pub fn tera(&self) -> &Tera {
        &self.tera
    }

    /// Mutable access for registering additional filters, functions or testers.
    pub fn tera_mut(&mut self) -> &mut Tera {
        &mut self.tera
    }

    fn merged(&self, context: &TeraContext) -> TeraContext {
        let mut merged = self.globals.clone();
        merged.extend(context.clone());
        merged
    }
}

impl Default for HeadRenderer {
    fn default() -> Self {
        Self::from_tera(Tera::default())
    }
}

impl std::fmt::Debug for HeadRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HeadRenderer").field("templates", &self.template_names()).finish()
    }
}
