//! Renderer configuration.
//!
//! [`RendererConfig`] tells [`crate::templating::HeadRenderer`] where templates
//! live, whether autoescaping is on, and which variables every render sees.
//!
//! # File Format
//!
//! ```toml
//! # Tera glob, relative to the directory containing this file
//! templates = "templates/**/*.html"
//!
//! # Set to false to disable Tera's autoescaping of .html/.htm/.xml templates
//! autoescape = true
//!
//! # Variables available to every template
//! [context]
//! site_name = "Example"
//! ```
//!
//! # Examples
//!
//! ```rust,no_run
//! use head_context::config::RendererConfig;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = RendererConfig::load_from(std::path::Path::new("head-context.toml")).await?;
//! println!("templates: {}", config.templates_glob());
//! # Ok(())
//! # }
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Environment variable pointing at a configuration file.
pub const CONFIG_ENV_VAR: &str = "HEAD_CONTEXT_CONFIG";

fn default_templates() -> String {
    "templates/**/*".to_string()
}

const fn default_autoescape() -> bool {
    true
}

/// Configuration for a [`crate::templating::HeadRenderer`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RendererConfig {
    /// Tera glob selecting the templates to load.
    #[serde(default = "default_templates")]
    pub templates: String,

    /// Whether Tera autoescapes `.html`, `.htm` and `.xml` templates.
    #[serde(default = "default_autoescape")]
    pub autoescape: bool,

    /// Variables merged under every render's own context.
    #[serde(default, skip_serializing_if = "toml::Table::is_empty")]
    pub context: toml::Table,

    /// Directory relative globs are resolved against; set when loaded from a file.
    #[serde(skip)]
    base_dir: Option<PathBuf>,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            templates: default_templates(),
            autoescape: default_autoescape(),
            context: toml::Table::new(),
            base_dir: None,
        }
    }
}

impl RendererConfig {
    /// Parse a configuration from TOML text. Relative globs stay relative to the
    /// current directory.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse renderer config")
    }

    /// Load a configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid TOML.
    pub async fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read renderer config from {}", path.display()))?;

        let mut config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse renderer config from {}", path.display()))?;
        config.base_dir = path.parent().map(Path::to_path_buf);

        tracing::debug!("Loaded renderer config from {}", path.display());
        Ok(config)
    }

    /// Load from `path` if given, otherwise fall back to defaults.
    pub async fn load_with_optional(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from(path).await,
            None => Ok(Self::default()),
        }
    }

    /// Replace the template glob, resolving it against the current directory.
    #[must_use]
    pub fn with_templates(mut self, templates: impl Into<String>) -> Self {
        self.templates = templates.into();
        self.base_dir = None;
        self
    }

    /// The template glob with relative paths resolved against the config file's directory.
    pub fn templates_glob(&self) -> String {
        match &self.base_dir {
            Some(base) if Path::new(&self.templates).is_relative() => {
                base.join(&self.templates).to_string_lossy().into_owned()
            }
            _ => self.templates.clone(),
        }
    }

    /// The `[context]` table as a Tera context.
    pub fn tera_context(&self) -> tera::Result<tera::Context> {
        tera::Context::from_serialize(&self.context)
    }
}
