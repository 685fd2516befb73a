//! Command-line interface for head-context.
//!
//! # Available Commands
//!
//! - `render` - Render a template, substituting declared assets into the head placeholder
//! - `templates` - List the templates matched by the configured glob
//!
//! # Global Options
//!
//! - `--verbose` - Enable debug logging
//! - `--quiet` - Only log errors
//! - `--config` - Path to a `head-context.toml` (also `HEAD_CONTEXT_CONFIG`)
//! - `--templates` - Template glob, overriding the config file
//!
//! # Example
//!
//! ```bash
//! head-context --templates "site/**/*.html" render index.html --context vars.toml
//! ```
//!
//! Logs go to stderr, so rendered output on stdout can be piped or redirected.

mod render;
mod templates;

pub use render::load_context;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::config::{CONFIG_ENV_VAR, RendererConfig};
use crate::templating::HeadRenderer;

/// Runtime configuration derived from the global flags.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Default log filter when `RUST_LOG` is not set.
    ///
    /// `"debug"` with `--verbose`, `"error"` with `--quiet`, `"info"` otherwise.
    pub log_level: Option<String>,
}

impl CliConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the global tracing subscriber, writing to stderr.
    ///
    /// `RUST_LOG` takes precedence over the configured level. Calling this more
    /// than once is harmless.
    pub fn init_logging(&self) {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(self.log_level.as_deref().unwrap_or("info"))
        });

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    }
}

/// Render Tera templates with page assets collected into the document head.
#[derive(Parser, Debug)]
#[command(
    name = "head-context",
    about = "Render Tera templates, collecting declared assets into the document head",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug output
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only report errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to the renderer configuration file
    #[arg(short, long, global = true, env = CONFIG_ENV_VAR)]
    config: Option<PathBuf>,

    /// Template glob, e.g. "templates/**/*.html" (overrides the config file)
    #[arg(short = 't', long = "templates", global = true)]
    template_glob: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render a template
    Render(render::RenderCommand),

    /// List loaded templates
    Templates(templates::TemplatesCommand),
}

impl Cli {
    /// Execute the parsed command line.
    pub async fn execute(self) -> Result<()> {
        let config = self.build_config();
        self.execute_with_config(config).await
    }

    /// Translate the verbosity flags into a [`CliConfig`].
    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            "info"
        };

        CliConfig {
            log_level: Some(log_level.to_string()),
        }
    }

    /// Execute with an explicit configuration.
    pub async fn execute_with_config(self, config: CliConfig) -> Result<()> {
        config.init_logging();

        let mut renderer_config =
            RendererConfig::load_with_optional(self.config.as_deref()).await?;
        if let Some(templates) = self.template_glob {
            renderer_config = renderer_config.with_templates(templates);
        }

        let renderer = HeadRenderer::from_config(&renderer_config).with_context(|| {
            format!("Failed to load templates from {}", renderer_config.templates_glob())
        })?;

        match self.command {
            Commands::Render(cmd) => cmd.execute(&renderer).await,
            Commands::Templates(cmd) => cmd.execute(&renderer).await,
        }
    }
}
