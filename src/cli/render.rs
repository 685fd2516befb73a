//! Render a template to stdout or a file.
//!
//! # Examples
//!
//! ```bash
//! head-context render page.html
//! head-context render page.html --context vars.json --output dist/page.html
//! ```

use anyhow::{Context, Result};
use clap::Args;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::templating::HeadRenderer;

/// Render one template through the head-context pipeline.
#[derive(Args, Debug)]
pub struct RenderCommand {
    /// Name of the template to render, as listed by `head-context templates`
    name: String,

    /// Variables for the render: JSON if the file ends in `.json`, TOML otherwise
    #[arg(short = 'x', long)]
    context: Option<PathBuf>,

    /// Write the output to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl RenderCommand {
    pub async fn execute(self, renderer: &HeadRenderer) -> Result<()> {
        let context = match &self.context {
            Some(path) => load_context(path).await?,
            None => tera::Context::new(),
        };

        let rendered = renderer
            .render(&self.name, &context)
            .with_context(|| format!("Failed to render template '{}'", self.name))?;

        match &self.output {
            Some(path) => {
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    fs::create_dir_all(parent).await.with_context(|| {
                        format!("Failed to create output directory {}", parent.display())
                    })?;
                }
                fs::write(path, &rendered)
                    .await
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                tracing::info!("Rendered '{}' to {}", self.name, path.display());
            }
            None => println!("{rendered}"),
        }

        Ok(())
    }
}

/// Load render variables from a JSON or TOML file.
pub async fn load_context(path: &Path) -> Result<tera::Context> {
    let content = fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read context file {}", path.display()))?;

    let is_json = path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let context = if is_json {
        let value: serde_json::Value = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse JSON context {}", path.display()))?;
        tera::Context::from_value(value)
    } else {
        let table: toml::Table = toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML context {}", path.display()))?;
        tera::Context::from_serialize(table)
    };

    context.with_context(|| format!("Context file {} must contain a table/object", path.display()))
}
