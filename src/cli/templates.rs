//! List the templates a renderer has loaded.

use anyhow::Result;
use clap::Args;

use crate::templating::HeadRenderer;

/// Print loaded template names, one per line.
#[derive(Args, Debug)]
pub struct TemplatesCommand {}

impl TemplatesCommand {
    pub async fn execute(self, renderer: &HeadRenderer) -> Result<()> {
        let names = renderer.template_names();
        if names.is_empty() {
            tracing::warn!("No templates loaded");
        }
        for name in names {
            println!("{name}");
        }
        Ok(())
    }
}
