//! head-context CLI entry point
//!
//! Parses arguments, runs the command, and prints failures with details and a
//! suggestion:
//! - `render` - Render a template with declared assets substituted into the head
//! - `templates` - List loaded templates

use anyhow::Result;
use clap::Parser;
use head_context::cli;
use head_context::core::user_friendly_error;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    // Set up colored output for Windows
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    match cli.execute().await {
        Ok(()) => Ok(()),
        Err(e) => {
            let error_ctx = user_friendly_error(e);
            error_ctx.display();
            std::process::exit(1);
        }
    }
}
