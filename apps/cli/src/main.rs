//! resumekit CLI: turn free-form career text into a Markdown resume.
//!
//! Reads a file, a URL (optionally behind basic auth or a login form), or
//! standard input, and renders the result either through an LLM or through
//! the built-in template renderer.

mod commands;
mod prompt;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli).await
}
