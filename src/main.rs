//! casegen - A terminal client for AI-assisted testcase generation
//!
//! This is the binary entry point. All logic lives in the library
//! crates.

use std::path::PathBuf;

use clap::Parser;

use casegen_app::load_settings;

/// A terminal client for AI-assisted testcase generation
#[derive(Parser, Debug)]
#[command(name = "casegen")]
#[command(about = "A terminal client for AI-assisted testcase generation", long_about = None)]
struct Args {
    /// Base URL of the generation backend (overrides config and env)
    #[arg(long, value_name = "URL")]
    api_base: Option<String>,

    /// Path to an alternate config.toml
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Args::parse();

    // File logging only; the TUI owns the terminal.
    casegen_core::logging::init()?;

    let settings = load_settings(args.api_base.as_deref(), args.config.as_deref());
    tracing::info!("api base: {}", settings.api_base);

    casegen_tui::run(settings).await?;
    Ok(())
}
