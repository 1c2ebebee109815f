//! CLI entry point for Flowsmith.
//!
//! This binary provides the `flowsmith` command with subcommands for
//! serving the HTTP API and compiling a single prompt.

mod cli;
mod compile;
mod config;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use flowsmith_compiler::WorkflowGenerator;
use flowsmith_web::WebServer;

use crate::cli::{Cli, Commands, Stage};
use crate::config::AppConfig;

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env before tracing so RUST_LOG can come from it.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(if cli.verbose { "debug" } else { "info" });

    let config = AppConfig::load(&cli.config)?;

    match cli.command {
        Commands::Serve { bind, port } => cmd_serve(config, bind, port).await,
        Commands::Compile {
            prompt,
            stage,
            pretty,
        } => cmd_compile(config, &prompt, stage, pretty),
    }
}

// ---------------------------------------------------------------------------
// Subcommand: serve
// ---------------------------------------------------------------------------

async fn cmd_serve(config: AppConfig, bind: Option<String>, port: Option<u16>) -> Result<()> {
    let mut web_config = config.server;
    if let Some(bind) = bind {
        web_config.bind_addr = bind;
    }
    if let Some(port) = port {
        web_config.port = port;
    }

    let generator = Arc::new(
        WorkflowGenerator::new(config.compiler).context("failed to build workflow compiler")?,
    );
    info!(version = env!("CARGO_PKG_VERSION"), "starting Flowsmith");

    WebServer::new(web_config, generator)
        .start()
        .await
        .map_err(|e| anyhow::anyhow!("web server error: {e}"))
}

// ---------------------------------------------------------------------------
// Subcommand: compile
// ---------------------------------------------------------------------------

fn cmd_compile(config: AppConfig, prompt: &str, stage: Stage, pretty: bool) -> Result<()> {
    let generator =
        WorkflowGenerator::new(config.compiler).context("failed to build workflow compiler")?;
    let output = compile::render(&generator, stage, prompt);

    let text = if pretty {
        serde_json::to_string_pretty(&output)
    } else {
        serde_json::to_string(&output)
    }
    .context("failed to serialize output")?;
    println!("{text}");
    Ok(())
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Initialize the tracing subscriber.
///
/// Uses `RUST_LOG` if set, otherwise falls back to `default_level`.
fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
