//! CLI argument definitions for Flowsmith.
//!
//! All `clap` structures live here so that `main.rs` stays focused on
//! dispatching subcommands.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Flowsmith -- compile automation requests into workflow graphs.
#[derive(Parser)]
#[command(
    name = "flowsmith",
    version,
    about = "Flowsmith -- prompt-to-workflow compiler",
    long_about = "Turns a free-text automation request into a workflow graph of \
                  trigger, action and condition nodes, either over HTTP or from \
                  the command line."
)]
pub struct Cli {
    /// Path to the TOML configuration file.
    #[arg(long, short, global = true, default_value = "flowsmith.toml")]
    pub config: PathBuf,

    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP API server.
    Serve {
        /// Address to bind the HTTP server to (overrides the config file).
        #[arg(long)]
        bind: Option<String>,

        /// Port to listen on (overrides the config file).
        #[arg(long, short)]
        port: Option<u16>,
    },

    /// Compile one prompt and print the result as JSON.
    Compile {
        /// The automation request to compile.
        prompt: String,

        /// Which artifact to produce.
        #[arg(long, short, value_enum, default_value_t = Stage::Full)]
        stage: Stage,

        /// Pretty-print the JSON output.
        #[arg(long)]
        pretty: bool,
    },
}

/// Compiler stage selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Stage {
    /// The complete workflow definition.
    Full,
    /// Nodes only, including utility nodes.
    Nodes,
    /// The trigger descriptor.
    Trigger,
    /// Connections over nodes synthesized from the same prompt.
    Connections,
}
