//! CLI command definitions and dispatch for the `parley` binary.
//!
//! Uses clap derive macros for argument parsing.

pub mod session;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Server-rendered chat application with PDF upload support.
#[derive(Parser)]
#[command(name = "parley", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP server.
    Serve {
        /// Port to bind (overrides config.toml).
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind (overrides config.toml).
        #[arg(long)]
        host: Option<String>,

        /// Export spans via OpenTelemetry (stdout exporter).
        #[arg(long)]
        otel: bool,
    },

    /// List chat sessions.
    #[command(alias = "ls")]
    Sessions,

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}
