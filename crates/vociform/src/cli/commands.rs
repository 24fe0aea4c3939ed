//! CLI command definitions.

use clap::{Parser, Subcommand};

/// Vociform - voice-enabled form builder backend
#[derive(Parser, Debug)]
#[command(name = "vociform")]
#[command(about = "Voice-enabled form builder backend", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP API server
    Serve {
        /// Port to listen on
        #[arg(long, default_value = "3000")]
        port: u16,

        /// Apply pending migrations before serving
        #[arg(long)]
        migrate: bool,
    },

    /// Apply pending database migrations
    Migrate,

    /// Verify the expected database tables exist
    CheckDb,
}
