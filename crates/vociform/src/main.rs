//! Vociform CLI binary.
//!
//! Commands:
//! - `serve` — run the HTTP API (optionally applying migrations first)
//! - `migrate` — apply embedded database migrations
//! - `check-db` — verify the expected tables exist

use clap::Parser;

mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{run_serve, Cli, Commands};

    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let log_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .init();

    match cli.command {
        Commands::Serve { port, migrate } => {
            run_serve(port, migrate).await?;
        }
        Commands::Migrate => {
            cli::run_migrate()?;
        }
        Commands::CheckDb => {
            cli::run_check_db()?;
        }
    }

    Ok(())
}
