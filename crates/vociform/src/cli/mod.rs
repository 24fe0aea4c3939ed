//! Command-line interface.

mod commands;
mod serve;

pub use commands::{Cli, Commands};
pub use serve::run_serve;

use tracing::info;
use vociform_database::{establish_connection, missing_tables, run_migrations};

/// Apply pending embedded migrations against `DATABASE_URL`.
pub fn run_migrate() -> Result<(), Box<dyn std::error::Error>> {
    let mut conn = establish_connection()?;
    run_migrations(&mut conn)?;
    info!("Migrations applied");
    Ok(())
}

/// Verify the expected tables exist, reporting any that are missing.
pub fn run_check_db() -> Result<(), Box<dyn std::error::Error>> {
    let mut conn = establish_connection()?;
    let missing = missing_tables(&mut conn)?;
    if missing.is_empty() {
        println!("Database OK: all expected tables present");
        Ok(())
    } else {
        for table in &missing {
            println!("Missing table: {}", table);
        }
        Err(format!("{} expected table(s) missing; run `vociform migrate`", missing.len()).into())
    }
}
