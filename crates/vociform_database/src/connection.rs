//! Database connection and pool utilities.

use crate::DatabaseResult;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use tracing::{debug, info};
use vociform_error::{DatabaseError, DatabaseErrorKind};

/// Pooled PostgreSQL connections.
pub type PgPool = Pool<ConnectionManager<PgConnection>>;

/// Tables the service expects to exist.
pub const EXPECTED_TABLES: [&str; 4] = ["usage_accounts", "usage_events", "forms", "responses"];

/// Migrations compiled into the binary.
const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Establish a single connection to the PostgreSQL database.
///
/// Reads the `DATABASE_URL` environment variable to determine the
/// connection string.
///
/// # Errors
///
/// Returns an error if:
/// - `DATABASE_URL` environment variable is not set
/// - Connection to the database fails
pub fn establish_connection() -> DatabaseResult<PgConnection> {
    let database_url = std::env::var("DATABASE_URL").map_err(|_| {
        DatabaseError::new(DatabaseErrorKind::Connection(
            "DATABASE_URL environment variable not set".to_string(),
        ))
    })?;

    PgConnection::establish(&database_url)
        .map_err(|e| DatabaseError::new(DatabaseErrorKind::Connection(e.to_string())))
}

/// Build an r2d2 connection pool for the given database URL.
///
/// # Errors
///
/// Returns a connection error if the pool cannot be initialized.
pub fn create_pool(database_url: &str) -> DatabaseResult<PgPool> {
    let manager = ConnectionManager::<PgConnection>::new(database_url);
    Pool::builder()
        .build(manager)
        .map_err(|e| DatabaseError::new(DatabaseErrorKind::Connection(e.to_string())))
}

/// Apply all pending embedded migrations.
///
/// # Errors
///
/// Returns a migration error if any migration fails to apply.
pub fn run_migrations(conn: &mut PgConnection) -> DatabaseResult<()> {
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| DatabaseError::new(DatabaseErrorKind::Migration(e.to_string())))?;
    for migration in &applied {
        info!(migration = %migration, "Applied migration");
    }
    debug!(count = applied.len(), "Migrations up to date");
    Ok(())
}

#[derive(QueryableByName)]
struct TableName {
    #[diesel(sql_type = diesel::sql_types::Text)]
    table_name: String,
}

/// Report which of the expected tables are missing from the public
/// schema. Empty means the database is fully provisioned.
///
/// # Errors
///
/// Returns a query error if the catalog lookup fails.
pub fn missing_tables(conn: &mut PgConnection) -> DatabaseResult<Vec<String>> {
    let present: Vec<TableName> = diesel::sql_query(
        "SELECT table_name::text AS table_name \
         FROM information_schema.tables WHERE table_schema = 'public'",
    )
    .load(conn)?;

    let present: Vec<&str> = present.iter().map(|t| t.table_name.as_str()).collect();
    Ok(EXPECTED_TABLES
        .iter()
        .filter(|t| !present.contains(*t))
        .map(|t| t.to_string())
        .collect())
}
