//! The `serve` command: wire the stores and run the HTTP server.

use std::sync::Arc;
use tracing::info;
use vociform_database::{
    create_pool, establish_connection, run_migrations, DatabaseFormStore, DatabaseResponseStore,
    DatabaseUsageStore,
};
use vociform_interface::{FormStore, ResponseStore, Transcriber, UsageStore};
use vociform_quota::{QuotaGate, RateLimiter, VociformConfig};
use vociform_server::{create_router, AppState, AuthKeys};
use vociform_transcribe::WhisperDriver;

/// Run the API server on `0.0.0.0:<port>`.
pub async fn run_serve(port: u16, migrate: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config = VociformConfig::load()?;

    if migrate {
        let mut conn = establish_connection()?;
        run_migrations(&mut conn)?;
        info!("Migrations applied");
    }

    let database_url = std::env::var("DATABASE_URL")
        .map_err(|_| "DATABASE_URL environment variable not set")?;
    let jwt_secret =
        std::env::var("JWT_SECRET").map_err(|_| "JWT_SECRET environment variable not set")?;

    let pool = create_pool(&database_url)?;
    let usage = Arc::new(DatabaseUsageStore::new(pool.clone())) as Arc<dyn UsageStore>;
    let transcriber = Arc::new(WhisperDriver::new(config.transcription.clone())?);

    let state = AppState {
        forms: Arc::new(DatabaseFormStore::new(pool.clone())) as Arc<dyn FormStore>,
        responses: Arc::new(DatabaseResponseStore::new(pool)) as Arc<dyn ResponseStore>,
        transcriber: transcriber as Arc<dyn Transcriber>,
        quota: QuotaGate::new(Arc::clone(&usage), &config),
        limiter: RateLimiter::new(usage, &config),
        auth: AuthKeys::new(jwt_secret.as_bytes()),
        transcription: config.transcription.clone(),
    };

    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    info!(port, "Listening");
    axum::serve(listener, app).await?;
    Ok(())
}
