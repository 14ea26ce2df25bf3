use std::sync::Arc;

use finledger_api::app_state::AppState;
use finledger_api::config::load_config;
use finledger_api::http;
use finledger_api::infra::postgres;
use finledger_api::repository::memory::{InMemoryStatementsRepository, InMemoryUsersRepository};
use finledger_api::repository::postgres::{PgStatementsRepository, PgUsersRepository};
use finledger_api::repository::{StatementsRepository, UsersRepository};
use finledger_api::telemetry::init_telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if exists
    let _ = dotenvy::dotenv();

    // Load configuration
    let config = load_config().unwrap_or_else(|e| {
        eprintln!("Failed to load configuration: {}", e);
        std::process::exit(1);
    });

    // Initialize telemetry
    init_telemetry(&config.telemetry);

    tracing::info!("Initializing integrations...");

    let pg_pool = postgres::init_postgres(&config.integrations).await;

    // Postgres-backed stores when a pool is up, in-memory stores otherwise
    let (users, statements): (Arc<dyn UsersRepository>, Arc<dyn StatementsRepository>) =
        match pg_pool.clone() {
            Some(pool) => (
                Arc::new(PgUsersRepository::new(pool.clone())),
                Arc::new(PgStatementsRepository::new(pool)),
            ),
            None => {
                tracing::warn!("No database available, falling back to in-memory stores");
                (
                    Arc::new(InMemoryUsersRepository::new()),
                    Arc::new(InMemoryStatementsRepository::new()),
                )
            }
        };

    let app_state = AppState::new(
        config.service.clone(),
        users,
        statements,
        pg_pool.clone(),
    );

    // Setup graceful shutdown
    let (tx, rx) = tokio::sync::oneshot::channel::<()>();

    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Shutdown signal received");
            let _ = tx.send(());
        }
    });

    // Start HTTP server
    let server = http::start_server(config, app_state);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!(error = %e, "Server error");
                return Err(e);
            }
        }
        _ = rx => {
            tracing::info!("Shutting down gracefully");
        }
    }

    if let Some(pool) = pg_pool {
        tracing::info!("Closing PostgreSQL connection pool");
        pool.close().await;
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
