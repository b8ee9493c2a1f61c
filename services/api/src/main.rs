use anyhow::Result;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use common::database::{DatabaseConfig, health_check, init_pool, run_migrations};
use staffdesk_api::{
    AppState,
    config::ServiceConfig,
    middleware::{JwtConfig, TokenVerifier},
    repositories::PgStore,
    routes,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Starting staffdesk API service");

    let config = ServiceConfig::load()?;

    // Initialize database connection pool
    let db_config = DatabaseConfig::from_env()?;
    let pool = init_pool(&db_config).await?;

    // Check database connectivity
    if health_check(&pool).await? {
        info!("Database connection successful");
    } else {
        anyhow::bail!("Failed to connect to database");
    }

    if config.run_migrations {
        run_migrations(&pool).await?;
    }

    let jwt_config = JwtConfig::from_env().map_err(anyhow::Error::msg)?;
    let verifier = TokenVerifier::new(&jwt_config)?;

    let policy = config.policy();
    info!(
        unique_salary_period = policy.unique_salary_period,
        lock_decided_leaves = policy.lock_decided_leaves,
        "Record-keeping policy"
    );

    let app_state = AppState::new(Arc::new(PgStore::new(pool)), verifier, policy);

    // Start the web server
    let app = routes::create_router(app_state);

    let listener = TcpListener::bind(&config.bind_address).await?;
    info!("API service listening on {}", config.bind_address);

    axum::serve(listener, app).await?;

    Ok(())
}
