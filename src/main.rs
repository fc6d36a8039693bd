use anyhow::Context;
use dotenvy::dotenv;
use tracing::info;
use warden::cli::run_migrations;
use warden::logging::init_tracing;
use warden::router::init_router;
use warden::state::init_app_state;
use warden_config::{DatabaseConfig, ServerConfig};
use warden_db::init_db_pool;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    init_tracing();

    let pool = init_db_pool(&DatabaseConfig::from_env()).await?;
    run_migrations(&pool).await?;

    let app = init_router(init_app_state(pool));

    let address = ServerConfig::from_env().bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {address}"))?;

    info!(%address, "Server running");
    info!("Swagger UI available at http://{address}/swagger-ui");
    info!("Scalar UI available at http://{address}/scalar");

    axum::serve(listener, app).await.context("Server error")
}
