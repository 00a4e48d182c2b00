use anyhow::Context;
use dotenvy::dotenv;
use tracing::info;

use pokeapi::logging::init_tracing;
use pokeapi::router::init_router;
use pokeapi::state::init_app_state;
use pokeapi_config::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    init_tracing()?;

    let server_config = ServerConfig::from_env();
    let state = init_app_state().await?;

    sqlx::migrate!("./migrations")
        .run(&state.db)
        .await
        .context("Failed to run migrations")?;

    let app = init_router(state);

    let addr = server_config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("Server running on http://{}", addr);
    info!("OpenAPI document at http://{}/api-docs/openapi.json", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
