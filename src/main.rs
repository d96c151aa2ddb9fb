//src/main.rs

use axum::{routing::get, Router};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod charts;
mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod models;
mod services;
mod templates;

use crate::{config::AppState, docs::ApiDoc};

fn build_router(app_state: AppState) -> Router {
    Router::new()
        // A página (HTML)
        .route("/", get(handlers::dashboard::dashboard_page))
        // Os mesmos dados em JSON
        .route("/api/dashboard", get(handlers::dashboard::get_report))
        .route("/api/health", get(handlers::dashboard::health))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // RUST_LOG controla o nível; padrão "info"
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .compact()
        .init();

    // Nenhuma conexão é aberta aqui: cada carregamento da página abre a sua.
    let app_state = AppState::new()?;
    let addr = app_state.server_addr;

    let app = build_router(app_state);

    let listener = TcpListener::bind(addr).await?;
    tracing::info!("🚀 Dashboard disponível em http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
