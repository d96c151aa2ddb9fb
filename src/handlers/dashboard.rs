// src/handlers/dashboard.rs

use askama::Template;
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};

use crate::{
    common::error::AppError,
    config::AppState,
    models::dashboard::DashboardReport,
    services::dashboard_service::build_report,
    templates::{DashboardTemplate, DashboardView},
};

// GET /
// Busca -> agrega -> renderiza, uma vez por request, sem cache.
pub async fn dashboard_page(State(app_state): State<AppState>) -> Result<Response, AppError> {
    let tables = match app_state.dashboard_service.fetch_tables().await {
        Ok(tables) => tables,
        Err(err) if err.is_data_unavailable() => {
            // Para aqui: só título, descrição e o banner de erro
            tracing::error!("Falha ao carregar os dados do dashboard: {}", err);
            let page = DashboardTemplate::unavailable(&err).render()?;
            return Ok((StatusCode::SERVICE_UNAVAILABLE, Html(page)).into_response());
        }
        Err(err) => return Err(err),
    };

    // Data malformada etc. não é tratada: falha a página inteira (500)
    let report = build_report(tables)?;
    let page = DashboardTemplate::ready(DashboardView::from_report(&report)).render()?;

    Ok(Html(page).into_response())
}

// GET /api/dashboard
#[utoipa::path(
    get,
    path = "/api/dashboard",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Métricas, agrupamentos e clientes lidos agora do banco", body = DashboardReport),
        (status = 503, description = "Banco de dados indisponível"),
        (status = 500, description = "Dados que não puderam ser agregados")
    )
)]
pub async fn get_report(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let report = app_state.dashboard_service.get_report().await?;

    Ok((StatusCode::OK, Json(report)))
}

// GET /api/health
#[utoipa::path(
    get,
    path = "/api/health",
    tag = "Health",
    responses(
        (status = 200, description = "Servidor no ar", body = String)
    )
)]
pub async fn health() -> &'static str {
    "OK"
}
