// src/docs.rs

use utoipa::OpenApi;
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Dashboard ---
        handlers::dashboard::get_report,

        // --- Health ---
        handlers::dashboard::health,
    ),
    components(
        schemas(
            // --- DASHBOARD ---
            models::dashboard::DashboardReport,
            models::dashboard::DashboardSummary,
            models::dashboard::BrandQuantity,
            models::dashboard::DateQuantity,
            models::dashboard::Sale,
            models::dashboard::Purchase,
            models::dashboard::Client,
        )
    ),
    tags(
        (name = "Dashboard", description = "Resumo somente-leitura de vendas, compras e clientes"),
        (name = "Health", description = "Verificação de vida do servidor")
    )
)]
pub struct ApiDoc;
