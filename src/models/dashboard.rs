// src/models/dashboard.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

// --- LINHAS CRUAS (espelho direto das tabelas) ---

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    // Qualquer coluna pode vir NULL: a linha é lida mesmo assim
    pub brand: Option<String>,
    pub model: Option<String>,
    pub quantity: Option<i64>,
    pub price: Option<Decimal>,
    // Vem como texto do banco; é interpretada na agregação
    pub sale_date: Option<String>,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Purchase {
    pub brand: Option<String>,
    pub model: Option<String>,
    pub quantity: Option<i64>,
    pub cost: Option<Decimal>,
    pub purchase_date: Option<String>,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub client_id: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub rented_model: Option<String>,
    pub rent_date: Option<String>,
}

/// As três tabelas lidas numa única passada de render.
#[derive(Debug, Clone, Default)]
pub struct DashboardTables {
    pub sales: Vec<Sale>,
    pub purchases: Vec<Purchase>,
    pub clients: Vec<Client>,
}

// --- AGREGADOS ---

// 1. Cards do topo
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_sales: Decimal,
    pub total_purchase: Decimal,
    pub total_clients: usize,
}

// 2. Gráficos de barra (quantidade por marca)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BrandQuantity {
    pub brand: String,
    pub quantity: i64,
}

// 3. Série temporal (quantidade por dia)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DateQuantity {
    pub date: NaiveDate,
    pub quantity: i64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardReport {
    pub summary: DashboardSummary,
    pub sales_by_brand: Vec<BrandQuantity>,
    pub purchase_by_brand: Vec<BrandQuantity>,
    pub sales_by_date: Vec<DateQuantity>,
    pub purchase_by_date: Vec<DateQuantity>,
    pub clients: Vec<Client>,
}
