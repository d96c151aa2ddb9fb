// src/services/dashboard_service.rs

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

use crate::{
    common::error::AppError,
    db::DashboardRepository,
    models::dashboard::{
        BrandQuantity, DashboardReport, DashboardSummary, DashboardTables, DateQuantity, Purchase,
        Sale,
    },
};

/// Uma linha de movimento (venda ou compra): marca, quantidade, valor unitário e data.
/// Qualquer campo pode faltar (NULL no banco); a agregação ignora o que falta.
pub trait StockMovement {
    fn brand(&self) -> Option<&str>;
    fn quantity(&self) -> Option<i64>;
    fn unit_amount(&self) -> Option<Decimal>;
    fn raw_date(&self) -> Option<&str>;
}

impl StockMovement for Sale {
    fn brand(&self) -> Option<&str> {
        self.brand.as_deref()
    }
    fn quantity(&self) -> Option<i64> {
        self.quantity
    }
    fn unit_amount(&self) -> Option<Decimal> {
        self.price
    }
    fn raw_date(&self) -> Option<&str> {
        self.sale_date.as_deref()
    }
}

impl StockMovement for Purchase {
    fn brand(&self) -> Option<&str> {
        self.brand.as_deref()
    }
    fn quantity(&self) -> Option<i64> {
        self.quantity
    }
    fn unit_amount(&self) -> Option<Decimal> {
        self.cost
    }
    fn raw_date(&self) -> Option<&str> {
        self.purchase_date.as_deref()
    }
}

#[derive(Clone)]
pub struct DashboardService {
    repo: DashboardRepository,
}

impl DashboardService {
    pub fn new(repo: DashboardRepository) -> Self {
        Self { repo }
    }

    /// Busca as três tabelas (sem cache: toda chamada vai ao banco).
    pub async fn fetch_tables(&self) -> Result<DashboardTables, AppError> {
        self.repo.fetch_tables().await
    }

    /// Busca + agrega. Usado pelo endpoint JSON.
    pub async fn get_report(&self) -> Result<DashboardReport, AppError> {
        let tables = self.fetch_tables().await?;
        build_report(tables)
    }
}

pub fn build_report(tables: DashboardTables) -> Result<DashboardReport, AppError> {
    let summary = DashboardSummary {
        total_sales: total_value(&tables.sales)?,
        total_purchase: total_value(&tables.purchases)?,
        total_clients: tables.clients.len(),
    };

    Ok(DashboardReport {
        summary,
        sales_by_brand: quantity_by_brand(&tables.sales)?,
        purchase_by_brand: quantity_by_brand(&tables.purchases)?,
        sales_by_date: quantity_by_date(&tables.sales)?,
        purchase_by_date: quantity_by_date(&tables.purchases)?,
        clients: tables.clients,
    })
}

/// Soma de quantidade × valor unitário. Linha sem quantidade ou sem valor não conta.
pub fn total_value<T: StockMovement>(rows: &[T]) -> Result<Decimal, AppError> {
    rows.iter().try_fold(Decimal::ZERO, |total, row| {
        let (Some(quantity), Some(amount)) = (row.quantity(), row.unit_amount()) else {
            return Ok(total);
        };
        Decimal::from(quantity)
            .checked_mul(amount)
            .and_then(|value| total.checked_add(value))
            .ok_or_else(|| AppError::overflow("soma de quantidade × valor"))
    })
}

// Soma no grupo; quantidade NULL só garante que o grupo exista
fn add_quantity(slot: &mut i64, quantity: Option<i64>) -> Result<(), AppError> {
    if let Some(quantity) = quantity {
        *slot = slot
            .checked_add(quantity)
            .ok_or_else(|| AppError::overflow("soma de quantidades"))?;
    }
    Ok(())
}

/// Quantidade somada por marca, ordenada pelo nome da marca. Linhas sem marca ficam de fora.
pub fn quantity_by_brand<T: StockMovement>(rows: &[T]) -> Result<Vec<BrandQuantity>, AppError> {
    let mut groups: BTreeMap<&str, i64> = BTreeMap::new();
    for row in rows {
        let Some(brand) = row.brand() else {
            continue;
        };
        add_quantity(groups.entry(brand).or_insert(0), row.quantity())?;
    }

    Ok(groups
        .into_iter()
        .map(|(brand, quantity)| BrandQuantity {
            brand: brand.to_string(),
            quantity,
        })
        .collect())
}

/// Quantidade somada por dia (ordem crescente). Linhas sem data ficam de fora.
pub fn quantity_by_date<T: StockMovement>(rows: &[T]) -> Result<Vec<DateQuantity>, AppError> {
    let mut groups: BTreeMap<NaiveDate, i64> = BTreeMap::new();
    for row in rows {
        let Some(raw) = row.raw_date() else {
            continue;
        };
        let date = parse_calendar_date(raw)?;
        add_quantity(groups.entry(date).or_insert(0), row.quantity())?;
    }

    Ok(groups
        .into_iter()
        .map(|(date, quantity)| DateQuantity { date, quantity })
        .collect())
}

/// Aceita data pura ou data+hora (com 'T' ou espaço); a hora é descartada.
pub fn parse_calendar_date(raw: &str) -> Result<NaiveDate, AppError> {
    let text = raw.trim();

    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Ok(date);
    }

    for format in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(text, format) {
            return Ok(datetime.date());
        }
    }

    Err(AppError::MalformedDate {
        value: raw.to_string(),
    })
}
