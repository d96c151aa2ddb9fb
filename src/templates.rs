// src/templates.rs

use askama::Template;

use crate::{
    charts::{self, BarChart, LineChart, Palette},
    common::format::{format_count, format_currency},
    models::dashboard::{Client, DashboardReport},
};

pub const PAGE_TITLE: &str = "Laptop Rental Dashboard";
pub const PAGE_DESCRIPTION: &str = "Monitor sales, purchases, and client records in real-time.";
pub const CURRENCY_SYMBOL: &str = "₹";

const SALES_COLOR: &str = "#1f77b4";
const PURCHASE_COLOR: &str = "#ff7f0e";

#[derive(Debug, Clone)]
pub struct Metric {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone)]
pub struct ClientRow {
    pub client_id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub rented_model: String,
    pub rent_date: String,
}

impl From<&Client> for ClientRow {
    fn from(client: &Client) -> Self {
        // NULL vira célula vazia
        let cell = |v: &Option<String>| v.clone().unwrap_or_default();
        Self {
            client_id: cell(&client.client_id),
            name: cell(&client.name),
            email: cell(&client.email),
            phone: cell(&client.phone),
            rented_model: cell(&client.rented_model),
            rent_date: cell(&client.rent_date),
        }
    }
}

/// Tudo que a página precisa, já calculado.
#[derive(Debug, Clone)]
pub struct DashboardView {
    pub metrics: Vec<Metric>,
    pub sales_chart: BarChart,
    pub purchase_chart: BarChart,
    pub clients: Vec<ClientRow>,
    pub time_chart: LineChart,
}

impl DashboardView {
    pub fn from_report(report: &DashboardReport) -> Self {
        let metrics = vec![
            Metric {
                label: format!("Total Sales ({})", CURRENCY_SYMBOL),
                value: format_currency(report.summary.total_sales),
            },
            Metric {
                label: format!("Total Purchase ({})", CURRENCY_SYMBOL),
                value: format_currency(report.summary.total_purchase),
            },
            Metric {
                label: "Total Clients".to_string(),
                value: format_count(report.summary.total_clients as i64),
            },
        ];

        let sales_chart = charts::bar_chart(
            "Sales by Brand",
            "Brand",
            "Units Sold",
            &report.sales_by_brand,
            Palette::Blues,
        );
        let purchase_chart = charts::bar_chart(
            "Purchases by Brand",
            "Brand",
            "Units Purchased",
            &report.purchase_by_brand,
            Palette::Greens,
        );
        let time_chart = charts::time_series_chart(
            "Sales vs Purchase Over Time",
            "Date",
            "Quantity",
            &[
                ("Sales", SALES_COLOR, report.sales_by_date.as_slice()),
                ("Purchase", PURCHASE_COLOR, report.purchase_by_date.as_slice()),
            ],
        );

        Self {
            metrics,
            sales_chart,
            purchase_chart,
            clients: report.clients.iter().map(ClientRow::from).collect(),
            time_chart,
        }
    }
}

// Página única: ou o dashboard completo, ou só o banner de erro.
#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub title: &'static str,
    pub description: &'static str,
    pub error: Option<String>,
    pub view: Option<DashboardView>,
}

impl DashboardTemplate {
    pub fn ready(view: DashboardView) -> Self {
        Self {
            title: PAGE_TITLE,
            description: PAGE_DESCRIPTION,
            error: None,
            view: Some(view),
        }
    }

    pub fn unavailable(detail: impl std::fmt::Display) -> Self {
        Self {
            title: PAGE_TITLE,
            description: PAGE_DESCRIPTION,
            error: Some(format!("Database connection error: {}", detail)),
            view: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::dashboard::{DashboardTables, Purchase, Sale},
        services::dashboard_service::build_report,
    };
    use rust_decimal::Decimal;

    fn sample_tables() -> DashboardTables {
        DashboardTables {
            sales: vec![
                Sale {
                    brand: Some("Dell".to_string()),
                    model: Some("XPS 13".to_string()),
                    quantity: Some(2),
                    price: Some(Decimal::from(55000)),
                    sale_date: Some("2024-01-10".to_string()),
                },
                Sale {
                    brand: Some("Lenovo".to_string()),
                    model: Some("ThinkPad".to_string()),
                    quantity: Some(1),
                    price: Some(Decimal::new(4899950, 2)),
                    sale_date: Some("2024-01-12".to_string()),
                },
            ],
            purchases: vec![Purchase {
                brand: Some("Dell".to_string()),
                model: Some("XPS 13".to_string()),
                quantity: Some(5),
                cost: Some(Decimal::from(40000)),
                purchase_date: Some("2024-01-02".to_string()),
            }],
            clients: vec![Client {
                client_id: Some("7".to_string()),
                name: Some("Ravi <R&D>".to_string()),
                email: Some("ravi@example.com".to_string()),
                phone: None,
                rented_model: Some("XPS 13".to_string()),
                rent_date: Some("2024-01-15".to_string()),
            }],
        }
    }

    #[test]
    fn test_full_page_renders_every_section_in_order() {
        let report = build_report(sample_tables()).unwrap();
        let html = DashboardTemplate::ready(DashboardView::from_report(&report))
            .render()
            .unwrap();

        // 2 × 55000 + 48999.50 e 5 × 40000
        assert!(html.contains("158,999.50"));
        assert!(html.contains("200,000.00"));

        let sections = [
            PAGE_TITLE,
            PAGE_DESCRIPTION,
            "Total Sales (₹)",
            "Total Purchase (₹)",
            "Total Clients",
            "Sales and Purchase Trends by Brand",
            "Sales by Brand",
            "Purchases by Brand",
            "Client Information",
            "Sales vs Purchase Over Time",
        ];
        let mut last = 0;
        for section in sections {
            let pos = html[last..]
                .find(section)
                .unwrap_or_else(|| panic!("seção ausente ou fora de ordem: {}", section));
            last += pos;
        }

        assert_eq!(html.matches("<svg").count(), 3);
        assert!(html.contains("Units Sold"));
        assert!(html.contains("Units Purchased"));
        assert!(!html.contains("Database connection error"));
    }

    #[test]
    fn test_row_with_null_brand_and_model_still_renders_the_page() {
        let mut tables = sample_tables();
        tables.sales.push(Sale {
            brand: None,
            model: None,
            quantity: Some(3),
            price: Some(Decimal::from(1000)),
            sale_date: Some("2024-01-12".to_string()),
        });
        tables.purchases.push(Purchase {
            brand: Some("HP".to_string()),
            model: Some("Pavilion".to_string()),
            quantity: None,
            cost: None,
            purchase_date: None,
        });

        let report = build_report(tables).unwrap();
        let html = DashboardTemplate::ready(DashboardView::from_report(&report))
            .render()
            .unwrap();

        // A linha sem marca ainda entra no total: 158,999.50 + 3 × 1000
        assert!(html.contains("161,999.50"));
        assert!(html.contains("200,000.00"));
        assert_eq!(report.sales_by_brand.len(), 2);
        assert_eq!(report.purchase_by_brand.len(), 2);
        assert_eq!(html.matches("<svg").count(), 3);
        assert!(!html.contains("Database connection error"));
    }

    #[test]
    fn test_client_cells_are_escaped() {
        let report = build_report(sample_tables()).unwrap();
        let html = DashboardTemplate::ready(DashboardView::from_report(&report))
            .render()
            .unwrap();
        assert!(html.contains("Ravi &#60;R&#38;D&#62;") || html.contains("Ravi &lt;R&amp;D&gt;"));
        assert!(!html.contains("Ravi <R&D>"));
    }

    #[test]
    fn test_empty_clients_render_zero_rows() {
        let report = build_report(DashboardTables::default()).unwrap();
        let view = DashboardView::from_report(&report);
        assert!(view.clients.is_empty());

        let html = DashboardTemplate::ready(view).render().unwrap();
        assert!(html.contains("Client Information"));
        assert_eq!(html.matches("<tr class=\"client-row\">").count(), 0);
        assert!(html.contains("0.00"));
    }

    #[test]
    fn test_error_page_has_one_banner_and_nothing_else() {
        let html = DashboardTemplate::unavailable("Access denied for user 'root'")
            .render()
            .unwrap();

        assert!(html.contains(PAGE_TITLE));
        assert_eq!(html.matches("Database connection error").count(), 1);
        assert_eq!(html.matches("<svg").count(), 0);
        assert_eq!(html.matches("<table").count(), 0);
        assert!(!html.contains("Total Sales"));
    }
}
