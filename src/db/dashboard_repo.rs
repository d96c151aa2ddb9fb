// src/db/dashboard_repo.rs

use sqlx::{
    mysql::{MySqlConnectOptions, MySqlConnection},
    Connection, Executor, MySql,
};
use crate::{
    common::error::AppError,
    models::dashboard::{Client, DashboardTables, Purchase, Sale},
};

// As três leituras fixas. Os CASTs deixam os tipos decodificados estáveis
// independente de como a coluna foi criada (INT/SMALLINT, DECIMAL/FLOAT, DATE/DATETIME).
// Valores com escala 8: arredondar para 2 casas só na formatação.
const QUERY_SALES: &str = r#"
    SELECT brand,
           model,
           CAST(quantity AS SIGNED) AS quantity,
           CAST(price AS DECIMAL(24, 8)) AS price,
           CAST(sale_date AS CHAR) AS sale_date
    FROM sales
"#;

const QUERY_PURCHASE: &str = r#"
    SELECT brand,
           model,
           CAST(quantity AS SIGNED) AS quantity,
           CAST(cost AS DECIMAL(24, 8)) AS cost,
           CAST(purchase_date AS CHAR) AS purchase_date
    FROM purchase
"#;

const QUERY_CLIENTS: &str = r#"
    SELECT CAST(client_id AS CHAR) AS client_id,
           name,
           email,
           phone,
           rented_model,
           CAST(rent_date AS CHAR) AS rent_date
    FROM clients
"#;

// Sem pool: cada render abre e fecha a sua própria conexão.
#[derive(Clone)]
pub struct DashboardRepository {
    connect_options: MySqlConnectOptions,
}

impl DashboardRepository {
    pub fn new(connect_options: MySqlConnectOptions) -> Self {
        Self { connect_options }
    }

    /// Abre uma conexão, roda as três queries e fecha a conexão (sempre).
    pub async fn fetch_tables(&self) -> Result<DashboardTables, AppError> {
        let mut conn = MySqlConnection::connect_with(&self.connect_options).await?;

        let result = Self::read_all(&mut conn).await;

        // Fecha mesmo se alguma query falhou. Erro no close só vai pro log.
        if let Err(e) = conn.close().await {
            tracing::warn!("Falha ao fechar a conexão com o banco: {}", e);
        }

        let tables = result?;
        tracing::debug!(
            sales = tables.sales.len(),
            purchases = tables.purchases.len(),
            clients = tables.clients.len(),
            "Tabelas do dashboard carregadas"
        );
        Ok(tables)
    }

    async fn read_all(conn: &mut MySqlConnection) -> Result<DashboardTables, AppError> {
        let sales = Self::get_sales(&mut *conn).await?;
        let purchases = Self::get_purchases(&mut *conn).await?;
        let clients = Self::get_clients(&mut *conn).await?;

        Ok(DashboardTables {
            sales,
            purchases,
            clients,
        })
    }

    pub async fn get_sales<'e, E>(executor: E) -> Result<Vec<Sale>, AppError>
    where
        E: Executor<'e, Database = MySql>,
    {
        let rows = sqlx::query_as::<_, Sale>(QUERY_SALES)
            .fetch_all(executor)
            .await?;

        Ok(rows)
    }

    pub async fn get_purchases<'e, E>(executor: E) -> Result<Vec<Purchase>, AppError>
    where
        E: Executor<'e, Database = MySql>,
    {
        let rows = sqlx::query_as::<_, Purchase>(QUERY_PURCHASE)
            .fetch_all(executor)
            .await?;

        Ok(rows)
    }

    pub async fn get_clients<'e, E>(executor: E) -> Result<Vec<Client>, AppError>
    where
        E: Executor<'e, Database = MySql>,
    {
        let rows = sqlx::query_as::<_, Client>(QUERY_CLIENTS)
            .fetch_all(executor)
            .await?;

        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Porta 1 em loopback: conexão recusada na hora, sem depender de um MySQL real
    fn unreachable_options() -> MySqlConnectOptions {
        MySqlConnectOptions::new()
            .host("127.0.0.1")
            .port(1)
            .username("root")
            .password("wrong")
            .database("laptop_rental")
    }

    #[tokio::test]
    async fn test_connection_failure_is_data_unavailable() {
        let repo = DashboardRepository::new(unreachable_options());
        let err = repo.fetch_tables().await.unwrap_err();
        assert!(err.is_data_unavailable());
    }

    #[test]
    fn test_queries_target_expected_tables() {
        assert!(QUERY_SALES.contains("FROM sales"));
        assert!(QUERY_PURCHASE.contains("FROM purchase"));
        assert!(QUERY_CLIENTS.contains("FROM clients"));
        assert!(!QUERY_SALES.contains('?'));
    }

    #[test]
    fn test_money_columns_keep_fractional_precision() {
        assert!(QUERY_SALES.contains("CAST(price AS DECIMAL(24, 8))"));
        assert!(QUERY_PURCHASE.contains("CAST(cost AS DECIMAL(24, 8))"));
        assert!(!QUERY_SALES.contains("DECIMAL(15, 2)"));
        assert!(!QUERY_PURCHASE.contains("DECIMAL(15, 2)"));
    }
}
