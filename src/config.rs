// src/config.rs

use std::{env, net::SocketAddr};

use anyhow::Context;
use sqlx::mysql::MySqlConnectOptions;

use crate::{db::DashboardRepository, services::dashboard_service::DashboardService};

// Valores padrão: os mesmos da instalação original (tudo local)
const DEFAULT_DB_HOST: &str = "localhost";
const DEFAULT_DB_PORT: u16 = 3306;
const DEFAULT_DB_USER: &str = "root";
const DEFAULT_DB_PASSWORD: &str = "yourpassword";
const DEFAULT_DB_NAME: &str = "laptop_rental";
const DEFAULT_SERVER_ADDR: &str = "127.0.0.1:8501";

/// Parâmetros de conexão. Nenhuma conexão é aberta aqui: cada render abre a sua.
#[derive(Debug, Clone)]
pub struct DatabaseSettings {
    pub connect_options: MySqlConnectOptions,
}

impl DatabaseSettings {
    /// Lê as configurações a partir de uma função de lookup (env em produção, mapa nos testes).
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        // DATABASE_URL tem prioridade sobre as variáveis soltas
        if let Some(url) = lookup("DATABASE_URL") {
            let connect_options = url
                .parse::<MySqlConnectOptions>()
                .context("DATABASE_URL inválida")?;
            return Ok(Self { connect_options });
        }

        let host = lookup("DB_HOST").unwrap_or_else(|| DEFAULT_DB_HOST.to_string());
        let port = match lookup("DB_PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .with_context(|| format!("DB_PORT inválida: '{}'", raw))?,
            None => DEFAULT_DB_PORT,
        };
        let user = lookup("DB_USER").unwrap_or_else(|| DEFAULT_DB_USER.to_string());
        let password = lookup("DB_PASSWORD").unwrap_or_else(|| DEFAULT_DB_PASSWORD.to_string());
        let database = lookup("DB_NAME").unwrap_or_else(|| DEFAULT_DB_NAME.to_string());

        let connect_options = MySqlConnectOptions::new()
            .host(&host)
            .port(port)
            .username(&user)
            .password(&password)
            .database(&database);

        Ok(Self { connect_options })
    }
}

#[derive(Clone)]
pub struct AppState {
    pub server_addr: SocketAddr,
    pub dashboard_service: DashboardService,
}

impl AppState {
    pub fn new() -> anyhow::Result<Self> {
        // O .env é opcional: sem ele valem as variáveis de ambiente ou os padrões
        dotenvy::dotenv().ok();

        let lookup = |key: &str| env::var(key).ok();
        let settings = DatabaseSettings::from_lookup(lookup)?;

        let raw_addr = lookup("SERVER_ADDR").unwrap_or_else(|| DEFAULT_SERVER_ADDR.to_string());
        let server_addr = raw_addr
            .parse::<SocketAddr>()
            .with_context(|| format!("SERVER_ADDR inválido: '{}'", raw_addr))?;

        Ok(Self::with_settings(server_addr, settings))
    }

    // --- Monta o gráfico de dependências ---
    pub fn with_settings(server_addr: SocketAddr, settings: DatabaseSettings) -> Self {
        let repo = DashboardRepository::new(settings.connect_options);
        let dashboard_service = DashboardService::new(repo);

        Self {
            server_addr,
            dashboard_service,
        }
    }
}
