// src/common/error.rs

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// Tipo de erro único da aplicação.
// Só existe UMA classe de erro "de dados": DataUnavailable. O resto é falha de render.
#[derive(Debug, Error)]
pub enum AppError {
    // Falha ao abrir a conexão ou rodar uma das queries
    #[error("{0}")]
    DataUnavailable(sqlx::Error),

    // O banco respondeu, mas uma linha não pôde ser lida (tipo inesperado etc.)
    #[error("Linha inválida: {0}")]
    MalformedRow(sqlx::Error),

    // Data em texto que não conseguimos interpretar (falha a página inteira)
    #[error("Data inválida: '{value}'")]
    MalformedDate { value: String },

    // Soma ou produto que não cabe no tipo
    #[error("Estouro numérico ao agregar: {context}")]
    Overflow { context: String },

    #[error("Erro ao renderizar o template: {0}")]
    TemplateError(#[from] askama::Error),
}

// Erro de decodificação é problema do dado, não da conexão
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::ColumnDecode { .. }
            | sqlx::Error::Decode(_)
            | sqlx::Error::ColumnNotFound(_)
            | sqlx::Error::ColumnIndexOutOfBounds { .. } => AppError::MalformedRow(err),
            other => AppError::DataUnavailable(other),
        }
    }
}

impl AppError {
    pub fn is_data_unavailable(&self) -> bool {
        matches!(self, AppError::DataUnavailable(_))
    }

    pub fn overflow(context: impl Into<String>) -> Self {
        AppError::Overflow {
            context: context.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::DataUnavailable(ref e) => {
                tracing::error!("Banco de dados indisponível: {}", e);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    format!("Database connection error: {}", e),
                )
            }

            // MalformedRow, MalformedDate, Overflow, TemplateError viram 500.
            // O detalhe vai pro log, o cliente recebe uma mensagem genérica.
            ref e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Ocorreu um erro inesperado.".to_string(),
                )
            }
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
