//! services/api/src/error.rs
//!
//! Defines the error types of the API service: `ApiError` for startup
//! failures and `PlanRequestError` for a rejected `/gerar` request.

use crate::config::ConfigError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

/// The primary error type for the `plan_api` service.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Represents an error that occurred during configuration loading.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Represents a standard Input/Output error (e.g., binding to a network socket).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Why a plan could not be generated.
#[derive(Debug, thiserror::Error)]
pub enum PlanRequestError {
    #[error("Todos os campos são obrigatórios")]
    MissingField(&'static str),

    #[error("Duração deve ser 45 ou 90 minutos")]
    InvalidDuration(String),

    #[error("Valores inválidos selecionados")]
    InvalidEnumValue(#[from] lesson_plan_core::ParseError),

    #[error("Formulário inválido")]
    UnreadableForm(String),

    #[error("Erro interno ao gerar o plano")]
    Internal(String),
}

/// JSON body of every `/gerar` failure.
#[derive(Serialize, ToSchema)]
pub struct PlanErrorBody {
    pub success: bool,
    pub error: String,
}

impl IntoResponse for PlanRequestError {
    fn into_response(self) -> Response {
        let status = match &self {
            PlanRequestError::MissingField(field) => {
                tracing::warn!("Missing required field: {}", field);
                StatusCode::BAD_REQUEST
            }
            PlanRequestError::InvalidDuration(value) => {
                tracing::warn!("Invalid duration: '{}'", value);
                StatusCode::BAD_REQUEST
            }
            PlanRequestError::InvalidEnumValue(e) => {
                tracing::warn!("Invalid selection: {}", e);
                StatusCode::BAD_REQUEST
            }
            PlanRequestError::UnreadableForm(detail) => {
                tracing::warn!("Unreadable plan form: {}", detail);
                StatusCode::BAD_REQUEST
            }
            PlanRequestError::Internal(detail) => {
                tracing::error!("Failed to generate plan: {}", detail);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = PlanErrorBody {
            success: false,
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
