use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use std::any::Any;
use thiserror::Error;

use crate::core::error::QuoteError;

const RETRY_SUGGESTION: &str = "Tente novamente mais tarde ou use o endpoint POST /cotacao para registrar manualmente.";

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Falha ao buscar cotação: {0}")]
    UpstreamUnavailable(String),
    #[error("Dados inválidos: {0}")]
    InvalidInput(String),
}

impl From<QuoteError> for ApiError {
    fn from(err: QuoteError) -> Self {
        match err {
            QuoteError::UpstreamUnavailable(details) => ApiError::UpstreamUnavailable(details),
            QuoteError::InvalidInput(details) => ApiError::InvalidInput(details),
        }
    }
}

#[derive(Serialize)]
pub(crate) struct ErrorBody {
    erro: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    mensagem: Option<&'static str>,
    detalhes: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    sugestao: Option<&'static str>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::UpstreamUnavailable(detalhes) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorBody {
                    erro: "Falha ao buscar cotação",
                    mensagem: None,
                    detalhes,
                    sugestao: Some(RETRY_SUGGESTION),
                },
            ),
            ApiError::InvalidInput(detalhes) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    erro: "Dados inválidos",
                    mensagem: Some("Forneça uma moeda válida e um valor numérico"),
                    detalhes,
                    sugestao: None,
                },
            ),
        };
        (status, Json(body)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Turns a handler panic into the generic JSON 500 response.
pub(crate) fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detalhes = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "erro desconhecido".to_string()
    };
    tracing::error!(%detalhes, "Unhandled error while processing request");

    let body = ErrorBody {
        erro: "Erro interno do servidor",
        mensagem: None,
        detalhes,
        sugestao: None,
    };
    (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
}
