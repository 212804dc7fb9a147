use axum::{
    Json, Router,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    routing::get,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::AppState;
use super::error::{ApiError, ApiResult};
use crate::core::quote::Quote;

#[derive(Debug, Deserialize)]
struct FetchParams {
    moeda: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RegisterRequest {
    moeda: Option<Value>,
    valor: Option<Value>,
}

#[derive(Serialize)]
struct RegisterResponse {
    mensagem: &'static str,
    cotacao: Quote,
}

#[derive(Serialize)]
struct HistoryResponse {
    total: usize,
    cotacoes: Vec<Quote>,
}

/// Fetch the current BRL quote from the rate provider and record it.
async fn fetch_quote(
    State(service): State<AppState>,
    params: Result<Query<FetchParams>, QueryRejection>,
) -> ApiResult<Json<Quote>> {
    let Query(params) = params.map_err(|e| ApiError::InvalidInput(e.body_text()))?;
    let quote = service.fetch_quote(params.moeda.as_deref()).await?;
    Ok(Json(quote))
}

/// Record a manually supplied quote.
async fn register_quote(
    State(service): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<RegisterResponse>)> {
    let Json(request) = payload.map_err(|e| ApiError::InvalidInput(e.body_text()))?;
    let quote = service
        .register_quote(request.moeda.as_ref(), request.valor.as_ref())
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            mensagem: "Cotação registrada com sucesso",
            cotacao: quote,
        }),
    ))
}

/// List every recorded quote in insertion order.
async fn list_history(State(service): State<AppState>) -> Json<HistoryResponse> {
    let cotacoes = service.history().await;
    Json(HistoryResponse {
        total: cotacoes.len(),
        cotacoes,
    })
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/cotacao", get(fetch_quote).post(register_quote))
        .route("/historico", get(list_history))
}
