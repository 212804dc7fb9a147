use axum::{Json, Router, routing::get};
use serde::Serialize;
use serde_json::{Value, json};

use super::AppState;

#[derive(Serialize)]
struct StatusResponse {
    status: &'static str,
}

#[derive(Serialize)]
struct EndpointInfo {
    metodo: &'static str,
    path: &'static str,
    descricao: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    body: Option<Value>,
}

#[derive(Serialize)]
struct ServiceInfo {
    servico: &'static str,
    endpoints: Vec<EndpointInfo>,
}

/// Liveness check.
async fn status() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "Servidor funcionando corretamente!",
    })
}

/// Describes the available operations.
async fn service_info() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        servico: "API de Cotação de Moedas",
        endpoints: vec![
            EndpointInfo {
                metodo: "GET",
                path: "/cotacao",
                descricao: "Consulta cotação atual (parâmetro opcional: ?moeda=USD)",
                body: None,
            },
            EndpointInfo {
                metodo: "POST",
                path: "/cotacao",
                descricao: "Registra cotação manual",
                body: Some(json!({ "moeda": "USD", "valor": 5.25 })),
            },
            EndpointInfo {
                metodo: "GET",
                path: "/historico",
                descricao: "Lista todas as cotações registradas",
                body: None,
            },
            EndpointInfo {
                metodo: "GET",
                path: "/teste",
                descricao: "Verifica o status do servidor",
                body: None,
            },
        ],
    })
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(service_info))
        .route("/teste", get(status))
}
