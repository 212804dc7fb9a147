pub mod error;
mod info;
mod quotes;

use axum::Router;
use std::sync::Arc;
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

use crate::service::QuoteService;

pub type AppState = Arc<QuoteService>;

pub fn app_router(state: AppState) -> Router {
    Router::new()
        .merge(info::router())
        .merge(quotes::router())
        .layer(CatchPanicLayer::custom(error::handle_panic))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
