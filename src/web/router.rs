//! API routes.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};

use crate::dispatch::Dispatcher;

/// Create the application router.
pub fn create_app_router(dispatcher: Arc<Dispatcher>) -> Router {
    Router::new()
        .route("/api/prices", get(get_prices))
        .route("/api/forecast", get(get_forecast))
        .with_state(dispatcher)
}

/// The cached price message; fetch failures surface as the same
/// unavailability string the chat sees.
async fn get_prices(State(dispatcher): State<Arc<Dispatcher>>) -> Json<Value> {
    let prices = dispatcher.cached_prices().await;
    Json(json!({ "prices": prices }))
}

async fn get_forecast(State(dispatcher): State<Arc<Dispatcher>>) -> Json<Value> {
    let forecast = dispatcher.market_prediction().await;
    Json(json!({ "forecast": forecast }))
}
