use axum::{
    extract::State,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use super::AppState;

/// `GET /api/cervejarias`: products grouped by brewery, or `{}` until the
/// first refresh lands.
pub(super) async fn list_breweries(State(state): State<AppState>) -> Response {
    let current = state.store.load();
    match &current.snapshot {
        Some(snapshot) => Json(&snapshot.breweries).into_response(),
        None => Json(json!({})).into_response(),
    }
}

/// `GET /api/produtos`: flat product list, or `{}` until the first refresh
/// lands. An empty menu after a refresh is `[]`.
pub(super) async fn list_products(State(state): State<AppState>) -> Response {
    let current = state.store.load();
    match &current.snapshot {
        Some(snapshot) => Json(&snapshot.products).into_response(),
        None => Json(json!({})).into_response(),
    }
}
