mod catalog;
mod timestamps;

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderName, Method, Request},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::{request_id, RequestId, REQUEST_ID_HEADER};
use crate::refresh::SnapshotStore;

const WELCOME_MESSAGE: &str = "Welcome to the Cervejas e Produtos API!";

#[derive(Clone)]
pub struct AppState {
    pub store: SnapshotStore,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct Welcome {
    message: &'static str,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
    has_snapshot: bool,
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static(REQUEST_ID_HEADER),
        ])
}

fn request_span(req: &Request<Body>) -> tracing::Span {
    let request_id = req
        .extensions()
        .get::<RequestId>()
        .map_or("", |id| id.0.as_str());
    tracing::info_span!(
        "http",
        method = %req.method(),
        uri = %req.uri(),
        request_id,
    )
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(welcome))
        .route("/api/health", get(health))
        .route("/api/cervejarias", get(catalog::list_breweries))
        .route("/api/produtos", get(catalog::list_products))
        .route("/api/last_update", get(timestamps::last_update))
        .route("/api/last_modification", get(timestamps::last_modification))
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn(request_id))
                .layer(TraceLayer::new_for_http().make_span_with(request_span))
                .layer(build_cors()),
        )
        .with_state(state)
}

async fn welcome() -> Json<Welcome> {
    Json(Welcome {
        message: WELCOME_MESSAGE,
    })
}

async fn health(State(state): State<AppState>) -> Json<HealthData> {
    Json(HealthData {
        status: "ok",
        has_snapshot: state.store.load().snapshot.is_some(),
    })
}
