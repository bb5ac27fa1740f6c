use axum::{extract::State, Json};
use chrono::{DateTime, FixedOffset};
use serde::Serialize;

use super::AppState;

#[derive(Debug, Serialize)]
pub(super) struct LastUpdate {
    last_update: Option<DateTime<FixedOffset>>,
}

#[derive(Debug, Serialize)]
pub(super) struct LastModification {
    last_modification: Option<DateTime<FixedOffset>>,
}

pub(super) async fn last_update(State(state): State<AppState>) -> Json<LastUpdate> {
    Json(LastUpdate {
        last_update: state.store.load().timestamps.last_update_at,
    })
}

pub(super) async fn last_modification(State(state): State<AppState>) -> Json<LastModification> {
    Json(LastModification {
        last_modification: state.store.load().timestamps.last_modification_at,
    })
}
