use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::AppState;

pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "hydrate-api",
        "version": env!("CARGO_PKG_VERSION"),
        "profiles": state.registry.len(),
    }))
}
