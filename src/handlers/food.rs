use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::services::food::FoodLookupOutcome;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct FoodQuery {
    pub query: Option<String>,
}

pub async fn lookup_food(
    State(state): State<AppState>,
    Query(params): Query<FoodQuery>,
) -> AppResult<Json<FoodLookupOutcome>> {
    let query = params
        .query
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .ok_or_else(|| AppError::Validation("Food query cannot be empty".into()))?;

    let outcome = state.food.lookup(query).await;
    if let FoodLookupOutcome::NotFound { .. } = &outcome {
        tracing::info!(query = %query, "Food not found");
    }
    Ok(Json(outcome))
}
