use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::guard::CurrentUser;
use crate::models::day_record::{DayRecord, HistoryQuery};
use crate::models::report::ProgressReport;
use crate::AppState;

const DEFAULT_HISTORY_DAYS: u32 = 7;

#[derive(Debug, Deserialize)]
pub struct RecalculateRequest {
    pub temperature_c: f64,
}

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub days: u32,
    pub records: Vec<DayRecord>,
}

pub async fn get_today(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<DayRecord>> {
    Ok(Json(state.registry.get_or_create_today(user.id).await?))
}

pub async fn get_progress(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<ProgressReport>> {
    Ok(Json(state.registry.progress(user.id).await?))
}

pub async fn recalculate_targets(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(body): Json<RecalculateRequest>,
) -> AppResult<Json<DayRecord>> {
    let record = state
        .registry
        .recalculate_targets(user.id, body.temperature_c)
        .await?;
    Ok(Json(record))
}

pub async fn get_history(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Query(query): Query<HistoryQuery>,
) -> AppResult<Json<HistoryResponse>> {
    let days = query.days.unwrap_or(DEFAULT_HISTORY_DAYS);
    let records = state.registry.summarize_range(user.id, days).await?;
    Ok(Json(HistoryResponse { days, records }))
}
