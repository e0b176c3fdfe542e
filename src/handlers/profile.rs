use axum::{extract::State, Extension, Json};
use serde::Serialize;
use validator::Validate;

use crate::error::AppResult;
use crate::guard::CurrentUser;
use crate::models::day_record::DayRecord;
use crate::models::profile::{ProfileView, UpsertProfileRequest};
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct ProfileSetupResponse {
    pub profile: ProfileView,
    pub today: DayRecord,
}

pub async fn upsert_profile(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(body): Json<UpsertProfileRequest>,
) -> AppResult<Json<ProfileSetupResponse>> {
    body.validate()?;

    let (profile, today) = state.registry.register(user.id, body.into_metrics()).await?;

    Ok(Json(ProfileSetupResponse { profile, today }))
}

pub async fn get_profile(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<ProfileView>> {
    Ok(Json(state.registry.profile(user.id).await?))
}
