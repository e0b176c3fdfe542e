use axum::{extract::State, Extension, Json};
use serde::Serialize;
use validator::Validate;

use crate::error::AppResult;
use crate::guard::CurrentUser;
use crate::models::day_record::{
    LogMealRequest, LogWaterRequest, LogWorkoutRequest, MealEntry, WorkoutLogged,
};
use crate::models::report::{DayTotals, Logged};
use crate::models::workout::WorkoutType;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct WorkoutRate {
    pub workout_type: WorkoutType,
    pub calories_per_minute: u32,
}

pub async fn log_water(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(body): Json<LogWaterRequest>,
) -> AppResult<Json<DayTotals>> {
    let totals = state.registry.log_water(user.id, body.amount_ml).await?;
    Ok(Json(totals))
}

pub async fn log_meal(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(body): Json<LogMealRequest>,
) -> AppResult<Json<Logged<MealEntry>>> {
    body.validate()?;

    let logged = state
        .registry
        .log_meal(user.id, &body.name, body.weight_grams, body.calories_per_100g)
        .await?;
    Ok(Json(logged))
}

pub async fn log_workout(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(body): Json<LogWorkoutRequest>,
) -> AppResult<Json<Logged<WorkoutLogged>>> {
    let logged = state
        .registry
        .log_workout(user.id, &body.workout_type, body.duration_minutes)
        .await?;
    Ok(Json(logged))
}

pub async fn list_workout_types() -> Json<Vec<WorkoutRate>> {
    Json(
        WorkoutType::ALL
            .into_iter()
            .map(|t| WorkoutRate {
                workout_type: t,
                calories_per_minute: t.calories_per_minute(),
            })
            .collect(),
    )
}
