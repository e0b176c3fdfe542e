use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::guard;
use crate::handlers;
use crate::AppState;

pub fn build_router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route(
            "/api/workouts/types",
            get(handlers::logs::list_workout_types),
        );

    // Profile setup is the only user route that works before a profile exists
    let profile_routes = Router::new().route(
        "/api/profile",
        get(handlers::profile::get_profile).put(handlers::profile::upsert_profile),
    );

    let tracked_routes = Router::new()
        .route("/api/today", get(handlers::days::get_today))
        .route("/api/water", post(handlers::logs::log_water))
        .route("/api/meals", post(handlers::logs::log_meal))
        .route("/api/workouts", post(handlers::logs::log_workout))
        .route("/api/food", get(handlers::food::lookup_food))
        .route("/api/progress", get(handlers::days::get_progress))
        .route(
            "/api/targets/recalculate",
            post(handlers::days::recalculate_targets),
        )
        .route("/api/history", get(handlers::days::get_history))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            guard::require_profile,
        ));

    let user_routes = Router::new()
        .merge(profile_routes)
        .merge(tracked_routes)
        .layer(middleware::from_fn(guard::require_user));

    Router::new()
        .merge(public_routes)
        .merge(user_routes)
        .with_state(state)
}
