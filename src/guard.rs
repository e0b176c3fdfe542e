use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use crate::error::AppError;
use crate::models::profile::UserId;
use crate::AppState;

pub const USER_ID_HEADER: &str = "x-user-id";

#[derive(Debug, Clone, Copy)]
pub struct CurrentUser {
    pub id: UserId,
}

fn user_id_from(headers: &HeaderMap) -> Result<UserId, AppError> {
    let raw = headers
        .get(USER_ID_HEADER)
        .ok_or_else(|| AppError::BadRequest("Missing X-User-Id header".into()))?;

    raw.to_str()
        .ok()
        .and_then(|v| v.trim().parse::<UserId>().ok())
        .ok_or_else(|| AppError::BadRequest("X-User-Id must be an integer".into()))
}

/// Identifies the caller from `X-User-Id`. There is no authentication.
pub async fn require_user(mut req: Request, next: Next) -> Result<Response, AppError> {
    let id = user_id_from(req.headers())?;
    tracing::debug!(user_id = id, path = %req.uri().path(), "Request");
    req.extensions_mut().insert(CurrentUser { id });
    Ok(next.run(req).await)
}

/// Rejects callers that have not set up a profile yet.
/// Must run after [`require_user`].
pub async fn require_profile(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let user = req
        .extensions()
        .get::<CurrentUser>()
        .copied()
        .ok_or_else(|| AppError::BadRequest("Missing X-User-Id header".into()))?;

    if !state.registry.contains(user.id) {
        tracing::debug!(user_id = user.id, "No profile yet");
        return Err(AppError::NotFound(
            "Profile not found, complete your profile first".into(),
        ));
    }

    Ok(next.run(req).await)
}
