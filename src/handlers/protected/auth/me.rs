// handlers/protected/auth/me.rs - GET /api/auth/me handler

use axum::extract::State;

use crate::database::models::User;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::server::AppState;
use crate::services::UserService;

/// Fresh account record for the token's subject. A valid token whose user
/// has since been deleted is a 404, not a 401.
pub async fn me(State(state): State<AppState>, user: AuthUser) -> ApiResult<User> {
    let account = UserService::new(state.pool.clone())
        .find_by_id(user.user_id)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    Ok(ApiResponse::ok(account))
}
