// handlers/protected/auth/update_profile.rs - PUT /api/auth/update-profile handler

use axum::extract::State;
use serde::Deserialize;

use crate::database::models::User;
use crate::error::ApiError;
use crate::handlers::required;
use crate::middleware::{ApiJson, ApiResponse, ApiResult, AuthUser};
use crate::server::AppState;
use crate::services::{ProfileUpdate, UserService};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub display_name: Option<String>,
    pub team_name: Option<String>,
    pub email: Option<String>,
}

/// PUT /api/auth/update-profile - edit the caller's own account.
/// `displayName` renames the login; the current token keeps the old name
/// until the next login.
pub async fn update_profile(
    State(state): State<AppState>,
    user: AuthUser,
    ApiJson(payload): ApiJson<UpdateProfileRequest>,
) -> ApiResult<User> {
    let update = ProfileUpdate {
        username: required(payload.display_name),
        team_name: required(payload.team_name),
        email: required(payload.email),
    };
    if update.is_empty() {
        return Err(ApiError::bad_request("At least one field is required"));
    }

    let account = UserService::new(state.pool.clone())
        .update_profile(user.user_id, update)
        .await?;

    Ok(ApiResponse::ok(account).with_message("Profile updated successfully"))
}
