// handlers/public/auth/register.rs - POST /api/auth/register handler

use axum::extract::State;
use serde::Deserialize;

use super::AuthPayload;
use crate::auth::{self, Claims};
use crate::error::ApiError;
use crate::handlers::{required, secret};
use crate::middleware::{ApiJson, ApiResponse, ApiResult};
use crate::server::AppState;
use crate::services::{NewUser, UserService};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub username: Option<String>,
    pub password: Option<String>,
    pub team_id: Option<String>,
}

/// POST /api/auth/register - create a non-admin account and sign it in.
/// Responds 201 with the same `{user, token}` shape as login.
pub async fn register(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<RegisterRequest>,
) -> ApiResult<AuthPayload> {
    let (Some(username), Some(password)) = (required(payload.username), secret(payload.password)) else {
        return Err(ApiError::bad_request("Missing required fields: username, password"));
    };

    let user = UserService::new(state.pool.clone())
        .create(NewUser {
            username,
            password,
            team: required(payload.team_id),
            is_admin: false,
        })
        .await?;

    let token = auth::generate_jwt(&Claims::for_user(&user))?;
    tracing::info!("Registered user: {}", user.username);

    Ok(ApiResponse::created(AuthPayload { user, token }).with_message("Registration successful"))
}
