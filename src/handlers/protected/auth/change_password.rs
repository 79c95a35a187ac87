// handlers/protected/auth/change_password.rs - PUT /api/auth/change-password handler

use axum::extract::State;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::handlers::secret;
use crate::middleware::{ApiJson, ApiResponse, ApiResult, AuthUser};
use crate::server::AppState;
use crate::services::UserService;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub current_password: Option<String>,
    pub new_password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PasswordChanged {
    pub updated: bool,
}

/**
 * PUT /api/auth/change-password - Rotate the caller's own password
 *
 * ```json
 * { "currentPassword": "old-secret", "newPassword": "new-secret" }
 * ```
 *
 * A wrong current password is a 401; a new password under six characters
 * is a 400.
 */
pub async fn change_password(
    State(state): State<AppState>,
    user: AuthUser,
    ApiJson(payload): ApiJson<ChangePasswordRequest>,
) -> ApiResult<PasswordChanged> {
    let (Some(current), Some(new_password)) = (secret(payload.current_password), secret(payload.new_password)) else {
        return Err(ApiError::bad_request("Missing required fields: currentPassword, newPassword"));
    };

    UserService::new(state.pool.clone())
        .change_password(user.user_id, &current, &new_password)
        .await
        .map_err(|e| match e {
            crate::services::UserError::InvalidCredentials => {
                ApiError::unauthorized("Current password is incorrect")
            }
            other => ApiError::from(other),
        })?;

    tracing::info!("Password changed for user: {}", user.username);
    Ok(ApiResponse::ok(PasswordChanged { updated: true }).with_message("Password updated successfully"))
}

#[cfg(test)]
mod tests {
    use crate::testing;
    use axum::http::{Method, StatusCode};
    use serde_json::json;

    #[tokio::test]
    async fn rotates_password() {
        let pool = testing::seeded_league().await;
        let token = testing::token_for(2, "bob", Some("2"), false);
        let body = json!({"currentPassword": testing::BOB_PASSWORD, "newPassword": "fresh-secret"});
        let (status, body) = testing::send(
            pool.clone(),
            testing::json_request(Method::PUT, "/api/auth/change-password", Some(&token), body),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["updated"], true);

        let login = json!({"username": "bob", "password": "fresh-secret"});
        let (status, _) =
            testing::send(pool, testing::json_request(Method::POST, "/api/auth/login", None, login)).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn padded_password_logs_in_verbatim() {
        let pool = testing::seeded_league().await;
        let token = testing::token_for(2, "bob", Some("2"), false);
        let body = json!({"currentPassword": testing::BOB_PASSWORD, "newPassword": " padded-secret "});
        let (status, _) = testing::send(
            pool.clone(),
            testing::json_request(Method::PUT, "/api/auth/change-password", Some(&token), body),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let login = json!({"username": "bob", "password": " padded-secret "});
        let (status, body) =
            testing::send(pool.clone(), testing::json_request(Method::POST, "/api/auth/login", None, login)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["user"]["username"], "bob");

        let trimmed = json!({"username": "bob", "password": "padded-secret"});
        let (status, _) =
            testing::send(pool, testing::json_request(Method::POST, "/api/auth/login", None, trimmed)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn wrong_current_password_is_unauthenticated() {
        let pool = testing::seeded_league().await;
        let token = testing::token_for(2, "bob", Some("2"), false);
        let body = json!({"currentPassword": "nope-nope", "newPassword": "fresh-secret"});
        let (status, body) = testing::send(
            pool,
            testing::json_request(Method::PUT, "/api/auth/change-password", Some(&token), body),
        )
        .await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "Current password is incorrect");
    }

    #[tokio::test]
    async fn short_new_password_is_rejected() {
        let pool = testing::seeded_league().await;
        let token = testing::token_for(2, "bob", Some("2"), false);
        let body = json!({"currentPassword": testing::BOB_PASSWORD, "newPassword": "abc"});
        let (status, _) = testing::send(
            pool,
            testing::json_request(Method::PUT, "/api/auth/change-password", Some(&token), body),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
