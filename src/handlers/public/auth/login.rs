// handlers/public/auth/login.rs - POST /api/auth/login handler

use axum::extract::State;
use serde::Deserialize;

use super::AuthPayload;
use crate::auth::{self, Claims};
use crate::error::ApiError;
use crate::handlers::{required, secret};
use crate::middleware::{ApiJson, ApiResponse, ApiResult};
use crate::server::AppState;
use crate::services::UserService;

#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

/**
 * POST /api/auth/login - Exchange credentials for a signed token
 *
 * Input:
 * ```json
 * { "username": "alice", "password": "secret" }
 * ```
 *
 * Output:
 * ```json
 * {
 *   "success": true,
 *   "data": { "user": { "id": 1, "username": "alice", "is_admin": true, ... }, "token": "eyJ..." },
 *   "message": "Login successful"
 * }
 * ```
 *
 * Missing fields are a 400, an unknown user or wrong password a 401. The two
 * 401 cases share one message so usernames cannot be enumerated.
 */
pub async fn login(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<LoginRequest>,
) -> ApiResult<AuthPayload> {
    let (Some(username), Some(password)) = (required(payload.username), secret(payload.password)) else {
        return Err(ApiError::bad_request("Missing required fields: username, password"));
    };

    let user = UserService::new(state.pool.clone())
        .authenticate(&username, &password)
        .await
        .map_err(|e| {
            tracing::info!("Login failed for '{}': {}", username, e);
            ApiError::from(e)
        })?;

    let token = auth::generate_jwt(&Claims::for_user(&user))?;
    tracing::info!("Login successful for user: {}", user.username);

    Ok(ApiResponse::ok(AuthPayload { user, token }).with_message("Login successful"))
}

#[cfg(test)]
mod tests {
    use crate::testing;
    use axum::http::{Method, StatusCode};
    use serde_json::json;

    #[tokio::test]
    async fn valid_credentials_return_user_and_token() {
        let pool = testing::seeded_league().await;
        let body = json!({"username": "alice", "password": testing::ALICE_PASSWORD});
        let (status, body) =
            testing::send(pool, testing::json_request(Method::POST, "/api/auth/login", None, body)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["message"], "Login successful");
        assert_eq!(body["data"]["user"]["username"], "alice");
        assert_eq!(body["data"]["user"]["is_admin"], true);
        assert!(body["data"]["user"].get("password").is_none());

        let token = body["data"]["token"].as_str().unwrap();
        let claims = crate::auth::validate_jwt(token).unwrap();
        assert_eq!(claims.username, "alice");
        assert!(claims.is_admin);
    }

    #[tokio::test]
    async fn wrong_password_is_unauthenticated() {
        let pool = testing::seeded_league().await;
        let body = json!({"username": "alice", "password": "not-it"});
        let (status, body) =
            testing::send(pool, testing::json_request(Method::POST, "/api/auth/login", None, body)).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, json!({"success": false, "error": "Invalid credentials"}));
    }

    #[tokio::test]
    async fn unknown_user_is_indistinguishable_from_wrong_password() {
        let pool = testing::seeded_league().await;
        let body = json!({"username": "zed", "password": "whatever"});
        let (status, body) =
            testing::send(pool, testing::json_request(Method::POST, "/api/auth/login", None, body)).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "Invalid credentials");
    }

    #[tokio::test]
    async fn missing_fields_are_rejected() {
        let pool = testing::seeded_league().await;
        let body = json!({"username": "alice"});
        let (status, body) =
            testing::send(pool, testing::json_request(Method::POST, "/api/auth/login", None, body)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Missing required fields: username, password");
    }

    #[tokio::test]
    async fn malformed_json_is_a_failure_envelope() {
        let pool = testing::seeded_league().await;
        let request = testing::raw_request(Method::POST, "/api/auth/login", "{not json");
        let (status, body) = testing::send(pool, request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert!(body["error"].is_string());
    }
}
