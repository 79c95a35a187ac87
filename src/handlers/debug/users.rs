// handlers/debug/users.rs - GET /api/debug/users handler

use axum::extract::State;

use crate::database::models::User;
use crate::middleware::{ApiResponse, ApiResult};
use crate::server::AppState;
use crate::services::UserService;

/// Unauthenticated account dump. Only routed when debug routes are enabled,
/// which production never does.
pub async fn users(State(state): State<AppState>) -> ApiResult<Vec<User>> {
    let users = UserService::new(state.pool.clone()).list().await?;
    let message = format!("Found {} users", users.len());
    Ok(ApiResponse::ok(users).with_message(message))
}

#[cfg(test)]
mod tests {
    use crate::testing;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn dumps_accounts_in_development() {
        let pool = testing::seeded_league().await;
        let (status, body) = testing::send(pool, testing::get("/api/debug/users", None)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Found 4 users");
        assert!(body["data"][0].get("password").is_none());
    }
}
