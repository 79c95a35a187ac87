// handlers/elevated/admin/users.rs - GET, PUT /api/admin/users handlers

use axum::extract::State;
use serde::{Deserialize, Serialize};

use crate::database::models::User;
use crate::error::ApiError;
use crate::middleware::{AdminUser, ApiJson, ApiResponse, ApiResult};
use crate::server::AppState;
use crate::services::UserService;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminUpdateRequest {
    pub user_id: Option<i64>,
    pub is_admin: Option<bool>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminUpdated {
    pub user_id: i64,
    pub is_admin: bool,
}

/// GET /api/admin/users - every account, password hashes withheld
pub async fn users_get(State(state): State<AppState>, _admin: AdminUser) -> ApiResult<Vec<User>> {
    let users = UserService::new(state.pool.clone()).list().await?;
    let message = format!("Retrieved {} users", users.len());
    Ok(ApiResponse::ok(users).with_message(message))
}

/// PUT /api/admin/users - grant or revoke admin on one account
pub async fn users_put(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    ApiJson(payload): ApiJson<AdminUpdateRequest>,
) -> ApiResult<AdminUpdated> {
    let (Some(user_id), Some(is_admin)) = (payload.user_id, payload.is_admin) else {
        return Err(ApiError::bad_request("Missing required fields: userId, isAdmin"));
    };

    UserService::new(state.pool.clone()).set_admin(user_id, is_admin).await?;
    tracing::info!(
        "Admin status of user {} set to {} by {}",
        user_id,
        is_admin,
        admin.username
    );

    Ok(ApiResponse::ok(AdminUpdated { user_id, is_admin }).with_message("User admin status updated successfully"))
}

#[cfg(test)]
mod tests {
    use crate::testing;
    use axum::http::{Method, StatusCode};
    use serde_json::json;

    fn alice() -> String {
        testing::token_for(1, "alice", Some("1"), true)
    }

    #[tokio::test]
    async fn lists_users_without_passwords() {
        let pool = testing::seeded_league().await;
        let (status, body) = testing::send(pool, testing::get("/api/admin/users", Some(&alice()))).await;

        assert_eq!(status, StatusCode::OK);
        let users = body["data"].as_array().unwrap();
        assert_eq!(users.len(), 4);
        assert!(users.iter().all(|u| u.get("password").is_none()));
    }

    #[tokio::test]
    async fn grants_admin() {
        let pool = testing::seeded_league().await;
        let body = json!({"userId": 2, "isAdmin": true});
        let (status, body) = testing::send(
            pool.clone(),
            testing::json_request(Method::PUT, "/api/admin/users", Some(&alice()), body),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"], json!({"userId": 2, "isAdmin": true}));

        let bob = crate::services::UserService::new(pool).find_by_id(2).await.unwrap().unwrap();
        assert!(bob.is_admin);
    }

    #[tokio::test]
    async fn unknown_user_is_not_found() {
        let pool = testing::seeded_league().await;
        let body = json!({"userId": 99, "isAdmin": true});
        let (status, _) = testing::send(
            pool,
            testing::json_request(Method::PUT, "/api/admin/users", Some(&alice()), body),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn members_cannot_promote_themselves() {
        let pool = testing::seeded_league().await;
        let token = testing::token_for(2, "bob", Some("2"), false);
        let body = json!({"userId": 2, "isAdmin": true});
        let (status, _) = testing::send(
            pool,
            testing::json_request(Method::PUT, "/api/admin/users", Some(&token), body),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }
}
