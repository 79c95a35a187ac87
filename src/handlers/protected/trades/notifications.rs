// handlers/protected/trades/notifications.rs - GET /api/trades/notifications handler

use axum::extract::State;
use serde::Serialize;

use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::server::AppState;
use crate::services::TradeService;

#[derive(Debug, Serialize)]
pub struct TradeNotifications {
    pub count: i64,
}

/// Pending trades addressed to the caller's team. A caller without a team
/// has nothing pending.
pub async fn notifications(State(state): State<AppState>, user: AuthUser) -> ApiResult<TradeNotifications> {
    let count = match user.team.as_deref() {
        Some(team) => TradeService::new(state.pool.clone()).pending_count_for_team(team).await?,
        None => 0,
    };

    Ok(ApiResponse::ok(TradeNotifications { count }))
}

#[cfg(test)]
mod tests {
    use crate::testing;
    use axum::http::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn counts_pending_trades_for_the_callers_team() {
        let pool = testing::seeded_league().await;
        let token = testing::token_for(2, "bob", Some("2"), false);
        let (status, body) = testing::send(pool, testing::get("/api/trades/notifications", Some(&token))).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"success": true, "data": {"count": 2}}));
    }

    #[tokio::test]
    async fn teamless_caller_has_none() {
        let pool = testing::seeded_league().await;
        let token = testing::token_for(4, "dave", None, false);
        let (_, body) = testing::send(pool, testing::get("/api/trades/notifications", Some(&token))).await;
        assert_eq!(body["data"]["count"], 0);
    }

    #[tokio::test]
    async fn anonymous_caller_is_rejected() {
        let pool = testing::seeded_league().await;
        let (status, body) = testing::send(pool, testing::get("/api/trades/notifications", None)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(body.get("data").is_none());
    }
}
