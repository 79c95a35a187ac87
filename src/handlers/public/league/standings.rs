// handlers/public/league/standings.rs - GET /api/standings handler

use axum::extract::State;

use crate::database::models::Standing;
use crate::middleware::{ApiResponse, ApiResult};
use crate::server::AppState;
use crate::services::LeagueService;

/// League table ordered by wins, then points scored
pub async fn standings(State(state): State<AppState>) -> ApiResult<Vec<Standing>> {
    let standings = LeagueService::new(state.pool.clone()).standings().await?;
    let message = format!("Retrieved {} standings records", standings.len());
    tracing::debug!("{}", message);
    Ok(ApiResponse::ok(standings).with_message(message))
}

#[cfg(test)]
mod tests {
    use crate::testing;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn standings_are_public_and_ordered() {
        let pool = testing::seeded_league().await;
        let (status, body) = testing::send(pool, testing::get("/api/standings", None)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Retrieved 4 standings records");
        let ids: Vec<&str> = body["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|row| row["id"].as_str().unwrap())
            .collect();
        assert_eq!(ids, vec!["2", "1", "3", "4"]);
        assert_eq!(body["data"][0]["pointsFor"], 550.0);
    }

    #[tokio::test]
    async fn empty_table_is_an_empty_list() {
        let pool = testing::empty_league().await;
        let (status, body) = testing::send(pool, testing::get("/api/standings", None)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"], serde_json::json!([]));
        assert_eq!(body["message"], "Retrieved 0 standings records");
    }
}
