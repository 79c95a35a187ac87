// handlers/protected/league/player_stats.rs - GET /api/player-stats handler

use axum::extract::State;
use serde::Deserialize;

use crate::error::ApiError;
use crate::handlers::required;
use crate::middleware::{ApiQuery, ApiResponse, ApiResult, AuthUser};
use crate::server::AppState;
use crate::services::league_service::PlayerStatsReport;
use crate::services::LeagueService;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStatsQuery {
    pub player_id: Option<String>,
    pub week: Option<String>,
}

/// GET /api/player-stats?playerId=..&week=.. - one player's box score for a week
pub async fn player_stats(
    State(state): State<AppState>,
    _user: AuthUser,
    ApiQuery(query): ApiQuery<PlayerStatsQuery>,
) -> ApiResult<PlayerStatsReport> {
    let (Some(player_id), Some(week)) = (required(query.player_id), required(query.week)) else {
        return Err(ApiError::bad_request("Missing required parameters: playerId, week"));
    };
    let week: i64 = week
        .parse()
        .map_err(|_| ApiError::bad_request("Week must be a number"))?;

    let report = LeagueService::new(state.pool.clone())
        .player_stats(&player_id, week)
        .await?;

    Ok(ApiResponse::ok(report))
}
