// handlers/public/league/players.rs - GET /api/players handler

use axum::extract::State;
use serde::Deserialize;

use crate::database::models::Player;
use crate::handlers::required;
use crate::middleware::{ApiQuery, ApiResponse, ApiResult};
use crate::server::AppState;
use crate::services::{LeagueService, PlayerFilter};

#[derive(Debug, Default, Deserialize)]
pub struct PlayersQuery {
    pub position: Option<String>,
    pub team: Option<String>,
}

/// Free agents in draftable positions, optionally narrowed by
/// `?position=` and `?team=`
pub async fn players(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<PlayersQuery>,
) -> ApiResult<Vec<Player>> {
    let filter = PlayerFilter {
        position: required(query.position).map(|p| p.to_uppercase()),
        team: required(query.team),
    };

    let players = LeagueService::new(state.pool.clone()).available_players(&filter).await?;
    let message = format!("Retrieved {} available players", players.len());
    Ok(ApiResponse::ok(players).with_message(message))
}
