// handlers/protected/trades/propose.rs - POST /api/trades handler

use axum::extract::State;
use serde::Deserialize;

use crate::database::models::Trade;
use crate::error::ApiError;
use crate::handlers::required;
use crate::middleware::{ApiJson, ApiResponse, ApiResult, AuthUser};
use crate::server::AppState;
use crate::services::{TradeProposal, TradeService};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposeTradeRequest {
    pub recipient_team_id: Option<String>,
    #[serde(default)]
    pub offered_player_ids: Vec<String>,
    #[serde(default)]
    pub requested_player_ids: Vec<String>,
    pub message: Option<String>,
}

/**
 * POST /api/trades - Offer a trade to another team
 *
 * Input:
 * ```json
 * { "recipientTeamId": "2", "offeredPlayerIds": ["p1"], "requestedPlayerIds": ["b7"], "message": "..." }
 * ```
 *
 * Responds 201 with the pending trade, players split into
 * `offeredPlayers` / `requestedPlayers`.
 */
pub async fn propose(
    State(state): State<AppState>,
    user: AuthUser,
    ApiJson(payload): ApiJson<ProposeTradeRequest>,
) -> ApiResult<Trade> {
    let Some(team) = user.team.clone() else {
        return Err(ApiError::bad_request("User is not associated with a team"));
    };
    let Some(recipient_team_id) = required(payload.recipient_team_id) else {
        return Err(ApiError::bad_request("Recipient team is required"));
    };

    let trade = TradeService::new(state.pool.clone())
        .propose(TradeProposal {
            proposer_user_id: user.user_id,
            proposer_team_id: team,
            recipient_team_id,
            offered_player_ids: payload.offered_player_ids,
            requested_player_ids: payload.requested_player_ids,
            message: required(payload.message),
        })
        .await?;

    Ok(ApiResponse::created(trade).with_message("Trade proposed"))
}
