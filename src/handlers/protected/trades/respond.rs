// handlers/protected/trades/respond.rs - PATCH /api/trades handler

use axum::extract::State;
use serde::Deserialize;

use crate::database::models::Trade;
use crate::error::ApiError;
use crate::handlers::required;
use crate::middleware::{ApiJson, ApiResponse, ApiResult, AuthUser};
use crate::server::AppState;
use crate::services::{TradeAction, TradeActor, TradeService};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RespondTradeRequest {
    pub trade_id: Option<String>,
    pub action: Option<String>,
    pub message: Option<String>,
}

/// PATCH /api/trades - `{tradeId, action, message?}` where action is
/// accept / decline (recipient), cancel (proposer), approve / reject (admin).
pub async fn respond(
    State(state): State<AppState>,
    user: AuthUser,
    ApiJson(payload): ApiJson<RespondTradeRequest>,
) -> ApiResult<Trade> {
    let (Some(trade_id), Some(action)) = (required(payload.trade_id), required(payload.action)) else {
        return Err(ApiError::bad_request("tradeId and action are required"));
    };
    let action = TradeAction::parse(&action).ok_or_else(|| ApiError::bad_request("Invalid action"))?;
    if action.requires_admin() && !user.is_admin {
        return Err(ApiError::forbidden("Only admins can approve or reject trades"));
    }

    let actor = TradeActor {
        user_id: user.user_id,
        team: user.team.clone(),
        is_admin: user.is_admin,
    };
    let trade = TradeService::new(state.pool.clone())
        .respond(&trade_id, action, &actor, required(payload.message))
        .await?;

    let message = format!("Trade {}", trade.status.as_str());
    Ok(ApiResponse::ok(trade).with_message(message))
}
