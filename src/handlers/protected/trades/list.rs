// handlers/protected/trades/list.rs - GET /api/trades handler

use axum::extract::State;
use serde::{Deserialize, Serialize};

use crate::database::models::Trade;
use crate::error::ApiError;
use crate::handlers::required;
use crate::middleware::{ApiQuery, ApiResponse, ApiResult, AuthUser};
use crate::server::AppState;
use crate::services::{TradeScope, TradeService};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradesQuery {
    pub trade_id: Option<String>,
    pub team_id: Option<String>,
}

/// One trade when `tradeId` is given, otherwise a listing
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum TradesView {
    One(Trade),
    Many(Vec<Trade>),
}

/**
 * GET /api/trades - Trades visible to the caller
 *
 * Query: `teamId` (defaults to the caller's team; `all` for admins) and an
 * optional `tradeId`.
 *
 * Non-admins only see their own team. A single trade is visible to its two
 * parties and to admins.
 */
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
    ApiQuery(query): ApiQuery<TradesQuery>,
) -> ApiResult<TradesView> {
    let Some(team_id) = required(query.team_id).or_else(|| user.team.clone()) else {
        return Err(ApiError::bad_request("Team ID is required"));
    };

    let scope = if team_id == "all" {
        if !user.is_admin {
            return Err(ApiError::forbidden("Not authorized to view all trades"));
        }
        TradeScope::All
    } else {
        if !user.is_admin && user.team.as_deref() != Some(team_id.as_str()) {
            return Err(ApiError::forbidden("Not authorized to view trades for this team"));
        }
        TradeScope::Team(team_id)
    };

    let service = TradeService::new(state.pool.clone());

    if let Some(trade_id) = required(query.trade_id) {
        let trade = service
            .find(&trade_id)
            .await?
            .ok_or_else(|| ApiError::not_found("Trade not found"))?;
        let is_party = user.team.as_deref().is_some_and(|team| trade.involves_team(team));
        if !user.is_admin && !is_party {
            return Err(ApiError::forbidden("Not authorized to view this trade"));
        }
        return Ok(ApiResponse::ok(TradesView::One(trade)));
    }

    let trades = service.list(&scope).await?;
    let message = format!("Retrieved {} trades", trades.len());
    Ok(ApiResponse::ok(TradesView::Many(trades)).with_message(message))
}
