// handlers/public/league/current_week.rs - GET /api/current-week handler

use axum::extract::State;
use chrono::Utc;

use crate::middleware::{ApiResponse, ApiResult};
use crate::server::AppState;
use crate::services::league_service::WeekSource;
use crate::services::{CurrentWeek, LeagueService};

/**
 * GET /api/current-week - Week whose date range contains today (UTC)
 *
 * ```json
 * { "success": true, "data": { "currentWeek": 3 }, "message": "Current week is 3" }
 * ```
 *
 * Falls back to week 1 when the schedule table is missing or today is
 * before the season; after the season it stays on the last week.
 */
pub async fn current_week(State(state): State<AppState>) -> ApiResult<CurrentWeek> {
    let today = Utc::now().date_naive();
    let current = LeagueService::new(state.pool.clone()).current_week(today).await?;

    let message = match current.source {
        WeekSource::MissingTable => {
            tracing::warn!("Weeks table not found, using default week {}", current.current_week);
            format!("Weeks table not found, using default week {}", current.current_week)
        }
        WeekSource::Schedule => format!("Current week is {}", current.current_week),
    };

    Ok(ApiResponse::ok(current).with_message(message))
}
