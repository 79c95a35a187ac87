// handlers/elevated/admin/stats.rs - GET /api/admin/stats handler

use axum::extract::State;

use crate::database::models::SystemStats;
use crate::middleware::{AdminUser, ApiResponse, ApiResult};
use crate::server::AppState;
use crate::services::AdminService;

/**
 * GET /api/admin/stats - League-wide record counts
 *
 * ```json
 * {
 *   "success": true,
 *   "data": { "totalUsers": 4, "adminUsers": 1, "totalTeams": 4, "totalPlayers": 5,
 *             "freeAgents": 4, "totalGames": 2, "pendingTrades": 3, "totalWeeks": 3 },
 *   "message": "System statistics retrieved successfully"
 * }
 * ```
 */
pub async fn stats(State(state): State<AppState>, AdminUser(admin): AdminUser) -> ApiResult<SystemStats> {
    tracing::debug!("System stats requested by {}", admin.username);
    let stats = AdminService::new(state.pool.clone()).system_stats().await?;
    Ok(ApiResponse::ok(stats).with_message("System statistics retrieved successfully"))
}
