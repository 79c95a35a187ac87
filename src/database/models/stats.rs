use serde::{Deserialize, Serialize};

/// League-wide counters for the admin dashboard
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemStats {
    pub total_users: i64,
    pub admin_users: i64,
    pub total_teams: i64,
    pub total_players: i64,
    pub free_agents: i64,
    pub total_games: i64,
    pub pending_trades: i64,
    pub total_weeks: i64,
}
