use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Owner id marking a player as a free agent
pub const FREE_AGENT_OWNER: &str = "99";

/// Positions a team may roster
pub const DRAFTABLE_POSITIONS: &[&str] = &["QB", "RB", "WR", "TE", "PK", "DEF"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Player {
    #[sqlx(rename = "player_ID")]
    pub id: String,
    #[sqlx(rename = "player_name")]
    pub name: String,
    pub position: String,
    #[sqlx(rename = "team_name")]
    pub team: Option<String>,
    #[serde(rename = "owner_ID")]
    #[sqlx(rename = "owner_ID")]
    pub owner_id: String,
    pub injury_status: Option<String>,
}

impl Player {
    pub fn is_free_agent(&self) -> bool {
        self.owner_id == FREE_AGENT_OWNER
    }
}

/// Offensive box score for one player in one week
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStats {
    pub week: i64,
    pub passing_yards: i64,
    pub passing_tds: i64,
    pub rushing_yards: i64,
    pub rushing_tds: i64,
    pub receptions: i64,
    pub receiving_yards: i64,
    pub receiving_tds: i64,
    pub fantasy_points: f64,
}
