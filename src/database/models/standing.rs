use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Standing {
    pub id: String,
    pub team_name: Option<String>,
    pub team_field: Option<String>,
    pub division: String,
    pub wins: i64,
    pub losses: i64,
    pub ties: i64,
    pub points_for: f64,
    pub points_against: f64,
    /// Mirrors `wins`, not a positional rank.
    pub rank: i64,
}
