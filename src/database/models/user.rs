use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Row of the `user` table. The password hash never leaves the server.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(skip_serializing, default)]
    pub password: String,
    pub email: Option<String>,
    pub team: Option<String>,
    pub team_name: Option<String>,
    pub owner_name: Option<String>,
    pub is_admin: bool,
    pub created_at: Option<String>,
}

impl User {
    pub const COLUMNS: &'static str =
        "id, username, password, email, team, team_name, owner_name, is_admin, created_at";
}
