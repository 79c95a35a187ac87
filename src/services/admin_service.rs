use serde_json::Value;
use sqlx::SqlitePool;

use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::models::player::FREE_AGENT_OWNER;
use crate::database::models::SystemStats;
use crate::database::query_builder::QueryBuilder;
use crate::database::models::TradeStatus;

#[derive(Clone)]
pub struct AdminService {
    pool: SqlitePool,
}

impl AdminService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// League-wide counters. Tables that do not exist count as empty.
    pub async fn system_stats(&self) -> Result<SystemStats, DatabaseError> {
        Ok(SystemStats {
            total_users: self.count("user", None).await?,
            admin_users: self.count("user", Some(("is_admin", Value::from(true)))).await?,
            total_teams: self.count("Standings", None).await?,
            total_players: self.count("Players", None).await?,
            free_agents: self.count("Players", Some(("owner_ID", Value::from(FREE_AGENT_OWNER)))).await?,
            total_games: self.count("Games", None).await?,
            pending_trades: self.count("Trades", Some(("status", Value::from(TradeStatus::Pending.as_str())))).await?,
            total_weeks: self.count("Weeks", None).await?,
        })
    }

    async fn count(&self, table: &str, filter: Option<(&str, Value)>) -> Result<i64, DatabaseError> {
        if !DatabaseManager::table_exists(&self.pool, table).await? {
            return Ok(0);
        }

        let mut builder: QueryBuilder = QueryBuilder::new(table)?;
        if let Some((column, value)) = filter {
            builder = builder.where_eq(column, value);
        }
        builder.count(&self.pool).await
    }
}
