use sqlx::{Sqlite, SqlitePool, Transaction};
use tracing::info;

use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::models::{Trade, TradeItem, TradeStatus};

#[derive(Debug, thiserror::Error)]
pub enum TradeError {
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),
    #[error("Trade not found")]
    NotFound,
    #[error("Team {0} has no manager")]
    NoManager(String),
    #[error("{0}")]
    Invalid(String),
    #[error("{0}")]
    NotAllowed(String),
    #[error("{0}")]
    WrongState(String),
}

impl From<sqlx::Error> for TradeError {
    fn from(err: sqlx::Error) -> Self {
        TradeError::Database(DatabaseError::Sqlx(err))
    }
}

/// Which trades a listing covers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TradeScope {
    All,
    Team(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TradeAction {
    Accept,
    Decline,
    Cancel,
    Approve,
    Reject,
}

impl TradeAction {
    pub fn parse(action: &str) -> Option<Self> {
        match action {
            "accept" => Some(TradeAction::Accept),
            "decline" => Some(TradeAction::Decline),
            "cancel" => Some(TradeAction::Cancel),
            "approve" => Some(TradeAction::Approve),
            "reject" => Some(TradeAction::Reject),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TradeAction::Accept => "accept",
            TradeAction::Decline => "decline",
            TradeAction::Cancel => "cancel",
            TradeAction::Approve => "approve",
            TradeAction::Reject => "reject",
        }
    }

    pub fn requires_admin(self) -> bool {
        matches!(self, TradeAction::Approve | TradeAction::Reject)
    }

    /// Status the trade must be in, and the status it moves to
    fn transition(self) -> (TradeStatus, TradeStatus) {
        match self {
            TradeAction::Accept => (TradeStatus::Pending, TradeStatus::Accepted),
            TradeAction::Decline => (TradeStatus::Pending, TradeStatus::Declined),
            TradeAction::Cancel => (TradeStatus::Pending, TradeStatus::Cancelled),
            TradeAction::Approve => (TradeStatus::Accepted, TradeStatus::Approved),
            TradeAction::Reject => (TradeStatus::Accepted, TradeStatus::Rejected),
        }
    }
}

/// The caller acting on a trade
#[derive(Debug, Clone)]
pub struct TradeActor {
    pub user_id: i64,
    pub team: Option<String>,
    pub is_admin: bool,
}

#[derive(Debug, Clone)]
pub struct TradeProposal {
    pub proposer_user_id: i64,
    pub proposer_team_id: String,
    pub recipient_team_id: String,
    pub offered_player_ids: Vec<String>,
    pub requested_player_ids: Vec<String>,
    pub message: Option<String>,
}

#[derive(Clone)]
pub struct TradeService {
    pool: SqlitePool,
}

impl TradeService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Pending offers waiting on `team_id`. A league without a trades table
    /// has nothing pending.
    pub async fn pending_count_for_team(&self, team_id: &str) -> Result<i64, DatabaseError> {
        if !DatabaseManager::table_exists(&self.pool, "Trades").await? {
            return Ok(0);
        }

        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM Trades WHERE recipient_team_id = ? AND status = ?")
                .bind(team_id)
                .bind(TradeStatus::Pending.as_str())
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }

    /// Trades on either side of a team, newest first
    pub async fn list(&self, scope: &TradeScope) -> Result<Vec<Trade>, TradeError> {
        let trades = match scope {
            TradeScope::All => {
                let query = format!("{} ORDER BY t.created_at DESC, t.rowid DESC", Trade::SELECT);
                sqlx::query_as::<_, Trade>(&query).fetch_all(&self.pool).await?
            }
            TradeScope::Team(team) => {
                let query = format!(
                    "{} WHERE t.proposer_team_id = ? OR t.recipient_team_id = ? ORDER BY t.created_at DESC, t.rowid DESC",
                    Trade::SELECT
                );
                sqlx::query_as::<_, Trade>(&query)
                    .bind(team)
                    .bind(team)
                    .fetch_all(&self.pool)
                    .await?
            }
        };

        let mut detailed = Vec::with_capacity(trades.len());
        for trade in trades {
            let items = self.items(&trade.id).await?;
            detailed.push(trade.with_items(items));
        }
        Ok(detailed)
    }

    pub async fn find(&self, id: &str) -> Result<Option<Trade>, TradeError> {
        let query = format!("{} WHERE t.id = ?", Trade::SELECT);
        let Some(trade) = sqlx::query_as::<_, Trade>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
        else {
            return Ok(None);
        };
        let items = self.items(&trade.id).await?;
        Ok(Some(trade.with_items(items)))
    }

    async fn items(&self, trade_id: &str) -> Result<Vec<TradeItem>, TradeError> {
        let query = format!("{} WHERE i.trade_id = ? ORDER BY i.id", TradeItem::SELECT);
        Ok(sqlx::query_as::<_, TradeItem>(&query)
            .bind(trade_id)
            .fetch_all(&self.pool)
            .await?)
    }

    /// Record a new pending trade. Every offered player must be on the
    /// proposer's roster and every requested player on the recipient's.
    pub async fn propose(&self, proposal: TradeProposal) -> Result<Trade, TradeError> {
        if proposal.recipient_team_id == proposal.proposer_team_id {
            return Err(TradeError::Invalid("Cannot propose trade with your own team".into()));
        }
        if proposal.offered_player_ids.is_empty() && proposal.requested_player_ids.is_empty() {
            return Err(TradeError::Invalid("Select at least one player to include in the trade".into()));
        }

        let recipient_user_id: Option<(i64,)> =
            sqlx::query_as("SELECT id FROM user WHERE team = ? ORDER BY id LIMIT 1")
                .bind(&proposal.recipient_team_id)
                .fetch_optional(&self.pool)
                .await?;
        let Some((recipient_user_id,)) = recipient_user_id else {
            return Err(TradeError::NoManager(proposal.recipient_team_id));
        };

        let id = uuid::Uuid::new_v4().to_string();
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            "INSERT INTO Trades (id, proposer_user_id, proposer_team_id, recipient_user_id, recipient_team_id, status, proposer_message)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(proposal.proposer_user_id.to_string())
        .bind(&proposal.proposer_team_id)
        .bind(recipient_user_id.to_string())
        .bind(&proposal.recipient_team_id)
        .bind(TradeStatus::Pending.as_str())
        .bind(&proposal.message)
        .execute(&mut *tx)
        .await?;

        let sides = [
            (&proposal.offered_player_ids, &proposal.proposer_team_id, "your roster"),
            (&proposal.requested_player_ids, &proposal.recipient_team_id, "the recipient's roster"),
        ];
        for (player_ids, team, roster) in sides {
            for player_id in player_ids {
                let owned: Option<(String,)> =
                    sqlx::query_as("SELECT player_ID FROM Players WHERE player_ID = ? AND owner_ID = ?")
                        .bind(player_id)
                        .bind(team)
                        .fetch_optional(&mut *tx)
                        .await?;
                if owned.is_none() {
                    return Err(TradeError::Invalid(format!("Player {} is not on {}", player_id, roster)));
                }
                sqlx::query("INSERT INTO TradeItems (trade_id, player_id, from_team_id) VALUES (?, ?, ?)")
                    .bind(&id)
                    .bind(player_id)
                    .bind(team)
                    .execute(&mut *tx)
                    .await?;
            }
        }

        tx.commit().await?;
        info!(
            "Trade {} proposed: team {} -> team {}",
            id, proposal.proposer_team_id, proposal.recipient_team_id
        );

        self.find(&id).await?.ok_or(TradeError::NotFound)
    }

    /// Move a trade along its lifecycle on behalf of `actor`
    pub async fn respond(
        &self,
        trade_id: &str,
        action: TradeAction,
        actor: &TradeActor,
        message: Option<String>,
    ) -> Result<Trade, TradeError> {
        let trade = self.find(trade_id).await?.ok_or(TradeError::NotFound)?;
        authorize(&trade, action, actor)?;

        let (from, to) = action.transition();
        if trade.status != from {
            return Err(TradeError::WrongState(format!(
                "Trade is {}, expected {}",
                trade.status.as_str(),
                from.as_str()
            )));
        }

        let mut tx = self.pool.begin().await?;
        if action == TradeAction::Approve {
            move_players(&mut tx, &trade).await?;
        }

        let finished = to.is_final();
        let result = sqlx::query(
            "UPDATE Trades SET status = ?,
                 response_message = COALESCE(?, response_message),
                 updated_at = CURRENT_TIMESTAMP,
                 resolved_at = CASE WHEN ? THEN CURRENT_TIMESTAMP ELSE resolved_at END,
                 resolved_by_user_id = CASE WHEN ? THEN ? ELSE resolved_by_user_id END
             WHERE id = ? AND status = ?",
        )
        .bind(to.as_str())
        .bind(&message)
        .bind(finished)
        .bind(finished)
        .bind(actor.user_id.to_string())
        .bind(trade_id)
        .bind(from.as_str())
        .execute(&mut *tx)
        .await?;

        // Another response got there first
        if result.rows_affected() == 0 {
            return Err(TradeError::WrongState("Trade was updated by someone else".into()));
        }
        tx.commit().await?;

        info!("Trade {} {} by user {}", trade_id, to.as_str(), actor.user_id);
        self.find(trade_id).await?.ok_or(TradeError::NotFound)
    }
}

fn authorize(trade: &Trade, action: TradeAction, actor: &TradeActor) -> Result<(), TradeError> {
    let team = actor.team.as_deref();
    match action {
        TradeAction::Accept | TradeAction::Decline if team != Some(trade.recipient_team_id.as_str()) => Err(
            TradeError::NotAllowed("Only the recipient team can respond to this trade".into()),
        ),
        TradeAction::Cancel if team != Some(trade.proposer_team_id.as_str()) => Err(TradeError::NotAllowed(
            "Only the proposing team can cancel this trade".into(),
        )),
        TradeAction::Approve | TradeAction::Reject if !actor.is_admin => {
            Err(TradeError::NotAllowed("Only admins can approve or reject trades".into()))
        }
        _ => Ok(()),
    }
}

/// Each item leaves `from_team_id` for the other party. A player that has
/// since left the giving roster aborts the whole approval.
async fn move_players(tx: &mut Transaction<'_, Sqlite>, trade: &Trade) -> Result<(), TradeError> {
    let moves = trade
        .offered_players
        .iter()
        .map(|item| (item, &trade.recipient_team_id))
        .chain(trade.requested_players.iter().map(|item| (item, &trade.proposer_team_id)));

    for (item, to_team) in moves {
        let result = sqlx::query("UPDATE Players SET owner_ID = ? WHERE player_ID = ? AND owner_ID = ?")
            .bind(to_team)
            .bind(&item.player_id)
            .bind(&item.from_team_id)
            .execute(&mut **tx)
            .await?;
        if result.rows_affected() == 0 {
            return Err(TradeError::WrongState(format!(
                "Player {} is no longer on team {}",
                item.player_id, item.from_team_id
            )));
        }
    }
    Ok(())
}
