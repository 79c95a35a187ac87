use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum TradeStatus {
    Pending,
    Accepted,
    Approved,
    Declined,
    Cancelled,
    Rejected,
}

impl TradeStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            TradeStatus::Pending => "pending",
            TradeStatus::Accepted => "accepted",
            TradeStatus::Approved => "approved",
            TradeStatus::Declined => "declined",
            TradeStatus::Cancelled => "cancelled",
            TradeStatus::Rejected => "rejected",
        }
    }

    /// No further action is possible once a trade gets here
    pub fn is_final(self) -> bool {
        !matches!(self, TradeStatus::Pending | TradeStatus::Accepted)
    }
}

/// A player listed in a trade, joined with the current `Players` row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct TradeItem {
    pub id: i64,
    pub trade_id: String,
    pub player_id: String,
    pub from_team_id: String,
    pub player_name: Option<String>,
    pub position: Option<String>,
    pub nfl_team: Option<String>,
    pub current_owner_id: Option<String>,
}

impl TradeItem {
    pub const SELECT: &'static str = r#"
        SELECT i.id, i.trade_id, i.player_id, i.from_team_id,
               p.player_name, p.position, p.team_name AS nfl_team, p.owner_ID AS current_owner_id
        FROM TradeItems i
        LEFT JOIN Players p ON p.player_ID = i.player_id
    "#;
}

/// Row of `Trades` plus the names of both parties. `offered_players` come
/// from the proposer, `requested_players` from the recipient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Trade {
    pub id: String,
    pub proposer_user_id: String,
    pub proposer_team_id: String,
    pub recipient_user_id: String,
    pub recipient_team_id: String,
    pub status: TradeStatus,
    pub proposer_message: Option<String>,
    pub response_message: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub resolved_at: Option<String>,
    pub resolved_by_user_id: Option<String>,
    pub proposer_username: Option<String>,
    pub proposer_team_name: Option<String>,
    pub recipient_username: Option<String>,
    pub recipient_team_name: Option<String>,
    #[sqlx(skip)]
    #[serde(default)]
    pub offered_players: Vec<TradeItem>,
    #[sqlx(skip)]
    #[serde(default)]
    pub requested_players: Vec<TradeItem>,
}

impl Trade {
    pub const SELECT: &'static str = r#"
        SELECT t.id, t.proposer_user_id, t.proposer_team_id, t.recipient_user_id, t.recipient_team_id,
               t.status, t.proposer_message, t.response_message, t.created_at, t.updated_at,
               t.resolved_at, t.resolved_by_user_id,
               pu.username AS proposer_username, pu.team_name AS proposer_team_name,
               ru.username AS recipient_username, ru.team_name AS recipient_team_name
        FROM Trades t
        LEFT JOIN user pu ON pu.id = t.proposer_user_id
        LEFT JOIN user ru ON ru.id = t.recipient_user_id
    "#;

    /// Split joined items by the side that gives them up
    pub fn with_items(mut self, items: Vec<TradeItem>) -> Self {
        let (offered, requested): (Vec<TradeItem>, Vec<TradeItem>) = items
            .into_iter()
            .partition(|item| item.from_team_id == self.proposer_team_id);
        self.offered_players = offered;
        self.requested_players = requested;
        self
    }

    pub fn involves_team(&self, team: &str) -> bool {
        self.proposer_team_id == team || self.recipient_team_id == team
    }
}
