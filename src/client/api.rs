use std::sync::{Arc, RwLock};

use reqwest::{Method, RequestBuilder};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{json, Value};

use crate::database::models::{Player, Standing, SystemStats, Trade, User};
use crate::middleware::{Envelope, Outcome};
use crate::services::league_service::PlayerFilter;
use crate::services::TradeAction;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Failure envelope from the server; displays as the server's message
    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("Unexpected response ({status}): {reason}")]
    Decode { status: u16, reason: String },
}

impl ClientError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Transport(e) => e.status().map(|s| s.as_u16()),
            ClientError::Api { status, .. } | ClientError::Decode { status, .. } => Some(*status),
        }
    }
}

/// Signed-in account and its token
#[derive(Debug, Clone, Deserialize)]
pub struct Session {
    pub user: User,
    pub token: String,
}

/// Body of a trade offer
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTrade {
    pub recipient_team_id: String,
    pub offered_player_ids: Vec<String>,
    pub requested_player_ids: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CurrentWeekBody {
    current_week: i64,
}

#[derive(Deserialize)]
struct CountBody {
    count: i64,
}

/// HTTP client for the league API. Clones share the session token.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Arc<RwLock<Option<String>>>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: Arc::new(RwLock::new(None)),
        }
    }

    pub fn token(&self) -> Option<String> {
        self.token.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn set_token(&self, token: impl Into<String>) {
        *self.token.write().unwrap_or_else(|e| e.into_inner()) = Some(token.into());
    }

    pub fn clear_token(&self) {
        *self.token.write().unwrap_or_else(|e| e.into_inner()) = None;
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.http.request(method, format!("{}{}", self.base_url, path));
        match self.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Send and unwrap the envelope: `data` on success, the server's
    /// `error` string otherwise
    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ClientError> {
        let response = builder.send().await?;
        let status = response.status().as_u16();
        let bytes = response.bytes().await?;

        let envelope: Envelope<T> = serde_json::from_slice(&bytes).map_err(|e| ClientError::Decode {
            status,
            reason: e.to_string(),
        })?;

        match envelope.into_outcome() {
            Outcome::Ok { data, .. } => Ok(data),
            Outcome::Err { error, .. } => {
                tracing::debug!("API error {}: {}", status, error);
                Err(ClientError::Api { status, message: error })
            }
        }
    }

    // Session

    pub async fn login(&self, username: &str, password: &str) -> Result<Session, ClientError> {
        let body = json!({"username": username, "password": password});
        let session: Session = self
            .send(self.request(Method::POST, "/api/auth/login").json(&body))
            .await?;
        self.set_token(session.token.clone());
        Ok(session)
    }

    pub async fn register(&self, username: &str, password: &str, team_id: Option<&str>) -> Result<Session, ClientError> {
        let body = json!({"username": username, "password": password, "teamId": team_id});
        let session: Session = self
            .send(self.request(Method::POST, "/api/auth/register").json(&body))
            .await?;
        self.set_token(session.token.clone());
        Ok(session)
    }

    /// Tokens are stateless, so logging out only forgets the local copy
    pub fn logout(&self) {
        self.clear_token();
    }

    pub async fn me(&self) -> Result<User, ClientError> {
        self.send(self.request(Method::GET, "/api/auth/me")).await
    }

    pub async fn change_password(&self, current: &str, new_password: &str) -> Result<(), ClientError> {
        let body = json!({"currentPassword": current, "newPassword": new_password});
        let _: Value = self
            .send(self.request(Method::PUT, "/api/auth/change-password").json(&body))
            .await?;
        Ok(())
    }

    pub async fn update_profile(
        &self,
        display_name: Option<&str>,
        team_name: Option<&str>,
        email: Option<&str>,
    ) -> Result<User, ClientError> {
        let body = json!({"displayName": display_name, "teamName": team_name, "email": email});
        self.send(self.request(Method::PUT, "/api/auth/update-profile").json(&body))
            .await
    }

    // League

    pub async fn standings(&self) -> Result<Vec<Standing>, ClientError> {
        self.send(self.request(Method::GET, "/api/standings")).await
    }

    pub async fn current_week(&self) -> Result<i64, ClientError> {
        let body: CurrentWeekBody = self.send(self.request(Method::GET, "/api/current-week")).await?;
        Ok(body.current_week)
    }

    pub async fn players(&self, filter: &PlayerFilter) -> Result<Vec<Player>, ClientError> {
        let mut params = Vec::new();
        if let Some(position) = &filter.position {
            params.push(("position", position.as_str()));
        }
        if let Some(team) = &filter.team {
            params.push(("team", team.as_str()));
        }
        self.send(self.request(Method::GET, "/api/players").query(&params)).await
    }

    pub async fn player_stats(&self, player_id: &str, week: i64) -> Result<Value, ClientError> {
        let week = week.to_string();
        self.send(
            self.request(Method::GET, "/api/player-stats")
                .query(&[("playerId", player_id), ("week", week.as_str())]),
        )
        .await
    }

    pub async fn trade_notifications(&self) -> Result<i64, ClientError> {
        let body: CountBody = self
            .send(self.request(Method::GET, "/api/trades/notifications"))
            .await?;
        Ok(body.count)
    }

    /// Trades of `team_id`, or of the caller's own team when `None`
    pub async fn trades(&self, team_id: Option<&str>) -> Result<Vec<Trade>, ClientError> {
        let mut builder = self.request(Method::GET, "/api/trades");
        if let Some(team_id) = team_id {
            builder = builder.query(&[("teamId", team_id)]);
        }
        self.send(builder).await
    }

    pub async fn trade(&self, trade_id: &str) -> Result<Trade, ClientError> {
        self.send(self.request(Method::GET, "/api/trades").query(&[("tradeId", trade_id)]))
            .await
    }

    pub async fn propose_trade(&self, offer: &NewTrade) -> Result<Trade, ClientError> {
        self.send(self.request(Method::POST, "/api/trades").json(offer)).await
    }

    pub async fn respond_to_trade(
        &self,
        trade_id: &str,
        action: TradeAction,
        message: Option<&str>,
    ) -> Result<Trade, ClientError> {
        let body = json!({"tradeId": trade_id, "action": action.as_str(), "message": message});
        self.send(self.request(Method::PATCH, "/api/trades").json(&body)).await
    }

    // Admin

    pub async fn admin_stats(&self) -> Result<SystemStats, ClientError> {
        self.send(self.request(Method::GET, "/api/admin/stats")).await
    }

    pub async fn admin_users(&self) -> Result<Vec<User>, ClientError> {
        self.send(self.request(Method::GET, "/api/admin/users")).await
    }

    pub async fn set_admin(&self, user_id: i64, is_admin: bool) -> Result<(), ClientError> {
        let body = json!({"userId": user_id, "isAdmin": is_admin});
        let _: Value = self
            .send(self.request(Method::PUT, "/api/admin/users").json(&body))
            .await?;
        Ok(())
    }
}
