// One hook per league resource

use serde_json::Value;

use super::{ApiClient, Hook};
use crate::database::models::{Player, Standing, SystemStats, Trade, User};
use crate::services::league_service::{PlayerFilter, DEFAULT_WEEK};

pub fn standings(client: &ApiClient) -> Hook<Vec<Standing>> {
    let client = client.clone();
    Hook::new(move || {
        let client = client.clone();
        async move { client.standings().await }
    })
}

/// Reads week 1 until the first fetch completes
pub fn current_week(client: &ApiClient) -> Hook<i64> {
    let client = client.clone();
    Hook::with_initial(DEFAULT_WEEK, move || {
        let client = client.clone();
        async move { client.current_week().await }
    })
}

pub fn trade_notifications(client: &ApiClient) -> Hook<i64> {
    let client = client.clone();
    Hook::new(move || {
        let client = client.clone();
        async move { client.trade_notifications().await }
    })
}

/// Trades on either side of the caller's team
pub fn trades(client: &ApiClient) -> Hook<Vec<Trade>> {
    let client = client.clone();
    Hook::new(move || {
        let client = client.clone();
        async move { client.trades(None).await }
    })
}

pub fn players(client: &ApiClient, filter: PlayerFilter) -> Hook<Vec<Player>> {
    let client = client.clone();
    Hook::new(move || {
        let client = client.clone();
        let filter = filter.clone();
        async move { client.players(&filter).await }
    })
}

pub fn player_stats(client: &ApiClient, player_id: impl Into<String>, week: i64) -> Hook<Value> {
    let client = client.clone();
    let player_id = player_id.into();
    Hook::new(move || {
        let client = client.clone();
        let player_id = player_id.clone();
        async move { client.player_stats(&player_id, week).await }
    })
}

pub fn admin_stats(client: &ApiClient) -> Hook<SystemStats> {
    let client = client.clone();
    Hook::new(move || {
        let client = client.clone();
        async move { client.admin_stats().await }
    })
}

pub fn current_user(client: &ApiClient) -> Hook<User> {
    let client = client.clone();
    Hook::new(move || {
        let client = client.clone();
        async move { client.me().await }
    })
}
