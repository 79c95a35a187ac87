#![allow(dead_code)]

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use pfl_api::database::{schema, DatabaseManager};
use pfl_api::server::{self, AppState};
use pfl_api::services::{NewUser, UserService};
use reqwest::StatusCode;
use sqlx::SqlitePool;

pub const ADMIN_PASSWORD: &str = "commish-pass";
pub const MEMBER_PASSWORD: &str = "member-pass";

pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    pub pool: SqlitePool,
}

impl TestServer {
    /// Serve `pool` in-process on a fresh port
    pub async fn spawn(pool: SqlitePool) -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
            .await
            .with_context(|| format!("failed to bind port {}", port))?;
        let app = server::app(AppState::new(pool.clone()));
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        let server = Self { port, base_url, pool };
        server.wait_ready(Duration::from_secs(5)).await?;
        Ok(server)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            if let Ok(resp) = client.get(self.url("/health")).send().await {
                if resp.status() == StatusCode::OK || resp.status() == StatusCode::SERVICE_UNAVAILABLE {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }
}

/// All tables, two accounts (commish: admin, team 1; member: team 2) and a
/// small season
pub async fn league() -> Result<SqlitePool> {
    let pool = DatabaseManager::memory_pool().await?;
    schema::init_schema(&pool).await?;

    let users = UserService::new(pool.clone());
    for (username, password, team, is_admin) in [
        ("commish", ADMIN_PASSWORD, "1", true),
        ("member", MEMBER_PASSWORD, "2", false),
    ] {
        users
            .create(NewUser {
                username: username.to_string(),
                password: password.to_string(),
                team: Some(team.to_string()),
                is_admin,
            })
            .await?;
    }

    for sql in [
        r#"INSERT INTO Standings (Team_ID, Division, Wins, Losses, Ties, PF, PA) VALUES
            ('1', 'A', 3, 1, 0, 410.0, 380.0),
            ('2', 'A', 3, 1, 0, 455.5, 390.0),
            ('3', 'B', 4, 0, 0, 300.0, 250.0)"#,
        r#"INSERT INTO Players (player_ID, player_name, position, team_name, owner_ID) VALUES
            ('q1', 'Rostered QB', 'QB', 'Chiefs', '1'),
            ('k1', 'Free Kicker', 'PK', 'Ravens', '99')"#,
        r#"INSERT INTO Trades (id, proposer_user_id, proposer_team_id, recipient_user_id, recipient_team_id, status) VALUES
            ('t1', '1', '1', '2', '2', 'pending')"#,
    ] {
        sqlx::query(sql).execute(&pool).await?;
    }
    Ok(pool)
}

pub async fn spawn_league() -> Result<TestServer> {
    TestServer::spawn(league().await?).await
}

/// Pull the bearer token out of a login response
pub async fn login(server: &TestServer, username: &str, password: &str) -> Result<String> {
    let body: serde_json::Value = reqwest::Client::new()
        .post(server.url("/api/auth/login"))
        .json(&serde_json::json!({"username": username, "password": password}))
        .send()
        .await?
        .json()
        .await?;
    body["data"]["token"]
        .as_str()
        .map(str::to_string)
        .with_context(|| format!("login failed: {}", body))
}
