// Shared fixtures for unit tests: in-memory league databases and tokens.

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use chrono::Utc;
use serde_json::Value;
use sqlx::SqlitePool;
use tower::ServiceExt;

use crate::auth::{self, password, Claims};
use crate::database::manager::DatabaseManager;
use crate::database::schema;
use crate::server::{self, AppState};

/// Plaintext passwords of the seeded accounts
pub const ALICE_PASSWORD: &str = "alicepass";
pub const BOB_PASSWORD: &str = "bobpass1";

pub async fn pool_with_tables(tables: &[&str]) -> SqlitePool {
    let pool = DatabaseManager::memory_pool().await.expect("memory pool");
    schema::init_tables(&pool, tables.iter().copied())
        .await
        .expect("create tables");
    pool
}

/// Every table, no rows
pub async fn empty_league() -> SqlitePool {
    let pool = DatabaseManager::memory_pool().await.expect("memory pool");
    schema::init_schema(&pool).await.expect("schema");
    pool
}

/// Four owners, four standings rows, a three-week schedule, a handful of
/// players and trades. alice (team 1) is the admin; dave has no team.
pub async fn seeded_league() -> SqlitePool {
    let pool = empty_league().await;

    let users = [
        ("alice", ALICE_PASSWORD, Some("1"), Some("Alice's Aces"), true),
        ("bob", BOB_PASSWORD, Some("2"), Some("Gridiron Gang"), false),
        ("carol", "carolpass", Some("3"), None, false),
        ("dave", "davepass", None, None, false),
    ];
    for (username, plain, team, team_name, is_admin) in users {
        sqlx::query("INSERT INTO user (username, password, team, team_name, is_admin) VALUES (?, ?, ?, ?, ?)")
            .bind(username)
            .bind(password::hash_password(plain).expect("hash"))
            .bind(team)
            .bind(team_name)
            .bind(is_admin)
            .execute(&pool)
            .await
            .expect("insert user");
    }

    let fixtures = [
        r#"INSERT INTO Standings (Team_ID, Division, Wins, Losses, Ties, PF, PA) VALUES
            ('1', 'B', 5, 2, 0, 600.5, 480.0),
            ('2', 'A', 6, 1, 0, 550.0, 470.25),
            ('3', 'A', 5, 2, 0, 500.0, 510.0),
            ('4', NULL, 2, 5, 0, 420.0, 560.0)"#,
        r#"INSERT INTO Weeks (week, start, "end") VALUES
            (1, '2025-09-04', '2025-09-10'),
            (2, '2025-09-11', '2025-09-17'),
            (3, '2025-09-18', '2025-09-24')"#,
        r#"INSERT INTO Players (player_ID, player_name, position, team_name, owner_ID, injury_status) VALUES
            ('p1', 'Starter QB', 'QB', 'Chiefs', '1', NULL),
            ('p2', 'Free Agent QB', 'QB', 'Bears', '99', NULL),
            ('p3', 'Free Agent RB', 'RB', 'Lions', '99', 'Questionable'),
            ('p4', 'Free Agent WR', 'WR', 'Bears', '99', NULL),
            ('p5', 'Free Agent LB', 'LB', 'Lions', '99', NULL)"#,
        r#"INSERT INTO player_stats (player_id, week, passing_yards, passing_tds, rushing_yards, rushing_tds,
                receptions, receiving_yards, receiving_tds, fantasy_points) VALUES
            ('p1', 1, 310, 3, 12, 0, 0, 0, 0, 25.6)"#,
        r#"INSERT INTO Games (week, home_team_id, away_team_id, home_score, away_score) VALUES
            (1, 17, 12, 24, 21),
            (1, 16, 15, 10, 27)"#,
        r#"INSERT INTO Trades (id, proposer_user_id, proposer_team_id, recipient_user_id, recipient_team_id, status) VALUES
            ('t1', '1', '1', '2', '2', 'pending'),
            ('t2', '3', '3', '2', '2', 'pending'),
            ('t3', '1', '1', '2', '2', 'accepted'),
            ('t4', '2', '2', '1', '1', 'pending')"#,
        r#"INSERT INTO TradeItems (trade_id, player_id, from_team_id) VALUES
            ('t1', 'p1', '1'),
            ('t3', 'p1', '1')"#,
    ];
    for sql in fixtures {
        sqlx::query(sql).execute(&pool).await.expect("insert fixture");
    }

    pool
}

/// Signed token for an arbitrary principal, valid for an hour
pub fn token_for(user_id: i64, username: &str, team: Option<&str>, is_admin: bool) -> String {
    let now = Utc::now().timestamp();
    let claims = Claims {
        sub: user_id,
        username: username.to_string(),
        team: team.map(str::to_string),
        team_name: None,
        is_admin,
        exp: now + 3600,
        iat: now,
    };
    auth::generate_jwt(&claims).expect("sign token")
}

/// Run one request through the full router over `pool`
pub async fn send(pool: SqlitePool, request: Request<Body>) -> (StatusCode, Value) {
    send_to(server::app(AppState::new(pool)), request).await
}

pub async fn send_to(router: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.oneshot(request).await.expect("router response");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("response body");
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    (status, body)
}

pub fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(Method::GET).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::empty()).expect("request")
}

pub fn json_request(method: Method, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::from(body.to_string())).expect("request")
}

/// JSON-typed request with an arbitrary, possibly malformed, body
pub fn raw_request(method: Method, uri: &str, body: &'static str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .expect("request")
}

/// Serve the router over `pool` on an ephemeral local port; returns the base URL
pub async fn spawn_server(pool: SqlitePool) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().expect("local addr");
    let app = server::app(AppState::new(pool));
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("test server");
    });
    format!("http://{}", addr)
}
