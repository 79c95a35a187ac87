// Development/test bootstrap for the league tables. Production schemas are
// managed outside this crate; every statement here is IF NOT EXISTS.

use sqlx::SqlitePool;
use tracing::info;

use super::manager::{DatabaseError, DatabaseManager};

/// Storage classes accepted by `add_column`
pub const COLUMN_TYPES: &[&str] = &["TEXT", "INTEGER", "REAL", "NUMERIC", "BLOB"];

pub const USER_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS user (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        username TEXT NOT NULL UNIQUE,
        password TEXT NOT NULL,
        email TEXT,
        team TEXT,
        team_name TEXT,
        owner_name TEXT,
        is_admin INTEGER NOT NULL DEFAULT 0,
        created_at TEXT DEFAULT CURRENT_TIMESTAMP
    )
"#;

pub const STANDINGS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS Standings (
        Team_ID TEXT PRIMARY KEY,
        Division TEXT,
        Wins INTEGER DEFAULT 0,
        Losses INTEGER DEFAULT 0,
        Ties INTEGER DEFAULT 0,
        PF REAL DEFAULT 0,
        PA REAL DEFAULT 0
    )
"#;

pub const WEEKS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS Weeks (
        week INTEGER PRIMARY KEY,
        start TEXT NOT NULL,
        "end" TEXT NOT NULL
    )
"#;

pub const PLAYERS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS Players (
        player_ID TEXT PRIMARY KEY,
        player_name TEXT NOT NULL,
        position TEXT NOT NULL,
        team_name TEXT,
        owner_ID TEXT NOT NULL DEFAULT '99',
        injury_status TEXT
    )
"#;

pub const PLAYER_STATS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS player_stats (
        player_id TEXT NOT NULL,
        week INTEGER NOT NULL,
        passing_yards INTEGER DEFAULT 0,
        passing_tds INTEGER DEFAULT 0,
        rushing_yards INTEGER DEFAULT 0,
        rushing_tds INTEGER DEFAULT 0,
        receptions INTEGER DEFAULT 0,
        receiving_yards INTEGER DEFAULT 0,
        receiving_tds INTEGER DEFAULT 0,
        fantasy_points REAL DEFAULT 0,
        PRIMARY KEY (player_id, week)
    )
"#;

pub const GAMES_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS Games (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        week INTEGER NOT NULL,
        home_team_id INTEGER NOT NULL,
        away_team_id INTEGER NOT NULL,
        home_score INTEGER,
        away_score INTEGER
    )
"#;

pub const TRADES_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS Trades (
        id TEXT PRIMARY KEY,
        proposer_user_id TEXT NOT NULL,
        proposer_team_id TEXT NOT NULL,
        recipient_user_id TEXT NOT NULL,
        recipient_team_id TEXT NOT NULL,
        status TEXT NOT NULL DEFAULT 'pending',
        proposer_message TEXT,
        response_message TEXT,
        created_at TEXT DEFAULT CURRENT_TIMESTAMP,
        updated_at TEXT DEFAULT CURRENT_TIMESTAMP,
        resolved_at TEXT,
        resolved_by_user_id TEXT
    )
"#;

pub const TRADE_ITEMS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS TradeItems (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        trade_id TEXT NOT NULL,
        player_id TEXT NOT NULL,
        from_team_id TEXT NOT NULL,
        created_at TEXT DEFAULT CURRENT_TIMESTAMP,
        FOREIGN KEY(trade_id) REFERENCES Trades(id)
    )
"#;

const INDEXES: &[(&str, &str)] = &[
    ("Trades", "CREATE INDEX IF NOT EXISTS idx_trades_status ON Trades(status)"),
    ("TradeItems", "CREATE INDEX IF NOT EXISTS idx_trade_items_trade_id ON TradeItems(trade_id)"),
];

/// Tables in creation order, paired with their names for reporting
pub const TABLES: &[(&str, &str)] = &[
    ("user", USER_TABLE),
    ("Standings", STANDINGS_TABLE),
    ("Weeks", WEEKS_TABLE),
    ("Players", PLAYERS_TABLE),
    ("player_stats", PLAYER_STATS_TABLE),
    ("Games", GAMES_TABLE),
    ("Trades", TRADES_TABLE),
    ("TradeItems", TRADE_ITEMS_TABLE),
];

/// Create every league table that does not exist yet
pub async fn init_schema(pool: &SqlitePool) -> Result<Vec<&'static str>, DatabaseError> {
    init_tables(pool, TABLES.iter().map(|(name, _)| *name)).await
}

/// Create a subset of the league tables by name
pub async fn init_tables<'a>(
    pool: &SqlitePool,
    names: impl IntoIterator<Item = &'a str>,
) -> Result<Vec<&'static str>, DatabaseError> {
    let mut created = Vec::new();
    for name in names {
        let (table, ddl) = TABLES
            .iter()
            .find(|(table, _)| *table == name)
            .ok_or_else(|| DatabaseError::NotFound(format!("table definition '{}'", name)))?;
        sqlx::query(ddl).execute(pool).await?;
        for (_, index) in INDEXES.iter().filter(|(owner, _)| owner == table) {
            sqlx::query(index).execute(pool).await?;
        }
        created.push(*table);
    }
    info!("Schema ready: {}", created.join(", "));
    Ok(created)
}

/// Add `column` to an existing table unless it is already there. Returns
/// whether the column was added.
pub async fn add_column(
    pool: &SqlitePool,
    table: &str,
    column: &str,
    column_type: &str,
) -> Result<bool, DatabaseError> {
    if !DatabaseManager::is_valid_identifier(column) {
        return Err(DatabaseError::InvalidIdentifier(column.to_string()));
    }
    let column_type = column_type.to_ascii_uppercase();
    if !COLUMN_TYPES.contains(&column_type.as_str()) {
        return Err(DatabaseError::QueryError(format!("Unsupported column type: {}", column_type)));
    }
    if !DatabaseManager::table_exists(pool, table).await? {
        return Err(DatabaseError::NotFound(format!("Table '{}'", table)));
    }
    if DatabaseManager::column_exists(pool, table, column).await? {
        info!("Column {}.{} already exists", table, column);
        return Ok(false);
    }

    let ddl = format!(
        "ALTER TABLE {} ADD COLUMN {} {}",
        DatabaseManager::quote_identifier(table),
        DatabaseManager::quote_identifier(column),
        column_type
    );
    sqlx::query(&ddl).execute(pool).await?;
    info!("Added column {}.{} ({})", table, column, column_type);
    Ok(true)
}
