pub mod commands;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::config;
use crate::database::DatabaseManager;

#[derive(Parser)]
#[command(name = "pfl")]
#[command(about = "PFL maintenance CLI - schema and account upkeep for the league database")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[arg(long, global = true, help = "Database URL (defaults to DATABASE_URL / configuration)")]
    pub database_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Create tables and add columns")]
    Schema {
        #[command(subcommand)]
        cmd: commands::schema::SchemaCommands,
    },

    #[command(about = "Account maintenance: passwords and admin flags")]
    Users {
        #[command(subcommand)]
        cmd: commands::users::UserCommands,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

async fn open_pool(database_url: Option<&str>) -> anyhow::Result<SqlitePool> {
    let pool = match database_url {
        Some(url) => {
            let settings = &config::config().database;
            DatabaseManager::connect(url, settings.max_connections, settings.connection_timeout).await?
        }
        None => DatabaseManager::main_pool().await?,
    };
    Ok(pool)
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);
    let pool = open_pool(cli.database_url.as_deref()).await?;

    match cli.command {
        Commands::Schema { cmd } => commands::schema::handle(cmd, &pool, output_format).await,
        Commands::Users { cmd } => commands::users::handle(cmd, &pool, output_format).await,
    }
}
