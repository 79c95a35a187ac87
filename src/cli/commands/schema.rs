use clap::Subcommand;
use serde_json::json;
use sqlx::SqlitePool;

use crate::cli::utils::output_success;
use crate::cli::OutputFormat;
use crate::database::schema;

#[derive(Subcommand)]
pub enum SchemaCommands {
    #[command(about = "Create every league table that does not exist yet")]
    Init,

    #[command(about = "Add a column to a table; a no-op when it already exists")]
    AddColumn {
        #[arg(help = "Table name, e.g. Players")]
        table: String,
        #[arg(help = "Column name, e.g. injury_status")]
        column: String,
        #[arg(help = "Column type: TEXT, INTEGER, REAL, NUMERIC or BLOB")]
        column_type: String,
    },
}

pub async fn handle(cmd: SchemaCommands, pool: &SqlitePool, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        SchemaCommands::Init => {
            let tables = schema::init_schema(pool).await?;
            output_success(
                &output_format,
                &format!("Schema ready ({} tables)", tables.len()),
                Some(json!({ "tables": tables })),
            )
        }
        SchemaCommands::AddColumn {
            table,
            column,
            column_type,
        } => {
            let added = schema::add_column(pool, &table, &column, &column_type).await?;
            let message = if added {
                format!("Added column {}.{}", table, column)
            } else {
                format!("Column {}.{} already exists", table, column)
            };
            output_success(&output_format, &message, Some(json!({ "added": added })))
        }
    }
}
