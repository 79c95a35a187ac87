use anyhow::Context;
use clap::Subcommand;
use serde_json::json;
use sqlx::SqlitePool;

use crate::cli::utils::output_success;
use crate::cli::OutputFormat;
use crate::database::models::User;
use crate::services::{NewUser, UserService};

#[derive(Subcommand)]
pub enum UserCommands {
    #[command(about = "Hash every stored password that is still plaintext")]
    HashPasswords,

    #[command(about = "Reset a user's password")]
    SetPassword { username: String, password: String },

    #[command(about = "Grant admin privileges (or revoke with --revoke)")]
    SetAdmin {
        username: String,
        #[arg(long, help = "Remove admin privileges instead")]
        revoke: bool,
    },

    #[command(about = "Create an account")]
    Create {
        username: String,
        password: String,
        #[arg(long, help = "Team id owned by this account")]
        team: Option<String>,
        #[arg(long, help = "Create as league admin")]
        admin: bool,
    },
}

pub async fn handle(cmd: UserCommands, pool: &SqlitePool, output_format: OutputFormat) -> anyhow::Result<()> {
    let users = UserService::new(pool.clone());

    match cmd {
        UserCommands::HashPasswords => {
            let (updated, total) = users.hash_plaintext_passwords().await?;
            output_success(
                &output_format,
                &format!("Hashed {} of {} passwords", updated, total),
                Some(json!({ "updated": updated, "total": total })),
            )
        }
        UserCommands::SetPassword { username, password } => {
            let user = find_user(&users, &username).await?;
            users.set_password(user.id, &password).await?;
            output_success(&output_format, &format!("Password updated for {}", username), None)
        }
        UserCommands::SetAdmin { username, revoke } => {
            let user = find_user(&users, &username).await?;
            users.set_admin(user.id, !revoke).await?;
            let message = if revoke {
                format!("Revoked admin from {}", username)
            } else {
                format!("Granted admin to {}", username)
            };
            output_success(&output_format, &message, Some(json!({ "isAdmin": !revoke })))
        }
        UserCommands::Create {
            username,
            password,
            team,
            admin,
        } => {
            let user = users
                .create(NewUser {
                    username,
                    password,
                    team,
                    is_admin: admin,
                })
                .await?;
            output_success(
                &output_format,
                &format!("Created user {} (id {})", user.username, user.id),
                Some(json!({ "user": user })),
            )
        }
    }
}

async fn find_user(users: &UserService, username: &str) -> anyhow::Result<User> {
    users
        .find_by_username(username)
        .await?
        .with_context(|| format!("User '{}' not found", username))
}
