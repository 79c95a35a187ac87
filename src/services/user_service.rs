use sqlx::SqlitePool;

use crate::auth::password::{self, PasswordError};
use crate::database::manager::DatabaseError;
use crate::database::models::User;

pub const MIN_PASSWORD_LENGTH: usize = 6;

#[derive(Debug, thiserror::Error)]
pub enum UserError {
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Username already exists")]
    UsernameTaken,
    #[error("User not found")]
    NotFound,
    #[error("Password must be at least 6 characters")]
    WeakPassword,
    #[error(transparent)]
    Password(#[from] PasswordError),
}

impl From<sqlx::Error> for UserError {
    fn from(err: sqlx::Error) -> Self {
        UserError::Database(DatabaseError::Sqlx(err))
    }
}

// A concurrent write can still claim the username after our lookup
fn write_error(err: sqlx::Error) -> UserError {
    match err {
        sqlx::Error::Database(ref db) if db.is_unique_violation() => UserError::UsernameTaken,
        other => UserError::from(other),
    }
}

/// Fields accepted when creating an account
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub team: Option<String>,
    pub is_admin: bool,
}

/// Self-service profile edits; `None` leaves a field untouched
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub username: Option<String>,
    pub team_name: Option<String>,
    pub email: Option<String>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self.username.is_none() && self.team_name.is_none() && self.email.is_none()
    }
}

/// Account lookups and credential checks against the `user` table
#[derive(Clone)]
pub struct UserService {
    pool: SqlitePool,
}

impl UserService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>, UserError> {
        let query = format!("SELECT {} FROM user WHERE username = ?", User::COLUMNS);
        let user = sqlx::query_as::<_, User>(&query)
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<User>, UserError> {
        let query = format!("SELECT {} FROM user WHERE id = ?", User::COLUMNS);
        let user = sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    pub async fn list(&self) -> Result<Vec<User>, UserError> {
        let query = format!("SELECT {} FROM user ORDER BY username", User::COLUMNS);
        let users = sqlx::query_as::<_, User>(&query).fetch_all(&self.pool).await?;
        Ok(users)
    }

    /// Verify a username/password pair. Unknown users and wrong passwords
    /// fail identically.
    pub async fn authenticate(&self, username: &str, candidate: &str) -> Result<User, UserError> {
        let user = self
            .find_by_username(username)
            .await?
            .ok_or(UserError::InvalidCredentials)?;

        if !password::verify_password(candidate, &user.password)? {
            return Err(UserError::InvalidCredentials);
        }
        Ok(user)
    }

    pub async fn create(&self, new_user: NewUser) -> Result<User, UserError> {
        if new_user.password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(UserError::WeakPassword);
        }
        if self.find_by_username(&new_user.username).await?.is_some() {
            return Err(UserError::UsernameTaken);
        }

        let hash = password::hash_password(&new_user.password)?;

        // team_name starts out as the username
        let result = sqlx::query(
            "INSERT INTO user (username, password, team, team_name, is_admin) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&new_user.username)
        .bind(&hash)
        .bind(&new_user.team)
        .bind(&new_user.username)
        .bind(new_user.is_admin)
        .execute(&self.pool)
        .await
        .map_err(write_error)?;

        self.find_by_id(result.last_insert_rowid())
            .await?
            .ok_or(UserError::NotFound)
    }

    pub async fn change_password(&self, id: i64, current: &str, new_password: &str) -> Result<(), UserError> {
        let user = self.find_by_id(id).await?.ok_or(UserError::NotFound)?;
        if !password::verify_password(current, &user.password)? {
            return Err(UserError::InvalidCredentials);
        }
        self.set_password(id, new_password).await
    }

    pub async fn set_password(&self, id: i64, new_password: &str) -> Result<(), UserError> {
        if new_password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(UserError::WeakPassword);
        }
        let hash = password::hash_password(new_password)?;
        let result = sqlx::query("UPDATE user SET password = ? WHERE id = ?")
            .bind(&hash)
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(UserError::NotFound);
        }
        Ok(())
    }

    pub async fn update_profile(&self, id: i64, update: ProfileUpdate) -> Result<User, UserError> {
        let fields = [
            ("username", update.username),
            ("team_name", update.team_name),
            ("email", update.email),
        ];
        let (columns, values): (Vec<&str>, Vec<String>) = fields
            .into_iter()
            .filter_map(|(column, value)| value.map(|v| (column, v)))
            .unzip();
        if columns.is_empty() {
            return self.find_by_id(id).await?.ok_or(UserError::NotFound);
        }

        let assignments = columns
            .iter()
            .map(|column| format!("{} = ?", column))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!("UPDATE user SET {} WHERE id = ?", assignments);
        let mut query = sqlx::query(&sql);
        for value in &values {
            query = query.bind(value.as_str());
        }
        let result = query.bind(id).execute(&self.pool).await.map_err(write_error)?;
        if result.rows_affected() == 0 {
            return Err(UserError::NotFound);
        }

        tracing::info!("Updated profile of user {}: {}", id, columns.join(", "));
        self.find_by_id(id).await?.ok_or(UserError::NotFound)
    }

    pub async fn set_admin(&self, id: i64, is_admin: bool) -> Result<(), UserError> {
        let result = sqlx::query("UPDATE user SET is_admin = ? WHERE id = ?")
            .bind(is_admin)
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(UserError::NotFound);
        }
        Ok(())
    }

    /// Replace every stored password that is not already an argon2 hash with
    /// its hash. Returns `(updated, total)`.
    pub async fn hash_plaintext_passwords(&self) -> Result<(usize, usize), UserError> {
        let rows: Vec<(i64, String, String)> = sqlx::query_as("SELECT id, username, password FROM user")
            .fetch_all(&self.pool)
            .await?;

        let total = rows.len();
        let mut updated = 0;
        for (id, username, stored) in rows {
            if password::is_hashed(&stored) {
                tracing::debug!("Skipping already hashed password for {}", username);
                continue;
            }
            let hash = password::hash_password(&stored)?;
            sqlx::query("UPDATE user SET password = ? WHERE id = ?")
                .bind(&hash)
                .bind(id)
                .execute(&self.pool)
                .await?;
            tracing::info!("Hashed password for user: {}", username);
            updated += 1;
        }
        Ok((updated, total))
    }
}
