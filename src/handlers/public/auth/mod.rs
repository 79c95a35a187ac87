// Token acquisition endpoints

use serde::Serialize;

use crate::database::models::User;

pub mod login;    // POST /api/auth/login
pub mod register; // POST /api/auth/register

pub use login::login;
pub use register::register;

/// Response body shared by login and registration
#[derive(Debug, Serialize)]
pub struct AuthPayload {
    pub user: User,
    pub token: String,
}
