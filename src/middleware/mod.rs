pub mod auth;
pub mod response;

pub use auth::{AdminUser, AuthUser};
pub use response::{ApiJson, ApiQuery, ApiResponse, ApiResult, Envelope, Outcome};
