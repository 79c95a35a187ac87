// Development-only inspection routes
pub mod users; // GET /api/debug/users

pub use users::users;
