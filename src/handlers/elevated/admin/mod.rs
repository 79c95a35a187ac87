pub mod stats; // GET /api/admin/stats
pub mod users; // GET, PUT /api/admin/users

pub use stats::stats;
pub use users::{users_get, users_put};
