pub mod list;          // GET /api/trades
pub mod notifications; // GET /api/trades/notifications
pub mod propose;       // POST /api/trades
pub mod respond;       // PATCH /api/trades

pub use list::list;
pub use notifications::notifications;
pub use propose::propose;
pub use respond::respond;
