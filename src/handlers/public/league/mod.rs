pub mod current_week; // GET /api/current-week
pub mod players;      // GET /api/players
pub mod standings;    // GET /api/standings

pub use current_week::current_week;
pub use players::players;
pub use standings::standings;
