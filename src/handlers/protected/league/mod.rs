pub mod player_stats; // GET /api/player-stats

pub use player_stats::player_stats;
