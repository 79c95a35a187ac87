// Tier 1: no authentication. Token acquisition and read-only league data.
pub mod auth;
pub mod league;
