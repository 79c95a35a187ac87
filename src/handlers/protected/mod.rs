// Tier 2: a valid token is required. Handlers take `AuthUser` as an
// extractor, so a missing or invalid credential never reaches the body.
pub mod auth;
pub mod league;
pub mod trades;
