// Tier 3: admin token required. `AdminUser` rejects non-admins with 403
// before the handler body runs.
pub mod admin;
