pub mod player;
pub mod standing;
pub mod stats;
pub mod trade;
pub mod user;
pub mod week;

pub use player::{Player, PlayerStats};
pub use standing::Standing;
pub use stats::SystemStats;
pub use trade::{Trade, TradeItem, TradeStatus};
pub use user::User;
pub use week::Week;
