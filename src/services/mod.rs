pub mod admin_service;
pub mod league_service;
pub mod trade_service;
pub mod user_service;

pub use admin_service::AdminService;
pub use league_service::{CurrentWeek, LeagueService, PlayerFilter};
pub use trade_service::{TradeAction, TradeActor, TradeError, TradeProposal, TradeScope, TradeService};
pub use user_service::{NewUser, ProfileUpdate, UserError, UserService};
