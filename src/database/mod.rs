pub mod manager;
pub mod models;
pub mod query_builder;
pub mod schema;

pub use manager::{DatabaseError, DatabaseManager};
