// client/mod.rs - consumer-side data layer
//
// `ApiClient` speaks the envelope protocol and holds the session token.
// `Hook<T>` tracks `{data, loading, error}` for one resource, and `hooks`
// builds one per league resource.
pub mod api;
pub mod hook;
pub mod hooks;

pub use api::{ApiClient, ClientError, NewTrade, Session};
pub use hook::{Hook, HookState};
