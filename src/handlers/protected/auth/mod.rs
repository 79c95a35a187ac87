pub mod change_password; // PUT /api/auth/change-password
pub mod me;              // GET /api/auth/me
pub mod update_profile;  // PUT /api/auth/update-profile

pub use change_password::change_password;
pub use me::me;
pub use update_profile::update_profile;
