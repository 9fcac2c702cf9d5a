mod bootstrap;
mod session;
mod session_helpers;

pub use bootstrap::bootstrap_handler;
pub use session::{logout_handler, me_handler};
pub use session_helpers::session_identity;

pub const SESSION_USER_KEY: &str = "clubdeck.identity";
/// Absolute session creation timestamp.
pub const SESSION_CREATED_AT_KEY: &str = "clubdeck.created_at";
