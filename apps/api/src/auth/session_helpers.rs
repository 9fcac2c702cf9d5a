use clubdeck_core::{AppError, AppResult, UserIdentity};
use tower_sessions::Session;

use super::{SESSION_CREATED_AT_KEY, SESSION_USER_KEY};

/// Reads the authenticated identity stored in the session, if any.
pub async fn session_identity(session: &Session) -> AppResult<Option<UserIdentity>> {
    session
        .get::<UserIdentity>(SESSION_USER_KEY)
        .await
        .map_err(|error| AppError::Internal(format!("failed to read session identity: {error}")))
}

/// Binds `identity` to a fresh session id.
pub(super) async fn start_session(session: &Session, identity: &UserIdentity) -> AppResult<()> {
    session
        .cycle_id()
        .await
        .map_err(|error| AppError::Internal(format!("failed to cycle session id: {error}")))?;

    let store_error = |error: tower_sessions::session::Error| {
        AppError::Internal(format!("failed to store session: {error}"))
    };
    session
        .insert(SESSION_USER_KEY, identity)
        .await
        .map_err(store_error)?;
    session
        .insert(SESSION_CREATED_AT_KEY, chrono::Utc::now().timestamp())
        .await
        .map_err(store_error)
}
