use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use clubdeck_core::{AppError, NonEmptyString, UserIdentity};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::{info, warn};

use crate::error::ApiResult;
use crate::state::AppState;

use super::session_helpers::start_session;

/// Claims forwarded by the identity provider integration.
#[derive(Debug, Deserialize)]
pub struct BootstrapRequest {
    pub subject: String,
    pub token: String,
    pub display_name: Option<String>,
    pub email: Option<String>,
}

/// Signs a provider-issued subject into a server session.
pub async fn bootstrap_handler(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<BootstrapRequest>,
) -> ApiResult<StatusCode> {
    let BootstrapRequest {
        subject,
        token,
        display_name,
        email,
    } = payload;

    if token != state.bootstrap_token {
        warn!(%subject, "bootstrap rejected: token mismatch");
        return Err(AppError::Unauthorized("invalid bootstrap token".to_owned()).into());
    }

    let identity = UserIdentity::from_claims(NonEmptyString::new(subject)?, display_name, email);
    start_session(&session, &identity).await?;

    info!(subject = identity.subject(), "session started");
    Ok(StatusCode::NO_CONTENT)
}
