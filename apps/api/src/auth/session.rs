use axum::Json;
use axum::extract::{Extension, State};
use axum::http::StatusCode;
use clubdeck_core::{AppError, UserIdentity};
use clubdeck_domain::effective_role;
use tower_sessions::Session;
use tracing::info;

use crate::dto::UserIdentityResponse;
use crate::error::ApiResult;
use crate::state::AppState;

use super::session_helpers::session_identity;

pub async fn logout_handler(session: Session) -> ApiResult<StatusCode> {
    let subject = session_identity(&session)
        .await?
        .map(|identity| identity.subject().to_owned());

    session
        .delete()
        .await
        .map_err(|error| AppError::Internal(format!("failed to delete session: {error}")))?;

    if let Some(subject) = subject {
        info!(%subject, "session ended");
    }

    Ok(StatusCode::NO_CONTENT)
}

pub async fn me_handler(
    State(state): State<AppState>,
    Extension(identity): Extension<UserIdentity>,
) -> ApiResult<Json<UserIdentityResponse>> {
    let assignments = state
        .authorization_service
        .assignments_for_subject(identity.subject())
        .await;
    let highest_role = effective_role(&assignments, None);

    Ok(Json(UserIdentityResponse::from_identity_with_role(
        identity,
        highest_role,
    )))
}
