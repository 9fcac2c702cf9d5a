//! Server-side page entry points. Every outcome is a redirect into the web client.

use axum::extract::State;
use axum::response::Redirect;
use clubdeck_domain::{RoleKind, RoleRequirement, effective_role};
use tower_sessions::Session;
use tracing::warn;

use crate::auth::session_identity;
use crate::guard;
use crate::state::AppState;

/// Sends the caller to the landing area of their highest role.
pub async fn dashboard_handler(State(state): State<AppState>, session: Session) -> Redirect {
    let identity = match session_identity(&session).await {
        Ok(identity) => identity,
        Err(error) => {
            warn!(%error, "treating unreadable session as unauthenticated");
            None
        }
    };

    let outcome = guard::check(
        &state.authorization_service,
        identity,
        &RoleRequirement::minimum(RoleKind::Player),
    )
    .await;

    let assignments = match outcome.into_page_result(&state.redirects) {
        Ok((_, assignments)) => assignments,
        Err(redirect) => return redirect,
    };

    let Some(role) = effective_role(&assignments, None) else {
        return Redirect::to(state.redirects.unauthorized_url.as_str());
    };

    match state.redirects.frontend_path(landing_path(role)) {
        Ok(target) => Redirect::to(target.as_str()),
        Err(error) => {
            warn!(%error, "landing path could not be resolved");
            Redirect::to(state.redirects.unauthorized_url.as_str())
        }
    }
}

fn landing_path(role: RoleKind) -> &'static str {
    match role {
        RoleKind::SuperAdmin => "/admin",
        RoleKind::ClubAdmin => "/club-admin",
        RoleKind::Coach => "/coach",
        RoleKind::Parent => "/parent",
        RoleKind::Player => "/player",
    }
}
