use axum::Extension;
use axum::extract::{Path, Request, State};
use axum::http::{HeaderMap, Method, header};
use axum::middleware::Next;
use axum::response::Response;
use clubdeck_core::{AppError, ClubId, UserIdentity};
use clubdeck_domain::{RoleKind, RoleRequirement};
use serde::Deserialize;
use tower_sessions::Session;
use url::Url;

use crate::auth::session_identity;
use crate::error::ApiResult;
use crate::guard;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ClubPath {
    pub club_id: String,
}

pub async fn require_auth(
    session: Session,
    mut request: Request,
    next: Next,
) -> ApiResult<Response> {
    let identity = session_identity(&session)
        .await?
        .ok_or_else(|| AppError::Unauthorized("authentication required".to_owned()))?;

    request.extensions_mut().insert(identity);
    Ok(next.run(request).await)
}

/// Requires the caller to hold at least the configured role in the club named
/// by the `club_id` path segment.
pub async fn require_club_role(
    State(state): State<AppState>,
    Extension(floor): Extension<RoleKind>,
    Path(path): Path<ClubPath>,
    request: Request,
    next: Next,
) -> ApiResult<Response> {
    let club_id = path.club_id.parse::<ClubId>()?;
    let identity = request.extensions().get::<UserIdentity>().cloned();

    guard::check(
        &state.authorization_service,
        identity,
        &RoleRequirement::minimum(floor).in_club(club_id),
    )
    .await
    .into_api_result()?;

    Ok(next.run(request).await)
}

/// Rejects state-changing requests that do not originate from the web client.
pub async fn require_same_origin_for_mutations(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> ApiResult<Response> {
    if is_state_changing_method(request.method())
        && !is_same_origin(request.headers(), &state.redirects.frontend_url)
    {
        return Err(AppError::Unauthorized("origin validation failed".to_owned()).into());
    }

    Ok(next.run(request).await)
}

fn is_same_origin(headers: &HeaderMap, frontend_url: &Url) -> bool {
    if headers
        .get("sec-fetch-site")
        .is_some_and(|fetch_site| fetch_site == "cross-site")
    {
        return false;
    }

    let allowed = frontend_url.origin();
    let header_origin = |name: header::HeaderName| {
        headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| Url::parse(value).ok())
            .map(|url| url.origin())
    };

    header_origin(header::ORIGIN).is_some_and(|origin| origin == allowed)
        || header_origin(header::REFERER).is_some_and(|origin| origin == allowed)
}

fn is_state_changing_method(method: &Method) -> bool {
    matches!(
        *method,
        Method::POST | Method::PUT | Method::PATCH | Method::DELETE
    )
}
