use axum::Json;
use axum::extract::{Extension, Path, Query, State};
use clubdeck_core::{AppError, AppResult, ClubId, UserIdentity};
use clubdeck_domain::{RoleKind, RoleRequirement, effective_role};

use crate::dto::{AccessCheckQuery, AccessCheckResponse, ClubMembershipResponse, RoleGrantResponse};
use crate::error::ApiResult;
use crate::state::AppState;

/// Lists the caller's own grants so UI clients can gate rendering locally.
pub async fn my_roles_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
) -> ApiResult<Json<Vec<RoleGrantResponse>>> {
    let grants = state
        .authorization_service
        .assignments_for_subject(user.subject())
        .await
        .iter()
        .map(RoleGrantResponse::from)
        .collect();

    Ok(Json(grants))
}

pub async fn access_check_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Query(query): Query<AccessCheckQuery>,
) -> ApiResult<Json<AccessCheckResponse>> {
    let requirement = requirement_from_query(&query)?;
    let granted = state
        .authorization_service
        .is_granted(user.subject(), &requirement)
        .await;

    Ok(Json(AccessCheckResponse { granted }))
}

pub async fn club_membership_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(club_id): Path<String>,
) -> ApiResult<Json<ClubMembershipResponse>> {
    let club_id = club_id.parse::<ClubId>()?;
    let assignments = state
        .authorization_service
        .assignments_for_subject(user.subject())
        .await;

    let grants = assignments
        .iter()
        .filter(|assignment| assignment.applies_to_club(club_id))
        .map(RoleGrantResponse::from)
        .collect();

    Ok(Json(ClubMembershipResponse {
        club_id: club_id.to_string(),
        effective_role: effective_role(&assignments, Some(club_id))
            .map(|role| role.as_str().to_owned()),
        grants,
    }))
}

fn requirement_from_query(query: &AccessCheckQuery) -> AppResult<RoleRequirement> {
    let role = RoleKind::from_transport(query.role.as_str())?;
    let requirement = match query.mode.as_str() {
        "exact" => RoleRequirement::exact(role),
        "minimum" => RoleRequirement::minimum(role),
        other => {
            return Err(AppError::Validation(format!(
                "access check mode must be 'exact' or 'minimum', got '{other}'"
            )));
        }
    };

    match query.club_id.as_deref() {
        Some(club_id) => Ok(requirement.in_club(club_id.parse::<ClubId>()?)),
        None => Ok(requirement),
    }
}
