use axum::Json;
use axum::extract::{Extension, Path, State};
use axum::http::StatusCode;
use clubdeck_application::RoleChangeInput;
use clubdeck_core::{AppResult, ClubId, UserIdentity};
use clubdeck_domain::RoleKind;

use crate::dto::{AssignRoleRequest, RemoveRoleAssignmentRequest, RoleAssignmentResponse};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn list_club_role_assignments_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(club_id): Path<String>,
) -> ApiResult<Json<Vec<RoleAssignmentResponse>>> {
    let club_id = club_id.parse::<ClubId>()?;
    let assignments = state
        .role_admin_service
        .list_club_assignments(&user, club_id)
        .await?
        .into_iter()
        .map(RoleAssignmentResponse::from)
        .collect();

    Ok(Json(assignments))
}

pub async fn list_global_role_assignments_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
) -> ApiResult<Json<Vec<RoleAssignmentResponse>>> {
    let assignments = state
        .role_admin_service
        .list_global_assignments(&user)
        .await?
        .into_iter()
        .map(RoleAssignmentResponse::from)
        .collect();

    Ok(Json(assignments))
}

pub async fn assign_role_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Json(payload): Json<AssignRoleRequest>,
) -> ApiResult<(StatusCode, Json<RoleAssignmentResponse>)> {
    let input = role_change_input(payload.subject, &payload.role, payload.club_id.as_deref())?;
    let record = state.role_admin_service.assign_role(&user, input).await?;

    Ok((StatusCode::CREATED, Json(RoleAssignmentResponse::from(record))))
}

pub async fn unassign_role_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Json(payload): Json<RemoveRoleAssignmentRequest>,
) -> ApiResult<StatusCode> {
    let input = role_change_input(payload.subject, &payload.role, payload.club_id.as_deref())?;
    state.role_admin_service.unassign_role(&user, input).await?;

    Ok(StatusCode::NO_CONTENT)
}

fn role_change_input(
    subject: String,
    role: &str,
    club_id: Option<&str>,
) -> AppResult<RoleChangeInput> {
    Ok(RoleChangeInput {
        subject,
        role: RoleKind::from_transport(role)?,
        club_id: club_id.map(str::parse::<ClubId>).transpose()?,
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::Json;
    use axum::extract::{Extension, State};
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use clubdeck_application::{AuthorizationService, RoleAdminService};
    use clubdeck_core::{ClubId, UserIdentity};
    use clubdeck_domain::{RoleAssignment, RoleKind};
    use clubdeck_infrastructure::InMemoryRoleAssignmentRepository;

    use super::{assign_role_handler, role_change_input};
    use crate::dto::AssignRoleRequest;
    use crate::state::AppState;
    use crate::test_support::{NoopAuditRepository, test_state};

    fn state_with(assignments: Vec<RoleAssignment>) -> AppState {
        let repository = Arc::new(InMemoryRoleAssignmentRepository::with_assignments(
            assignments,
        ));
        let authorization_service = AuthorizationService::new(repository.clone());
        test_state(
            authorization_service.clone(),
            RoleAdminService::new(
                authorization_service,
                repository,
                Arc::new(NoopAuditRepository),
            ),
        )
    }

    #[test]
    fn transport_values_are_validated() {
        let club = ClubId::new();
        let parsed = role_change_input("nia".to_owned(), "player", Some(&club.to_string()));
        assert!(parsed.is_ok_and(|input| input.role == RoleKind::Player
            && input.club_id == Some(club)));

        assert!(role_change_input("nia".to_owned(), "captain", None).is_err());
        assert!(role_change_input("nia".to_owned(), "player", Some("not-a-uuid")).is_err());
    }

    #[tokio::test]
    async fn club_admin_assignment_returns_created() {
        let club = ClubId::new();
        let state = state_with(vec![RoleAssignment::new(
            "owen",
            RoleKind::ClubAdmin,
            Some(club),
        )]);

        let response = assign_role_handler(
            State(state),
            Extension(UserIdentity::new("owen", "Owen", None)),
            Json(AssignRoleRequest {
                subject: "pat".to_owned(),
                role: "coach".to_owned(),
                club_id: Some(club.to_string()),
            }),
        )
        .await;

        assert_eq!(
            response.map(|(status, _)| status).ok(),
            Some(StatusCode::CREATED)
        );
    }

    #[tokio::test]
    async fn parent_assignment_attempt_is_forbidden() {
        let club = ClubId::new();
        let state = state_with(vec![RoleAssignment::new(
            "quinn",
            RoleKind::Parent,
            Some(club),
        )]);

        let response = assign_role_handler(
            State(state),
            Extension(UserIdentity::new("quinn", "Quinn", None)),
            Json(AssignRoleRequest {
                subject: "ray".to_owned(),
                role: "player".to_owned(),
                club_id: Some(club.to_string()),
            }),
        )
        .await;

        let status = response.err().map(|error| error.into_response().status());
        assert_eq!(status, Some(StatusCode::FORBIDDEN));
    }
}
