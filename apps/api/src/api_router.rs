mod cors;

use axum::Router;
use axum::extract::Extension;
use axum::middleware::{from_fn, from_fn_with_state};
use axum::routing::{get, post};
use clubdeck_core::AppError;
use clubdeck_domain::RoleKind;
use tower_http::trace::TraceLayer;
use tower_sessions::SessionManagerLayer;
use tower_sessions_sqlx_store::PostgresStore;

use crate::state::AppState;
use crate::{auth, handlers, middleware};

pub fn build_router(
    app_state: AppState,
    frontend_url: &str,
    session_layer: SessionManagerLayer<PostgresStore>,
) -> Result<Router, AppError> {
    let protected_routes = Router::new()
        .route("/auth/me", get(auth::me_handler))
        .route("/api/me/roles", get(handlers::access::my_roles_handler))
        .route(
            "/api/access/check",
            get(handlers::access::access_check_handler),
        )
        .route(
            "/api/clubs/{club_id}/role-assignments",
            get(handlers::security::list_club_role_assignments_handler),
        )
        .route(
            "/api/security/role-assignments",
            get(handlers::security::list_global_role_assignments_handler)
                .post(handlers::security::assign_role_handler),
        )
        .route(
            "/api/security/role-unassignments",
            post(handlers::security::unassign_role_handler),
        )
        .merge(club_member_routes(&app_state))
        .route_layer(from_fn(middleware::require_auth));

    Ok(Router::new()
        .route("/health", get(handlers::health::health_handler))
        .route("/auth/bootstrap", post(auth::bootstrap_handler))
        .route("/auth/logout", post(auth::logout_handler))
        .route("/dashboard", get(handlers::pages::dashboard_handler))
        .merge(protected_routes)
        .route_layer(from_fn_with_state(
            app_state.clone(),
            middleware::require_same_origin_for_mutations,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(cors::build_cors_layer(frontend_url)?)
        .layer(session_layer)
        .with_state(app_state))
}

/// Routes open to any member of the club named in the path.
///
/// Callers must wrap the result in a layer that resolves the identity;
/// `require_auth` does so in [`build_router`].
fn club_member_routes(app_state: &AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/api/clubs/{club_id}/me",
            get(handlers::access::club_membership_handler),
        )
        .route_layer(from_fn_with_state(
            app_state.clone(),
            middleware::require_club_role,
        ))
        .layer(Extension(RoleKind::Player))
}

#[cfg(test)]
mod tests {
    use std::convert::Infallible;
    use std::sync::Arc;

    use axum::Router;
    use axum::body::Body;
    use axum::extract::Request;
    use axum::http::StatusCode;
    use axum::middleware::{Next, from_fn};
    use axum::response::Response;
    use clubdeck_application::{AuthorizationService, RoleAdminService};
    use clubdeck_core::{ClubId, UserIdentity};
    use clubdeck_domain::{RoleAssignment, RoleKind};
    use clubdeck_infrastructure::InMemoryRoleAssignmentRepository;
    use tower::ServiceExt;

    use super::club_member_routes;
    use crate::test_support::{NoopAuditRepository, test_state};

    const SUBJECT_HEADER: &str = "x-test-subject";

    /// Stands in for `require_auth` so requests carry an identity without a
    /// session store.
    async fn identity_from_header(mut request: Request, next: Next) -> Response {
        let subject = request
            .headers()
            .get(SUBJECT_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(ToOwned::to_owned);
        if let Some(subject) = subject {
            request
                .extensions_mut()
                .insert(UserIdentity::new(subject.clone(), subject, None));
        }

        next.run(request).await
    }

    fn router(assignments: Vec<RoleAssignment>) -> Router {
        let repository = Arc::new(InMemoryRoleAssignmentRepository::with_assignments(
            assignments,
        ));
        let authorization_service = AuthorizationService::new(repository.clone());
        let state = test_state(
            authorization_service.clone(),
            RoleAdminService::new(
                authorization_service,
                repository,
                Arc::new(NoopAuditRepository),
            ),
        );

        Router::new()
            .merge(club_member_routes(&state))
            .route_layer(from_fn(identity_from_header))
            .with_state(state)
    }

    async fn status_of(router: Router, club: &str, subject: Option<&str>) -> StatusCode {
        let mut request = axum::http::Request::builder().uri(format!("/api/clubs/{club}/me"));
        if let Some(subject) = subject {
            request = request.header(SUBJECT_HEADER, subject);
        }
        let request = request
            .body(Body::empty())
            .unwrap_or_else(|error| panic!("request should build: {error}"));

        let response: Result<Response, Infallible> = router.oneshot(request).await;
        match response {
            Ok(response) => response.status(),
            Err(never) => match never {},
        }
    }

    #[tokio::test]
    async fn club_member_route_admits_members_of_that_club() {
        let club_a = ClubId::new();
        let router = router(vec![RoleAssignment::new(
            "coach",
            RoleKind::Coach,
            Some(club_a),
        )]);

        assert_eq!(
            status_of(router, &club_a.to_string(), Some("coach")).await,
            StatusCode::OK
        );
    }

    #[tokio::test]
    async fn club_member_route_rejects_other_clubs() {
        let club_a = ClubId::new();
        let router = router(vec![RoleAssignment::new(
            "coach",
            RoleKind::Coach,
            Some(club_a),
        )]);

        assert_eq!(
            status_of(router, &ClubId::new().to_string(), Some("coach")).await,
            StatusCode::FORBIDDEN
        );
    }

    #[tokio::test]
    async fn club_member_route_requires_identity() {
        let club_a = ClubId::new();
        let router = router(vec![RoleAssignment::new(
            "coach",
            RoleKind::Coach,
            Some(club_a),
        )]);

        assert_eq!(
            status_of(router, &club_a.to_string(), None).await,
            StatusCode::UNAUTHORIZED
        );
    }

    #[tokio::test]
    async fn club_member_route_rejects_malformed_club_id() {
        let router = router(vec![RoleAssignment::new("root", RoleKind::SuperAdmin, None)]);

        assert_eq!(
            status_of(router, "riverside-fc", Some("root")).await,
            StatusCode::BAD_REQUEST
        );
    }
}
