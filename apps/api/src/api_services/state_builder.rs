use std::sync::Arc;

use clubdeck_application::{AuthorizationService, RoleAdminService};
use clubdeck_infrastructure::{PostgresAuditRepository, PostgresRoleAssignmentRepository};
use sqlx::PgPool;

use crate::api_config::ApiConfig;
use crate::state::AppState;

pub fn build_app_state(pool: PgPool, config: &ApiConfig) -> AppState {
    let role_repository = Arc::new(PostgresRoleAssignmentRepository::new(pool.clone()));
    let audit_repository = Arc::new(PostgresAuditRepository::new(pool.clone()));

    let authorization_service = AuthorizationService::new(role_repository.clone());
    let role_admin_service = RoleAdminService::new(
        authorization_service.clone(),
        role_repository,
        audit_repository,
    );

    AppState {
        authorization_service,
        role_admin_service,
        postgres_pool: pool,
        bootstrap_token: config.bootstrap_token.clone(),
        redirects: config.redirects.clone(),
    }
}
