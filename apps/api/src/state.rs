use clubdeck_application::{AuthorizationService, RoleAdminService};
use sqlx::PgPool;

use crate::api_config::PageRedirects;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub authorization_service: AuthorizationService,
    pub role_admin_service: RoleAdminService,
    pub postgres_pool: PgPool,
    pub bootstrap_token: String,
    pub redirects: PageRedirects,
}
