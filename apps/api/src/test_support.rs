use async_trait::async_trait;
use clubdeck_application::{AuditEvent, AuditRepository, AuthorizationService, RoleAdminService};
use clubdeck_core::AppResult;
use sqlx::postgres::PgPoolOptions;
use url::Url;

use crate::api_config::PageRedirects;
use crate::state::AppState;

pub struct NoopAuditRepository;

#[async_trait]
impl AuditRepository for NoopAuditRepository {
    async fn append_event(&self, _event: AuditEvent) -> AppResult<()> {
        Ok(())
    }
}

pub fn test_redirects() -> PageRedirects {
    PageRedirects {
        frontend_url: Url::parse("http://localhost:3000").unwrap_or_else(|_| unreachable!()),
        login_url: "http://localhost:3000/login".to_owned(),
        unauthorized_url: "http://localhost:3000/unauthorized".to_owned(),
    }
}

/// Builds state backed by a lazy pool that never connects unless queried.
pub fn test_state(
    authorization_service: AuthorizationService,
    role_admin_service: RoleAdminService,
) -> AppState {
    let postgres_pool = PgPoolOptions::new()
        .connect_lazy("postgres://localhost/clubdeck")
        .unwrap_or_else(|error| panic!("lazy pool should build: {error}"));

    AppState {
        authorization_service,
        role_admin_service,
        postgres_pool,
        bootstrap_token: "bootstrap".to_owned(),
        redirects: test_redirects(),
    }
}
