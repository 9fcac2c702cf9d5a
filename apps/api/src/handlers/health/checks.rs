use sqlx::PgPool;
use tracing::warn;

use crate::dto::HealthDependencyStatus;

use super::dependency_status;

pub(super) async fn check_postgres(pool: &PgPool) -> HealthDependencyStatus {
    let check = sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(pool)
        .await
        .map(|_| ())
        .map_err(|error| {
            warn!(%error, "postgres health check failed");
            format!("postgres check failed: {error}")
        });

    dependency_status(check)
}
