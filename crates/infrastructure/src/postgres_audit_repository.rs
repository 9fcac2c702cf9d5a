use async_trait::async_trait;
use clubdeck_application::{AuditEvent, AuditRepository};
use clubdeck_core::{AppError, AppResult};
use sqlx::PgPool;
use tracing::debug;

/// Writes role change events to `role_audit_events`.
#[derive(Clone)]
pub struct PostgresAuditRepository {
    pool: PgPool,
}

impl PostgresAuditRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuditRepository for PostgresAuditRepository {
    async fn append_event(&self, event: AuditEvent) -> AppResult<()> {
        let event_id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO role_audit_events (actor_subject, action, target_subject, role, club_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(event.actor_subject.as_str())
        .bind(event.action.as_str())
        .bind(event.target_subject.as_str())
        .bind(event.role.as_str())
        .bind(event.club_id.map(|club_id| club_id.as_uuid()))
        .fetch_one(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!(
                "failed to record '{}' for '{}': {error}",
                event.action.as_str(),
                event.target_subject
            ))
        })?;

        debug!(event_id, action = event.action.as_str(), "role change recorded");
        Ok(())
    }
}
