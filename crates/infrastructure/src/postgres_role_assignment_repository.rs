use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::{FromRow, PgPool};
use tracing::warn;
use uuid::Uuid;

use clubdeck_application::{RoleAssignmentRecord, RoleAssignmentRepository};
use clubdeck_core::{AppError, AppResult, ClubId};
use clubdeck_domain::RoleAssignment;


/// PostgreSQL-backed role store.
#[derive(Clone)]
pub struct PostgresRoleAssignmentRepository {
    pool: PgPool,
}

impl PostgresRoleAssignmentRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct RoleRow {
    user_id: String,
    role: String,
    club_id: Option<Uuid>,
}

#[derive(Debug, FromRow)]
struct RoleRecordRow {
    id: Uuid,
    user_id: String,
    role: String,
    club_id: Option<Uuid>,
    created_at: DateTime<Utc>,
}

#[async_trait]
impl RoleAssignmentRepository for PostgresRoleAssignmentRepository {
    async fn list_assignments_for_subject(
        &self,
        subject: &str,
    ) -> AppResult<Vec<RoleAssignment>> {
        let rows = sqlx::query_as::<_, RoleRow>(
            r#"
            SELECT user_id, role, club_id
            FROM user_roles
            WHERE user_id = $1
            "#,
        )
        .bind(subject)
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to load role assignments: {error}")))?;

        Ok(rows
            .into_iter()
            .filter_map(|row| decode_assignment(row.user_id, &row.role, row.club_id))
            .collect())
    }

    async fn list_assignments_for_club(
        &self,
        club_id: ClubId,
    ) -> AppResult<Vec<RoleAssignmentRecord>> {
        let rows = sqlx::query_as::<_, RoleRecordRow>(
            r#"
            SELECT id, user_id, role, club_id, created_at
            FROM user_roles
            WHERE club_id = $1
            ORDER BY user_id, role
            "#,
        )
        .bind(club_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!(
                "failed to list role assignments for club '{club_id}': {error}"
            ))
        })?;

        Ok(rows.into_iter().filter_map(decode_record).collect())
    }

    async fn list_global_assignments(&self) -> AppResult<Vec<RoleAssignmentRecord>> {
        let rows = sqlx::query_as::<_, RoleRecordRow>(
            r#"
            SELECT id, user_id, role, club_id, created_at
            FROM user_roles
            WHERE club_id IS NULL
            ORDER BY user_id, role
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to list global role assignments: {error}"))
        })?;

        Ok(rows.into_iter().filter_map(decode_record).collect())
    }

    async fn insert_assignment(
        &self,
        assignment: &RoleAssignment,
    ) -> AppResult<RoleAssignmentRecord> {
        let row = sqlx::query_as::<_, RoleRecordRow>(
            r#"
            INSERT INTO user_roles (user_id, role, club_id)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, role, club_id, created_at
            "#,
        )
        .bind(assignment.subject())
        .bind(assignment.role().as_str())
        .bind(assignment.club_id().map(|club_id| club_id.as_uuid()))
        .fetch_one(&self.pool)
        .await
        .map_err(|error| map_insert_error(error, assignment))?;

        Ok(RoleAssignmentRecord {
            assignment_id: row.id.to_string(),
            assignment: assignment.clone(),
            assigned_at: format_timestamp(row.created_at),
        })
    }

    async fn delete_assignment(&self, assignment: &RoleAssignment) -> AppResult<()> {
        let rows_affected = sqlx::query(
            r#"
            DELETE FROM user_roles
            WHERE user_id = $1
                AND role = $2
                AND club_id IS NOT DISTINCT FROM $3
            "#,
        )
        .bind(assignment.subject())
        .bind(assignment.role().as_str())
        .bind(assignment.club_id().map(|club_id| club_id.as_uuid()))
        .execute(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to remove role assignment: {error}")))?
        .rows_affected();

        if rows_affected == 0 {
            return Err(AppError::NotFound(format!(
                "role assignment {} was not found",
                describe(assignment)
            )));
        }

        Ok(())
    }
}

/// Decodes one stored row; unknown role strings are dropped so they can never
/// grant anything.
fn decode_assignment(user_id: String, role: &str, club_id: Option<Uuid>) -> Option<RoleAssignment> {
    match RoleAssignment::from_stored(user_id, role, club_id.map(ClubId::from_uuid)) {
        Ok(assignment) => Some(assignment),
        Err(error) => {
            warn!(%error, "ignoring role assignment with unrecognized role");
            None
        }
    }
}

fn decode_record(row: RoleRecordRow) -> Option<RoleAssignmentRecord> {
    let assignment = decode_assignment(row.user_id, &row.role, row.club_id)?;

    Some(RoleAssignmentRecord {
        assignment_id: row.id.to_string(),
        assignment,
        assigned_at: format_timestamp(row.created_at),
    })
}

fn format_timestamp(value: DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn describe(assignment: &RoleAssignment) -> String {
    match assignment.club_id() {
        Some(club_id) => format!(
            "'{}:{}' in club '{club_id}'",
            assignment.subject(),
            assignment.role()
        ),
        None => format!("'{}:{}'", assignment.subject(), assignment.role()),
    }
}

fn map_insert_error(error: sqlx::Error, assignment: &RoleAssignment) -> AppError {
    if let sqlx::Error::Database(database_error) = &error {
        match database_error.code().as_deref() {
            Some("23505") => {
                return AppError::Conflict(format!(
                    "role assignment {} already exists",
                    describe(assignment)
                ));
            }
            Some("23503") => {
                return AppError::NotFound(format!(
                    "club for role assignment {} does not exist",
                    describe(assignment)
                ));
            }
            _ => {}
        }
    }

    AppError::Internal(format!("failed to insert role assignment: {error}"))
}
