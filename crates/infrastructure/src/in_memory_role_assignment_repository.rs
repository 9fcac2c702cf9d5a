use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use clubdeck_application::{RoleAssignmentRecord, RoleAssignmentRepository};
use clubdeck_core::{AppError, AppResult, ClubId};
use clubdeck_domain::RoleAssignment;

/// In-memory role store implementation.
#[derive(Debug, Default)]
pub struct InMemoryRoleAssignmentRepository {
    records: RwLock<Vec<RoleAssignmentRecord>>,
}

impl InMemoryRoleAssignmentRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository pre-populated with assignments.
    #[must_use]
    pub fn with_assignments(assignments: impl IntoIterator<Item = RoleAssignment>) -> Self {
        Self {
            records: RwLock::new(assignments.into_iter().map(new_record).collect()),
        }
    }
}

fn new_record(assignment: RoleAssignment) -> RoleAssignmentRecord {
    RoleAssignmentRecord {
        assignment_id: Uuid::new_v4().to_string(),
        assignment,
        assigned_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
    }
}

#[async_trait]
impl RoleAssignmentRepository for InMemoryRoleAssignmentRepository {
    async fn list_assignments_for_subject(
        &self,
        subject: &str,
    ) -> AppResult<Vec<RoleAssignment>> {
        let records = self.records.read().await;

        Ok(records
            .iter()
            .filter(|record| record.assignment.subject() == subject)
            .map(|record| record.assignment.clone())
            .collect())
    }

    async fn list_assignments_for_club(
        &self,
        club_id: ClubId,
    ) -> AppResult<Vec<RoleAssignmentRecord>> {
        let records = self.records.read().await;

        Ok(records
            .iter()
            .filter(|record| record.assignment.club_id() == Some(club_id))
            .cloned()
            .collect())
    }

    async fn list_global_assignments(&self) -> AppResult<Vec<RoleAssignmentRecord>> {
        let records = self.records.read().await;

        Ok(records
            .iter()
            .filter(|record| record.assignment.club_id().is_none())
            .cloned()
            .collect())
    }

    async fn insert_assignment(
        &self,
        assignment: &RoleAssignment,
    ) -> AppResult<RoleAssignmentRecord> {
        let mut records = self.records.write().await;

        if records
            .iter()
            .any(|record| &record.assignment == assignment)
        {
            return Err(AppError::Conflict(format!(
                "role assignment '{}:{}' already exists",
                assignment.subject(),
                assignment.role()
            )));
        }

        let record = new_record(assignment.clone());
        records.push(record.clone());
        Ok(record)
    }

    async fn delete_assignment(&self, assignment: &RoleAssignment) -> AppResult<()> {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|record| &record.assignment != assignment);

        if records.len() == before {
            return Err(AppError::NotFound(format!(
                "role assignment '{}:{}' was not found",
                assignment.subject(),
                assignment.role()
            )));
        }

        Ok(())
    }
}
