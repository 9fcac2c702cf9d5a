use async_trait::async_trait;

use clubdeck_core::{AppResult, ClubId};
use clubdeck_domain::{RoleAssignment, RoleKind};

/// Persisted role assignment with its administrative metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleAssignmentRecord {
    /// Stable assignment identifier.
    pub assignment_id: String,
    /// The grant itself.
    pub assignment: RoleAssignment,
    /// Assignment timestamp in RFC3339.
    pub assigned_at: String,
}

/// Input payload for granting or revoking a role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleChangeInput {
    /// User receiving or losing the role.
    pub subject: String,
    /// Role being changed.
    pub role: RoleKind,
    /// Club scope; `None` only for super admin grants.
    pub club_id: Option<ClubId>,
}

impl RoleChangeInput {
    /// Converts the input into the assignment it describes.
    #[must_use]
    pub fn to_assignment(&self) -> RoleAssignment {
        RoleAssignment::new(self.subject.clone(), self.role, self.club_id)
    }
}

/// Role store port.
#[async_trait]
pub trait RoleAssignmentRepository: Send + Sync {
    /// Lists every assignment held by a subject, across all clubs.
    async fn list_assignments_for_subject(&self, subject: &str)
    -> AppResult<Vec<RoleAssignment>>;

    /// Lists assignments scoped to one club.
    async fn list_assignments_for_club(
        &self,
        club_id: ClubId,
    ) -> AppResult<Vec<RoleAssignmentRecord>>;

    /// Lists assignments without a club scope.
    async fn list_global_assignments(&self) -> AppResult<Vec<RoleAssignmentRecord>>;

    /// Stores a new assignment; duplicates are a conflict.
    async fn insert_assignment(
        &self,
        assignment: &RoleAssignment,
    ) -> AppResult<RoleAssignmentRecord>;

    /// Removes an assignment; a missing one is not found.
    async fn delete_assignment(&self, assignment: &RoleAssignment) -> AppResult<()>;
}
