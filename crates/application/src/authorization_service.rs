use std::sync::Arc;

use clubdeck_core::{AppError, AppResult, ClubId, UserIdentity};
use clubdeck_domain::{RoleAssignment, RoleKind, RoleRequirement, effective_role, is_granted};
use tracing::warn;

use crate::RoleAssignmentRepository;

/// Application service for role-based authorization checks.
///
/// Role store failures never surface from this service: they are logged and
/// treated as an empty assignment set, so every check fails closed.
#[derive(Clone)]
pub struct AuthorizationService {
    repository: Arc<dyn RoleAssignmentRepository>,
}

impl AuthorizationService {
    /// Creates a new authorization service from a repository implementation.
    #[must_use]
    pub fn new(repository: Arc<dyn RoleAssignmentRepository>) -> Self {
        Self { repository }
    }

    /// Loads the role assignments held by a subject.
    pub async fn assignments_for_subject(&self, subject: &str) -> Vec<RoleAssignment> {
        match self.repository.list_assignments_for_subject(subject).await {
            Ok(assignments) => assignments,
            Err(error) => {
                warn!(%subject, %error, "role lookup failed, denying access");
                Vec::new()
            }
        }
    }

    /// Returns whether the subject satisfies the requirement.
    pub async fn is_granted(&self, subject: &str, requirement: &RoleRequirement) -> bool {
        let assignments = self.assignments_for_subject(subject).await;
        is_granted(&assignments, requirement)
    }

    /// Ensures the actor satisfies the requirement.
    pub async fn require(&self, actor: &UserIdentity, requirement: &RoleRequirement) -> AppResult<()> {
        if self.is_granted(actor.subject(), requirement).await {
            return Ok(());
        }

        Err(AppError::Forbidden(format!(
            "subject '{}' does not meet {}",
            actor.subject(),
            describe_requirement(requirement)
        )))
    }

    /// Returns the highest role the subject holds in a club, or anywhere
    /// when no club is given.
    pub async fn effective_role(&self, subject: &str, club_id: Option<ClubId>) -> Option<RoleKind> {
        let assignments = self.assignments_for_subject(subject).await;
        effective_role(&assignments, club_id)
    }
}

pub(crate) fn describe_requirement(requirement: &RoleRequirement) -> String {
    let (mode, role, club_id) = match requirement {
        RoleRequirement::Exact { role, club_id } => ("exact role", role, club_id),
        RoleRequirement::Minimum { role, club_id } => ("minimum role", role, club_id),
    };

    match club_id {
        Some(club_id) => format!("{mode} '{role}' in club '{club_id}'"),
        None => format!("{mode} '{role}'"),
    }
}
