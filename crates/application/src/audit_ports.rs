use async_trait::async_trait;

use clubdeck_core::{AppResult, ClubId, UserIdentity};
use clubdeck_domain::{AuditAction, RoleAssignment, RoleKind};

/// One administrative change to the role store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEvent {
    /// Who made the change.
    pub actor_subject: String,
    /// What happened.
    pub action: AuditAction,
    /// User whose grants changed.
    pub target_subject: String,
    /// Role that was granted or revoked.
    pub role: RoleKind,
    /// Club scope of the grant.
    pub club_id: Option<ClubId>,
}

impl AuditEvent {
    /// Describes `action` applied to `assignment` by `actor`.
    #[must_use]
    pub fn role_change(
        actor: &UserIdentity,
        action: AuditAction,
        assignment: &RoleAssignment,
    ) -> Self {
        Self {
            actor_subject: actor.subject().to_owned(),
            action,
            target_subject: assignment.subject().to_owned(),
            role: assignment.role(),
            club_id: assignment.club_id(),
        }
    }
}

/// Append-only sink for role change events.
#[async_trait]
pub trait AuditRepository: Send + Sync {
    /// Persists one event.
    async fn append_event(&self, event: AuditEvent) -> AppResult<()>;
}
