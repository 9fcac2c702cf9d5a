use std::sync::Arc;

use clubdeck_core::{AppError, AppResult, ClubId, UserIdentity};
use clubdeck_domain::{AuditAction, RoleKind, RoleRequirement, effective_role, is_granted};
use tracing::warn;

use crate::{
    AuditEvent, AuditRepository, AuthorizationService, RoleAssignmentRecord,
    RoleAssignmentRepository, RoleChangeInput,
};

/// Application service for granting and revoking roles.
#[derive(Clone)]
pub struct RoleAdminService {
    authorization_service: AuthorizationService,
    repository: Arc<dyn RoleAssignmentRepository>,
    audit_repository: Arc<dyn AuditRepository>,
}

impl RoleAdminService {
    /// Creates a new service from required dependencies.
    #[must_use]
    pub fn new(
        authorization_service: AuthorizationService,
        repository: Arc<dyn RoleAssignmentRepository>,
        audit_repository: Arc<dyn AuditRepository>,
    ) -> Self {
        Self {
            authorization_service,
            repository,
            audit_repository,
        }
    }

    /// Lists the role assignments of one club for its administrators.
    pub async fn list_club_assignments(
        &self,
        actor: &UserIdentity,
        club_id: ClubId,
    ) -> AppResult<Vec<RoleAssignmentRecord>> {
        self.authorization_service
            .require(
                actor,
                &RoleRequirement::minimum(RoleKind::ClubAdmin).in_club(club_id),
            )
            .await?;

        self.repository.list_assignments_for_club(club_id).await
    }

    /// Lists unscoped assignments for super admins.
    pub async fn list_global_assignments(
        &self,
        actor: &UserIdentity,
    ) -> AppResult<Vec<RoleAssignmentRecord>> {
        self.authorization_service
            .require(actor, &RoleRequirement::exact(RoleKind::SuperAdmin))
            .await?;

        self.repository.list_global_assignments().await
    }

    /// Grants a role and emits an audit event.
    pub async fn assign_role(
        &self,
        actor: &UserIdentity,
        input: RoleChangeInput,
    ) -> AppResult<RoleAssignmentRecord> {
        self.authorize_change(actor, &input).await?;

        let assignment = input.to_assignment();
        let record = self.repository.insert_assignment(&assignment).await?;

        if let Err(error) = self
            .append_change_event(actor, &input, AuditAction::RoleAssigned)
            .await
        {
            // An unaudited grant must not stay in the role store.
            if let Err(rollback_error) = self.repository.delete_assignment(&assignment).await {
                warn!(
                    %rollback_error,
                    subject = assignment.subject(),
                    "failed to roll back unaudited role grant"
                );
            }
            return Err(error);
        }

        Ok(record)
    }

    /// Revokes a role and emits an audit event.
    pub async fn unassign_role(&self, actor: &UserIdentity, input: RoleChangeInput) -> AppResult<()> {
        self.authorize_change(actor, &input).await?;

        let assignment = input.to_assignment();
        self.repository.delete_assignment(&assignment).await?;

        if let Err(error) = self
            .append_change_event(actor, &input, AuditAction::RoleUnassigned)
            .await
        {
            if let Err(rollback_error) = self.repository.insert_assignment(&assignment).await {
                warn!(
                    %rollback_error,
                    subject = assignment.subject(),
                    "failed to restore unaudited role revocation"
                );
            }
            return Err(error);
        }

        Ok(())
    }

    async fn authorize_change(&self, actor: &UserIdentity, input: &RoleChangeInput) -> AppResult<()> {
        validate_scope(input)?;

        if input.subject.trim().is_empty() {
            return Err(AppError::Validation(
                "role change subject must not be empty".to_owned(),
            ));
        }

        let actor_assignments = self
            .authorization_service
            .assignments_for_subject(actor.subject())
            .await;

        let Some(club_id) = input.club_id else {
            return if is_granted(&actor_assignments, &RoleRequirement::exact(RoleKind::SuperAdmin))
            {
                Ok(())
            } else {
                Err(AppError::Forbidden(format!(
                    "subject '{}' cannot change platform-wide roles",
                    actor.subject()
                )))
            };
        };

        if !is_granted(
            &actor_assignments,
            &RoleRequirement::minimum(RoleKind::ClubAdmin).in_club(club_id),
        ) {
            return Err(AppError::Forbidden(format!(
                "subject '{}' cannot manage roles in club '{club_id}'",
                actor.subject()
            )));
        }

        let actor_role = effective_role(&actor_assignments, Some(club_id));
        if actor_role.is_none_or(|actor_role| actor_role < input.role) {
            return Err(AppError::Forbidden(format!(
                "subject '{}' cannot grant role '{}' above their own in club '{club_id}'",
                actor.subject(),
                input.role
            )));
        }

        Ok(())
    }

    async fn append_change_event(
        &self,
        actor: &UserIdentity,
        input: &RoleChangeInput,
        action: AuditAction,
    ) -> AppResult<()> {
        self.audit_repository
            .append_event(AuditEvent::role_change(
                actor,
                action,
                &input.to_assignment(),
            ))
            .await
    }
}

fn validate_scope(input: &RoleChangeInput) -> AppResult<()> {
    match (input.role.is_club_scoped(), input.club_id) {
        (true, None) => Err(AppError::Validation(format!(
            "role '{}' must be scoped to a club",
            input.role
        ))),
        (false, Some(club_id)) => Err(AppError::Validation(format!(
            "role '{}' cannot be scoped to club '{club_id}'",
            input.role
        ))),
        _ => Ok(()),
    }
}
