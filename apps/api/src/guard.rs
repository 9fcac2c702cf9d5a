//! Transport adapters around the role evaluator.
//!
//! A guard resolves the caller's assignments, asks the evaluator, and turns
//! the answer into either an API error (401/403) or a page redirect.

use axum::response::Redirect;
use clubdeck_application::AuthorizationService;
use clubdeck_core::{AppError, UserIdentity};
use clubdeck_domain::{RoleAssignment, RoleRequirement, is_granted};
use tracing::debug;

use crate::api_config::PageRedirects;
use crate::error::ApiResult;

/// Result of checking one requirement for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardOutcome {
    /// Caller satisfies the requirement.
    Granted {
        identity: UserIdentity,
        assignments: Vec<RoleAssignment>,
    },
    /// No identity was resolved for the request.
    Unauthenticated,
    /// Caller is authenticated but does not satisfy the requirement.
    Denied(UserIdentity),
}

impl GuardOutcome {
    /// Maps the outcome onto API semantics.
    pub fn into_api_result(self) -> ApiResult<UserIdentity> {
        match self {
            Self::Granted { identity, .. } => Ok(identity),
            Self::Unauthenticated => {
                Err(AppError::Unauthorized("authentication required".to_owned()).into())
            }
            Self::Denied(identity) => Err(AppError::Forbidden(format!(
                "subject '{}' lacks the required role",
                identity.subject()
            ))
            .into()),
        }
    }

    /// Maps the outcome onto page semantics.
    pub fn into_page_result(
        self,
        redirects: &PageRedirects,
    ) -> Result<(UserIdentity, Vec<RoleAssignment>), Redirect> {
        match self {
            Self::Granted {
                identity,
                assignments,
            } => Ok((identity, assignments)),
            Self::Unauthenticated => Err(Redirect::to(redirects.login_url.as_str())),
            Self::Denied(_) => Err(Redirect::to(redirects.unauthorized_url.as_str())),
        }
    }
}

/// Checks `requirement` for the request identity.
pub async fn check(
    authorization_service: &AuthorizationService,
    identity: Option<UserIdentity>,
    requirement: &RoleRequirement,
) -> GuardOutcome {
    let Some(identity) = identity else {
        return GuardOutcome::Unauthenticated;
    };

    let assignments = authorization_service
        .assignments_for_subject(identity.subject())
        .await;

    if is_granted(&assignments, requirement) {
        GuardOutcome::Granted {
            identity,
            assignments,
        }
    } else {
        debug!(subject = identity.subject(), ?requirement, "role guard denied request");
        GuardOutcome::Denied(identity)
    }
}
