use clubdeck_application::RoleAssignmentRecord;
use clubdeck_domain::RoleAssignment;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Incoming payload for role assignment.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/assign-role-request.ts"
)]
pub struct AssignRoleRequest {
    pub subject: String,
    pub role: String,
    pub club_id: Option<String>,
}

/// Incoming payload for role unassignment.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/remove-role-assignment-request.ts"
)]
pub struct RemoveRoleAssignmentRequest {
    pub subject: String,
    pub role: String,
    pub club_id: Option<String>,
}

/// API representation of a stored role assignment.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/role-assignment-response.ts"
)]
pub struct RoleAssignmentResponse {
    pub assignment_id: String,
    pub subject: String,
    pub role: String,
    pub club_id: Option<String>,
    pub assigned_at: String,
}

/// API representation of one of the caller's own grants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/role-grant-response.ts"
)]
pub struct RoleGrantResponse {
    pub role: String,
    pub club_id: Option<String>,
}

impl From<RoleAssignmentRecord> for RoleAssignmentResponse {
    fn from(value: RoleAssignmentRecord) -> Self {
        Self {
            assignment_id: value.assignment_id,
            subject: value.assignment.subject().to_owned(),
            role: value.assignment.role().as_str().to_owned(),
            club_id: value.assignment.club_id().map(|club_id| club_id.to_string()),
            assigned_at: value.assigned_at,
        }
    }
}

impl From<&RoleAssignment> for RoleGrantResponse {
    fn from(value: &RoleAssignment) -> Self {
        Self {
            role: value.role().as_str().to_owned(),
            club_id: value.club_id().map(|club_id| club_id.to_string()),
        }
    }
}
