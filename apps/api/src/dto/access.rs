use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::security::RoleGrantResponse;

/// Query string for an ad-hoc access check.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/access-check-query.ts"
)]
pub struct AccessCheckQuery {
    /// `exact` or `minimum`.
    pub mode: String,
    pub role: String,
    pub club_id: Option<String>,
}

/// Result of an access check.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/access-check-response.ts"
)]
pub struct AccessCheckResponse {
    pub granted: bool,
}

/// The caller's standing in one club.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/club-membership-response.ts"
)]
pub struct ClubMembershipResponse {
    pub club_id: String,
    pub effective_role: Option<String>,
    pub grants: Vec<RoleGrantResponse>,
}
