mod access;
mod common;
mod security;

pub use access::{AccessCheckQuery, AccessCheckResponse, ClubMembershipResponse};
pub use common::{HealthDependencyStatus, HealthResponse, UserIdentityResponse};
pub use security::{
    AssignRoleRequest, RemoveRoleAssignmentRequest, RoleAssignmentResponse, RoleGrantResponse,
};
