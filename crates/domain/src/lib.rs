//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod access;
mod gate;
mod role;
mod security;

pub use access::{RoleRequirement, effective_role, is_granted};
pub use gate::{AssignmentsState, GateDecision, gate};
pub use role::{RoleAssignment, RoleKind};
pub use security::AuditAction;
