//! Conditional-render decision for role-gated UI content.

use crate::{RoleAssignment, RoleRequirement, is_granted};

/// Loading state of the role assignments held by a UI client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignmentsState<'a> {
    /// Assignments are still being fetched.
    Loading,
    /// Assignments are available.
    Loaded(&'a [RoleAssignment]),
}

/// What a role-gated component should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// Render neither branch until assignments arrive.
    Suspend,
    /// Render the protected content.
    Render,
    /// Render the fallback content.
    Fallback,
}

/// Decides the gate outcome for `requirement`.
#[must_use]
pub fn gate(state: AssignmentsState<'_>, requirement: &RoleRequirement) -> GateDecision {
    match state {
        AssignmentsState::Loading => GateDecision::Suspend,
        AssignmentsState::Loaded(assignments) if is_granted(assignments, requirement) => {
            GateDecision::Render
        }
        AssignmentsState::Loaded(_) => GateDecision::Fallback,
    }
}
