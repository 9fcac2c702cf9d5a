//! Role requirement evaluation.
//!
//! Every route guard, page guard and UI gate decides access through
//! [`is_granted`]; nothing else re-derives the hierarchy rules.

use clubdeck_core::ClubId;
use serde::{Deserialize, Serialize};

use crate::{RoleAssignment, RoleKind};

/// Permission descriptor checked against a user's role assignments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum RoleRequirement {
    /// Caller must hold exactly this role.
    Exact {
        /// Required role.
        role: RoleKind,
        /// Optional club the role must be held in.
        club_id: Option<ClubId>,
    },
    /// Caller must hold this role or a higher one.
    Minimum {
        /// Lowest acceptable role.
        role: RoleKind,
        /// Optional club the role must be held in.
        club_id: Option<ClubId>,
    },
}

impl RoleRequirement {
    /// Requires exactly `role` in any club.
    #[must_use]
    pub fn exact(role: RoleKind) -> Self {
        Self::Exact {
            role,
            club_id: None,
        }
    }

    /// Requires `role` or higher in any club.
    #[must_use]
    pub fn minimum(role: RoleKind) -> Self {
        Self::Minimum {
            role,
            club_id: None,
        }
    }

    /// Scopes the requirement to one club.
    #[must_use]
    pub fn in_club(self, club_id: ClubId) -> Self {
        match self {
            Self::Exact { role, .. } => Self::Exact {
                role,
                club_id: Some(club_id),
            },
            Self::Minimum { role, .. } => Self::Minimum {
                role,
                club_id: Some(club_id),
            },
        }
    }

    /// Returns the role named by the requirement.
    #[must_use]
    pub fn role(&self) -> RoleKind {
        match self {
            Self::Exact { role, .. } | Self::Minimum { role, .. } => *role,
        }
    }

    /// Returns the club scope, if any.
    #[must_use]
    pub fn club_id(&self) -> Option<ClubId> {
        match self {
            Self::Exact { club_id, .. } | Self::Minimum { club_id, .. } => *club_id,
        }
    }

    /// Evaluates this requirement against `assignments`.
    #[must_use]
    pub fn is_satisfied_by(&self, assignments: &[RoleAssignment]) -> bool {
        is_granted(assignments, self)
    }
}

/// Decides whether `assignments` satisfy `requirement`.
///
/// A super admin assignment in any scope grants everything. Otherwise a
/// single assignment must meet both the role condition and the club scope;
/// authority is never combined across assignments.
#[must_use]
pub fn is_granted(assignments: &[RoleAssignment], requirement: &RoleRequirement) -> bool {
    if assignments
        .iter()
        .any(|assignment| assignment.role() == RoleKind::SuperAdmin)
    {
        return true;
    }

    match *requirement {
        RoleRequirement::Exact { role, club_id } => assignments.iter().any(|assignment| {
            assignment.role() == role
                && club_id.is_none_or(|club_id| assignment.club_id() == Some(club_id))
        }),
        RoleRequirement::Minimum { role, club_id } => assignments.iter().any(|assignment| {
            assignment.role() >= role
                && club_id.is_none_or(|club_id| assignment.applies_to_club(club_id))
        }),
    }
}

/// Returns the highest role applicable in `club_id`, or across all scopes
/// when no club is given.
#[must_use]
pub fn effective_role(assignments: &[RoleAssignment], club_id: Option<ClubId>) -> Option<RoleKind> {
    assignments
        .iter()
        .filter(|assignment| club_id.is_none_or(|club_id| assignment.applies_to_club(club_id)))
        .map(RoleAssignment::role)
        .max()
}

#[cfg(test)]
mod tests {
    use clubdeck_core::ClubId;
    use proptest::prelude::*;

    use super::{RoleRequirement, effective_role, is_granted};
    use crate::{RoleAssignment, RoleKind};

    fn assignment(role: RoleKind, club_id: Option<ClubId>) -> RoleAssignment {
        RoleAssignment::new("user-1", role, club_id)
    }

    #[test]
    fn club_admin_meets_minimum_coach_in_same_club() {
        let club = ClubId::new();
        let requirement = RoleRequirement::minimum(RoleKind::Coach).in_club(club);

        assert!(is_granted(
            &[assignment(RoleKind::ClubAdmin, Some(club))],
            &requirement
        ));
        assert!(!is_granted(
            &[assignment(RoleKind::Parent, Some(club))],
            &requirement
        ));
    }

    #[test]
    fn exact_role_in_other_club_is_denied() {
        let club_a = ClubId::new();
        let club_b = ClubId::new();
        let requirement = RoleRequirement::exact(RoleKind::ClubAdmin).in_club(club_a);

        assert!(!is_granted(
            &[assignment(RoleKind::ClubAdmin, Some(club_b))],
            &requirement
        ));
    }

    #[test]
    fn authority_is_not_combined_across_assignments() {
        let club_a = ClubId::new();
        let club_b = ClubId::new();
        let assignments = [
            assignment(RoleKind::Coach, Some(club_a)),
            assignment(RoleKind::ClubAdmin, Some(club_b)),
        ];

        assert!(!is_granted(
            &assignments,
            &RoleRequirement::minimum(RoleKind::ClubAdmin).in_club(club_a)
        ));
    }

    #[test]
    fn unscoped_minimum_uses_hierarchy_index() {
        assert!(is_granted(
            &[assignment(RoleKind::ClubAdmin, None)],
            &RoleRequirement::minimum(RoleKind::Coach)
        ));
    }

    #[test]
    fn exact_role_is_not_satisfied_by_higher_role() {
        let club = ClubId::new();
        assert!(!is_granted(
            &[assignment(RoleKind::ClubAdmin, Some(club))],
            &RoleRequirement::exact(RoleKind::Coach).in_club(club)
        ));
    }

    #[test]
    fn unscoped_exact_requirement_matches_any_club() {
        assert!(is_granted(
            &[assignment(RoleKind::Parent, Some(ClubId::new()))],
            &RoleRequirement::exact(RoleKind::Parent)
        ));
    }

    #[test]
    fn global_club_scoped_role_does_not_satisfy_club_check() {
        let club = ClubId::new();
        let assignments = [assignment(RoleKind::ClubAdmin, None)];

        assert!(!is_granted(
            &assignments,
            &RoleRequirement::exact(RoleKind::ClubAdmin).in_club(club)
        ));
        assert!(!is_granted(
            &assignments,
            &RoleRequirement::minimum(RoleKind::Coach).in_club(club)
        ));
    }

    #[test]
    fn effective_role_is_maximum_of_applicable_assignments() {
        let club_a = ClubId::new();
        let club_b = ClubId::new();
        let assignments = [
            assignment(RoleKind::Parent, Some(club_a)),
            assignment(RoleKind::Coach, Some(club_a)),
            assignment(RoleKind::ClubAdmin, Some(club_b)),
        ];

        assert_eq!(
            effective_role(&assignments, Some(club_a)),
            Some(RoleKind::Coach)
        );
        assert_eq!(
            effective_role(&assignments, None),
            Some(RoleKind::ClubAdmin)
        );
        assert_eq!(effective_role(&assignments, Some(ClubId::new())), None);
        assert_eq!(effective_role(&[], None), None);
    }

    fn role_strategy() -> impl Strategy<Value = RoleKind> {
        prop::sample::select(RoleKind::all().to_vec())
    }

    fn club_strategy(clubs: [ClubId; 3]) -> impl Strategy<Value = Option<ClubId>> {
        prop::option::of(prop::sample::select(clubs.to_vec()))
    }

    fn requirement_strategy(clubs: [ClubId; 3]) -> impl Strategy<Value = RoleRequirement> {
        (any::<bool>(), role_strategy(), club_strategy(clubs)).prop_map(
            |(exact, role, club_id)| {
                if exact {
                    RoleRequirement::Exact { role, club_id }
                } else {
                    RoleRequirement::Minimum { role, club_id }
                }
            },
        )
    }

    fn assignments_strategy(clubs: [ClubId; 3]) -> impl Strategy<Value = Vec<RoleAssignment>> {
        prop::collection::vec(
            (role_strategy(), club_strategy(clubs))
                .prop_map(|(role, club_id)| assignment(role, club_id)),
            0..6,
        )
    }

    fn fixed_clubs() -> [ClubId; 3] {
        [ClubId::new(), ClubId::new(), ClubId::new()]
    }

    proptest! {
        #[test]
        fn super_admin_grants_every_requirement(
            (mut assignments, requirement, super_admin_club) in {
                let clubs = fixed_clubs();
                (assignments_strategy(clubs), requirement_strategy(clubs), club_strategy(clubs))
            }
        ) {
            assignments.push(assignment(RoleKind::SuperAdmin, super_admin_club));
            prop_assert!(is_granted(&assignments, &requirement));
        }

        #[test]
        fn empty_assignments_deny_every_requirement(
            requirement in requirement_strategy(fixed_clubs())
        ) {
            prop_assert!(!is_granted(&[], &requirement));
        }

        #[test]
        fn evaluation_is_repeatable(
            (assignments, requirement) in {
                let clubs = fixed_clubs();
                (assignments_strategy(clubs), requirement_strategy(clubs))
            }
        ) {
            let first = is_granted(&assignments, &requirement);
            prop_assert_eq!(first, is_granted(&assignments, &requirement));
            prop_assert_eq!(first, requirement.is_satisfied_by(&assignments));
        }

        #[test]
        fn exact_grant_implies_minimum_grant(
            (assignments, role, club_id) in {
                let clubs = fixed_clubs();
                (assignments_strategy(clubs), role_strategy(), club_strategy(clubs))
            }
        ) {
            let exact = RoleRequirement::Exact { role, club_id };
            let minimum = RoleRequirement::Minimum { role, club_id };
            if is_granted(&assignments, &exact) {
                prop_assert!(is_granted(&assignments, &minimum));
            }
        }
    }

    #[test]
    fn effective_role_in_club_ignores_unscoped_club_roles() {
        let club_a = ClubId::new();
        let assignments = [
            assignment(RoleKind::Coach, Some(club_a)),
            assignment(RoleKind::ClubAdmin, None),
        ];

        assert_eq!(
            effective_role(&assignments, Some(club_a)),
            Some(RoleKind::Coach)
        );
        assert!(!is_granted(
            &assignments,
            &RoleRequirement::minimum(RoleKind::ClubAdmin).in_club(club_a)
        ));
        assert_eq!(effective_role(&assignments, None), Some(RoleKind::ClubAdmin));
    }
}
