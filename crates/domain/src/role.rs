//! Role kinds and role assignments.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use clubdeck_core::{AppError, AppResult, ClubId};
use serde::{Deserialize, Serialize};

/// Role held by a user, totally ordered by authority.
///
/// Variant order is the hierarchy: comparing two kinds compares authority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleKind {
    /// Club member playing on a team.
    Player = 0,
    /// Guardian of one or more players.
    Parent = 1,
    /// Runs teams and training sessions.
    Coach = 2,
    /// Manages one club.
    ClubAdmin = 3,
    /// Platform operator with authority over every club.
    SuperAdmin = 4,
}

impl RoleKind {
    /// Returns a stable storage value for this role.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Player => "player",
            Self::Parent => "parent",
            Self::Coach => "coach",
            Self::ClubAdmin => "club_admin",
            Self::SuperAdmin => "super_admin",
        }
    }

    /// Returns the position of this role in the hierarchy, lowest first.
    #[must_use]
    pub fn hierarchy_index(&self) -> u8 {
        *self as u8
    }

    /// Returns whether this role only carries meaning inside a club.
    #[must_use]
    pub fn is_club_scoped(&self) -> bool {
        !matches!(self, Self::SuperAdmin)
    }

    /// Returns all role kinds from lowest to highest authority.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[RoleKind] = &[
            RoleKind::Player,
            RoleKind::Parent,
            RoleKind::Coach,
            RoleKind::ClubAdmin,
            RoleKind::SuperAdmin,
        ];

        ALL
    }

    /// Parses a transport value into a role kind.
    pub fn from_transport(value: &str) -> AppResult<Self> {
        Self::from_str(value)
    }
}

impl Display for RoleKind {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for RoleKind {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "player" => Ok(Self::Player),
            "parent" => Ok(Self::Parent),
            "coach" => Ok(Self::Coach),
            "club_admin" => Ok(Self::ClubAdmin),
            "super_admin" => Ok(Self::SuperAdmin),
            _ => Err(AppError::Validation(format!("unknown role value '{value}'"))),
        }
    }
}

/// One grant of authority to a user, optionally scoped to a club.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoleAssignment {
    subject: String,
    role: RoleKind,
    club_id: Option<ClubId>,
}

impl RoleAssignment {
    /// Creates an assignment. A `None` club means a global grant.
    #[must_use]
    pub fn new(subject: impl Into<String>, role: RoleKind, club_id: Option<ClubId>) -> Self {
        Self {
            subject: subject.into(),
            role,
            club_id,
        }
    }

    /// Decodes a stored row, rejecting role strings outside the hierarchy.
    pub fn from_stored(
        subject: impl Into<String>,
        role: &str,
        club_id: Option<ClubId>,
    ) -> AppResult<Self> {
        Ok(Self::new(subject, RoleKind::from_str(role)?, club_id))
    }

    /// Returns the user the role is granted to.
    #[must_use]
    pub fn subject(&self) -> &str {
        self.subject.as_str()
    }

    /// Returns the granted role.
    #[must_use]
    pub fn role(&self) -> RoleKind {
        self.role
    }

    /// Returns the club scope, or `None` for a global grant.
    #[must_use]
    pub fn club_id(&self) -> Option<ClubId> {
        self.club_id
    }

    /// Returns whether this assignment contributes authority within `club_id`.
    ///
    /// Unscoped rows only count for roles that are not club scoped, so a
    /// stray global `club_admin` row carries no weight inside any club.
    #[must_use]
    pub fn applies_to_club(&self, club_id: ClubId) -> bool {
        match self.club_id {
            Some(value) => value == club_id,
            None => !self.role.is_club_scoped(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use clubdeck_core::ClubId;

    use super::{RoleAssignment, RoleKind};

    #[test]
    fn hierarchy_is_ordered_low_to_high() {
        assert!(RoleKind::Player < RoleKind::Parent);
        assert!(RoleKind::Parent < RoleKind::Coach);
        assert!(RoleKind::Coach < RoleKind::ClubAdmin);
        assert!(RoleKind::ClubAdmin < RoleKind::SuperAdmin);
        assert_eq!(RoleKind::Player.hierarchy_index(), 0);
        assert_eq!(RoleKind::SuperAdmin.hierarchy_index(), 4);
    }

    #[test]
    fn every_role_parses_from_its_storage_value() {
        for role in RoleKind::all() {
            let parsed = RoleKind::from_str(role.as_str());
            assert!(parsed.is_ok());
            assert_eq!(parsed.unwrap_or(RoleKind::Player), *role);
        }
    }

    #[test]
    fn unknown_role_is_rejected() {
        assert!(RoleKind::from_str("team_manager").is_err());
        assert!(RoleKind::from_str("Coach").is_err());
    }

    #[test]
    fn only_super_admin_is_unscoped() {
        let unscoped: Vec<_> = RoleKind::all()
            .iter()
            .filter(|role| !role.is_club_scoped())
            .collect();
        assert_eq!(unscoped, vec![&RoleKind::SuperAdmin]);
    }

    #[test]
    fn stored_row_with_unknown_role_is_rejected() {
        let decoded = RoleAssignment::from_stored("user-1", "owner", None);
        assert!(decoded.is_err());
    }

    #[test]
    fn global_assignment_applies_to_every_club() {
        let assignment = RoleAssignment::new("user-1", RoleKind::SuperAdmin, None);
        assert!(assignment.applies_to_club(ClubId::new()));

        let club_a = ClubId::new();
        let scoped = RoleAssignment::new("user-1", RoleKind::Coach, Some(club_a));
        assert!(scoped.applies_to_club(club_a));
        assert!(!scoped.applies_to_club(ClubId::new()));
    }

    #[test]
    fn unscoped_club_role_applies_to_no_club() {
        let stray = RoleAssignment::new("user-1", RoleKind::ClubAdmin, None);
        assert!(!stray.applies_to_club(ClubId::new()));
    }
}
