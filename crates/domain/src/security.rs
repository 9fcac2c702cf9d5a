use serde::{Deserialize, Serialize};

/// Kinds of role store change written to the audit trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    /// Emitted when a role is granted to a user.
    RoleAssigned,
    /// Emitted when a role grant is removed from a user.
    RoleUnassigned,
}

impl AuditAction {
    /// Returns a stable storage value for this action.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RoleAssigned => "role.assigned",
            Self::RoleUnassigned => "role.unassigned",
        }
    }
}

impl std::fmt::Display for AuditAction {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}
