use serde::{Deserialize, Serialize};

/// Stable audit actions emitted by authorization use-cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    /// Emitted when a custom role is created.
    RoleCreated,
    /// Emitted when a custom role is renamed.
    RoleRenamed,
    /// Emitted when a custom role is deleted.
    RoleDeleted,
    /// Emitted when a role permission map is replaced.
    RolePermissionsUpdated,
    /// Emitted when identities are moved off an orphaned role name.
    IdentitiesReassigned,
}

impl AuditAction {
    /// Returns a stable storage value for this action.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RoleCreated => "permissions.role.created",
            Self::RoleRenamed => "permissions.role.renamed",
            Self::RoleDeleted => "permissions.role.deleted",
            Self::RolePermissionsUpdated => "permissions.role.updated",
            Self::IdentitiesReassigned => "permissions.identities.reassigned",
        }
    }
}
