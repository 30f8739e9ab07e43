use dispatchdesk_domain::Role;

/// Input payload for creating custom roles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateRoleInput {
    /// Requested role name, validated by the service.
    pub name: String,
    /// Existing role whose current map seeds the new role.
    pub based_on: Option<String>,
}

/// Result of a role rename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameRoleOutcome {
    /// Role under its new name.
    pub role: Role,
    /// Identities moved from the old name to the new one.
    pub users_updated: u64,
    /// Identities still holding the old name after propagation, when known.
    pub users_remaining: Option<u64>,
}

/// Count of identities holding one role name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleReference {
    /// Role name recorded on identities.
    pub role_name: String,
    /// Number of identities holding the name.
    pub identity_count: u64,
}

/// Role name held by identities but resolving to no stored role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrphanedRoleReference {
    /// Dangling role name.
    pub role_name: String,
    /// Number of identities left on the name.
    pub identity_count: u64,
}
