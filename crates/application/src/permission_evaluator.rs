use std::sync::Arc;

use dispatchdesk_core::{AppResult, TenantId, UserIdentity};
use dispatchdesk_domain::{Capability, PermissionSet, ReservedRole};

use crate::RoleRepository;

/// Effective permissions of one caller, evaluated for a single decision.
///
/// Snapshots are rebuilt on every authentication check and never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionSnapshot {
    role: String,
    permissions: PermissionSet,
}

impl PermissionSnapshot {
    /// Creates a snapshot for a role.
    #[must_use]
    pub fn new(role: impl Into<String>, permissions: PermissionSet) -> Self {
        Self {
            role: role.into(),
            permissions,
        }
    }

    /// Returns the role the snapshot was evaluated for.
    #[must_use]
    pub fn role(&self) -> &str {
        self.role.as_str()
    }

    /// Returns the effective permission map.
    #[must_use]
    pub fn permissions(&self) -> &PermissionSet {
        &self.permissions
    }

    /// Returns whether the capability is granted.
    #[must_use]
    pub fn is_granted(&self, capability: Capability) -> bool {
        self.permissions.is_granted(capability)
    }
}

/// Resolves role names to effective permission maps.
///
/// The super-role resolves to every capability without touching the store.
/// Unknown roles resolve to an empty map.
#[derive(Clone)]
pub struct PermissionEvaluator {
    repository: Arc<dyn RoleRepository>,
}

impl PermissionEvaluator {
    /// Creates an evaluator reading from the role repository.
    #[must_use]
    pub fn new(repository: Arc<dyn RoleRepository>) -> Self {
        Self { repository }
    }

    /// Returns the effective permission map for a role name.
    pub async fn effective_permissions(
        &self,
        tenant_id: TenantId,
        role_name: &str,
    ) -> AppResult<PermissionSet> {
        if ReservedRole::is_super_name(role_name) {
            return Ok(PermissionSet::all_granted());
        }

        Ok(self
            .repository
            .find_role(tenant_id, role_name)
            .await?
            .map(|role| role.permissions().clone())
            .unwrap_or_default())
    }

    /// Evaluates a fresh snapshot for the identity's current role.
    pub async fn snapshot(&self, identity: &UserIdentity) -> AppResult<PermissionSnapshot> {
        let permissions = self
            .effective_permissions(identity.tenant_id(), identity.role())
            .await?;

        Ok(PermissionSnapshot::new(identity.role(), permissions))
    }
}
