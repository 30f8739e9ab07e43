use async_trait::async_trait;

use dispatchdesk_core::{AppResult, TenantId, UserIdentity};
use dispatchdesk_domain::{Role, RoleName};

use super::projections::RoleReference;

/// Repository port for persisted role definitions.
///
/// Every write replaces a whole role record, so readers never observe a
/// partially written permission map.
#[async_trait]
pub trait RoleRepository: Send + Sync {
    /// Finds one role by exact name.
    async fn find_role(&self, tenant_id: TenantId, role_name: &str) -> AppResult<Option<Role>>;

    /// Lists tenant roles ordered by name.
    async fn list_roles(&self, tenant_id: TenantId) -> AppResult<Vec<Role>>;

    /// Inserts a new role; fails with `Conflict` when the name is taken.
    async fn create_role(&self, tenant_id: TenantId, role: Role) -> AppResult<Role>;

    /// Inserts or replaces a role record by name.
    async fn upsert_role(&self, tenant_id: TenantId, role: Role) -> AppResult<Role>;

    /// Renames a custom role.
    ///
    /// Fails with `NotFound` when no custom role holds `old_name` and with
    /// `Conflict` when `new_name` is taken.
    async fn rename_role(
        &self,
        tenant_id: TenantId,
        old_name: &RoleName,
        new_name: &RoleName,
    ) -> AppResult<Role>;

    /// Deletes a custom role.
    ///
    /// Fails with `Reserved` for reserved names and `NotFound` when no
    /// custom role holds the name.
    async fn delete_role(&self, tenant_id: TenantId, role_name: &str) -> AppResult<()>;
}

/// Repository port for the role field of identity records.
#[async_trait]
pub trait IdentityRepository: Send + Sync {
    /// Loads the current identity record behind a session subject.
    async fn find_identity(
        &self,
        tenant_id: TenantId,
        subject: &str,
    ) -> AppResult<Option<UserIdentity>>;

    /// Moves every identity holding `from_role` to `to_role` and returns the
    /// number of identities updated.
    async fn reassign_role(
        &self,
        tenant_id: TenantId,
        from_role: &str,
        to_role: &str,
    ) -> AppResult<u64>;

    /// Counts identities holding a role name.
    async fn count_identities_with_role(
        &self,
        tenant_id: TenantId,
        role_name: &str,
    ) -> AppResult<u64>;

    /// Lists role names held by identities with holder counts, ordered by
    /// role name.
    async fn list_role_references(&self, tenant_id: TenantId) -> AppResult<Vec<RoleReference>>;
}
