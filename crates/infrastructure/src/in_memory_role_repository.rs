use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use dispatchdesk_application::RoleRepository;
use dispatchdesk_core::{AppError, AppResult, TenantId};
use dispatchdesk_domain::{ReservedRole, Role, RoleName};

/// In-memory role repository implementation.
#[derive(Debug, Default)]
pub struct InMemoryRoleRepository {
    roles: RwLock<HashMap<(TenantId, String), Role>>,
}

impl InMemoryRoleRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RoleRepository for InMemoryRoleRepository {
    async fn find_role(&self, tenant_id: TenantId, role_name: &str) -> AppResult<Option<Role>> {
        Ok(self
            .roles
            .read()
            .await
            .get(&(tenant_id, role_name.to_owned()))
            .cloned())
    }

    async fn list_roles(&self, tenant_id: TenantId) -> AppResult<Vec<Role>> {
        let roles = self.roles.read().await;

        let mut values: Vec<Role> = roles
            .iter()
            .filter_map(|((stored_tenant_id, _), role)| {
                (stored_tenant_id == &tenant_id).then_some(role.clone())
            })
            .collect();
        values.sort_by(|left, right| left.name().cmp(right.name()));

        Ok(values)
    }

    async fn create_role(&self, tenant_id: TenantId, role: Role) -> AppResult<Role> {
        let key = (tenant_id, role.name().as_str().to_owned());
        let mut roles = self.roles.write().await;

        if roles.contains_key(&key) {
            return Err(AppError::Conflict(format!(
                "role '{}' already exists for tenant '{}'",
                key.1, key.0
            )));
        }

        roles.insert(key, role.clone());
        Ok(role)
    }

    async fn upsert_role(&self, tenant_id: TenantId, role: Role) -> AppResult<Role> {
        let key = (tenant_id, role.name().as_str().to_owned());
        let mut roles = self.roles.write().await;

        let role = match roles.get(&key) {
            Some(existing) => existing.clone().with_permissions(role.permissions().clone()),
            None => role,
        };
        roles.insert(key, role.clone());

        Ok(role)
    }

    async fn rename_role(
        &self,
        tenant_id: TenantId,
        old_name: &RoleName,
        new_name: &RoleName,
    ) -> AppResult<Role> {
        let old_key = (tenant_id, old_name.as_str().to_owned());
        let new_key = (tenant_id, new_name.as_str().to_owned());
        let mut roles = self.roles.write().await;

        if !roles.get(&old_key).is_some_and(Role::is_custom) {
            return Err(AppError::NotFound(format!(
                "custom role '{old_name}' was not found"
            )));
        }
        if roles.contains_key(&new_key) {
            return Err(AppError::Conflict(format!(
                "role '{new_name}' already exists for tenant '{tenant_id}'"
            )));
        }

        let role = roles
            .remove(&old_key)
            .ok_or_else(|| AppError::NotFound(format!("custom role '{old_name}' was not found")))?
            .renamed(new_name.clone());
        roles.insert(new_key, role.clone());

        Ok(role)
    }

    async fn delete_role(&self, tenant_id: TenantId, role_name: &str) -> AppResult<()> {
        if ReservedRole::is_reserved_name(role_name) {
            return Err(AppError::Reserved(format!(
                "role '{role_name}' is reserved and cannot be deleted"
            )));
        }

        let key = (tenant_id, role_name.to_owned());
        let mut roles = self.roles.write().await;
        if !roles.get(&key).is_some_and(Role::is_custom) {
            return Err(AppError::NotFound(format!(
                "custom role '{role_name}' was not found"
            )));
        }

        roles.remove(&key);
        Ok(())
    }
}
