use super::*;

impl RoleAdministrationService {
    /// Returns every role definition in the caller's tenant, ordered by name.
    pub async fn list_roles(&self, actor: &UserIdentity) -> AppResult<Vec<Role>> {
        AuthorizationGate::check_elevated(actor)?;

        Ok(self
            .role_repository
            .list_roles(actor.tenant_id())
            .await?
            .into_iter()
            .map(effective_definition)
            .collect())
    }

    /// Returns one role definition.
    ///
    /// The super-role always resolves, with every capability granted, even
    /// when no record is stored.
    pub async fn get_role(&self, actor: &UserIdentity, role_name: &str) -> AppResult<Role> {
        let stored = self
            .role_repository
            .find_role(actor.tenant_id(), role_name)
            .await?;

        match stored {
            Some(role) => Ok(effective_definition(role)),
            None if ReservedRole::is_super_name(role_name) => {
                Ok(effective_definition(Role::reserved(ReservedRole::Sysadmin)?))
            }
            None => Err(AppError::NotFound(format!(
                "role '{role_name}' was not found"
            ))),
        }
    }

    /// Replaces the permission map of a role in one record write.
    ///
    /// Reserved roles missing from the store are created on first update.
    /// Only the super-role may edit the super-role definition.
    pub async fn update_role_permissions(
        &self,
        actor: &UserIdentity,
        role_name: &str,
        permissions: PermissionSet,
    ) -> AppResult<Role> {
        AuthorizationGate::check_elevated(actor)?;
        if ReservedRole::is_super_name(role_name) {
            AuthorizationGate::check_super(actor)?;
        }

        let tenant_id = actor.tenant_id();
        let role = match self.role_repository.find_role(tenant_id, role_name).await? {
            Some(existing) => existing.with_permissions(permissions),
            None => match ReservedRole::from_name(role_name) {
                Some(reserved) => Role::reserved(reserved)?.with_permissions(permissions),
                None => {
                    return Err(AppError::NotFound(format!(
                        "role '{role_name}' was not found"
                    )));
                }
            },
        };

        let role = self.role_repository.upsert_role(tenant_id, role).await?;
        let granted = role.permissions().granted().count();
        info!(%tenant_id, role = role_name, granted, "role permissions updated");

        self.append_audit_event(
            actor,
            AuditAction::RolePermissionsUpdated,
            role_name,
            format!("updated permissions of role '{role_name}' ({granted} granted)"),
        )
        .await?;

        Ok(effective_definition(role))
    }
}
