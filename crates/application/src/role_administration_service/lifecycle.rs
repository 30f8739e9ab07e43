use super::*;

use crate::CreateRoleInput;

impl RoleAdministrationService {
    /// Creates a custom role.
    ///
    /// The permission map is copied from `based_on` when that role exists and
    /// falls back to the baseline otherwise. Basing a role on the super-role
    /// copies every capability and is limited to super-role callers.
    pub async fn create_role(&self, actor: &UserIdentity, input: CreateRoleInput) -> AppResult<Role> {
        AuthorizationGate::check_elevated(actor)?;

        let name = RoleName::new(input.name)?;
        reject_reserved(name.as_str())?;

        let tenant_id = actor.tenant_id();
        if self
            .role_repository
            .find_role(tenant_id, name.as_str())
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(format!("role '{name}' already exists")));
        }

        let permissions = self
            .initial_permissions(actor, input.based_on.as_deref())
            .await?;
        let role = self
            .role_repository
            .create_role(tenant_id, Role::custom(name, permissions))
            .await?;

        info!(%tenant_id, role = role.name().as_str(), based_on = ?input.based_on, "custom role created");

        let detail = match input.based_on.as_deref() {
            Some(based_on) => format!("created role '{}' based on '{based_on}'", role.name()),
            None => format!("created role '{}'", role.name()),
        };
        self.append_audit_event(actor, AuditAction::RoleCreated, role.name().as_str(), detail)
            .await?;

        Ok(role)
    }

    /// Deletes a custom role.
    ///
    /// Identities still holding the name keep it and resolve to no
    /// permissions until reassigned.
    pub async fn delete_role(&self, actor: &UserIdentity, role_name: &str) -> AppResult<()> {
        AuthorizationGate::check_elevated(actor)?;
        reject_reserved(role_name)?;

        let tenant_id = actor.tenant_id();
        self.role_repository
            .delete_role(tenant_id, role_name)
            .await?;

        info!(%tenant_id, role = role_name, "custom role deleted");

        self.append_audit_event(
            actor,
            AuditAction::RoleDeleted,
            role_name,
            format!("deleted role '{role_name}'"),
        )
        .await
    }

    async fn initial_permissions(
        &self,
        actor: &UserIdentity,
        based_on: Option<&str>,
    ) -> AppResult<PermissionSet> {
        let Some(based_on) = based_on else {
            return Ok(PermissionSet::baseline());
        };

        if ReservedRole::is_super_name(based_on) {
            AuthorizationGate::check_super(actor)?;
            return Ok(PermissionSet::all_granted());
        }

        Ok(self
            .role_repository
            .find_role(actor.tenant_id(), based_on)
            .await?
            .map(|role| role.permissions().clone())
            .unwrap_or_else(PermissionSet::baseline))
    }
}
