use std::collections::HashSet;

use super::*;

use crate::OrphanedRoleReference;

impl RoleAdministrationService {
    /// Lists role names held by identities that resolve to no stored role.
    ///
    /// The super-role never appears since it resolves without a record.
    pub async fn orphaned_identities(
        &self,
        actor: &UserIdentity,
    ) -> AppResult<Vec<OrphanedRoleReference>> {
        AuthorizationGate::check_elevated(actor)?;

        let tenant_id = actor.tenant_id();
        let known = self
            .role_repository
            .list_roles(tenant_id)
            .await?
            .into_iter()
            .map(|role| String::from(role.name().clone()))
            .collect::<HashSet<_>>();

        Ok(self
            .identity_repository
            .list_role_references(tenant_id)
            .await?
            .into_iter()
            .filter(|reference| {
                !known.contains(&reference.role_name)
                    && !ReservedRole::is_super_name(reference.role_name.as_str())
            })
            .map(|reference| OrphanedRoleReference {
                role_name: reference.role_name,
                identity_count: reference.identity_count,
            })
            .collect())
    }

    /// Moves identities off an orphaned role name.
    ///
    /// Serves as the retry path for a rename whose identity propagation was
    /// incomplete. `from_role` must not name a stored role; `to_role` must be
    /// stored or reserved, and moving identities to the super-role requires
    /// the super-role.
    pub async fn reassign_identities(
        &self,
        actor: &UserIdentity,
        from_role: &str,
        to_role: &str,
    ) -> AppResult<u64> {
        AuthorizationGate::check_elevated(actor)?;
        if from_role.trim().is_empty() {
            return Err(AppError::Validation(
                "source role name must not be empty".to_owned(),
            ));
        }
        if ReservedRole::is_reserved_name(from_role) {
            return Err(AppError::Reserved(format!(
                "identities on reserved role '{from_role}' are not orphaned"
            )));
        }

        let to_role = RoleName::new(to_role)?;
        if to_role.reserved() == Some(ReservedRole::Sysadmin) {
            AuthorizationGate::check_super(actor)?;
        }

        let tenant_id = actor.tenant_id();
        if self
            .role_repository
            .find_role(tenant_id, from_role)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(format!(
                "role '{from_role}' still exists; rename it instead"
            )));
        }

        let target_exists = to_role.reserved().is_some()
            || self
                .role_repository
                .find_role(tenant_id, to_role.as_str())
                .await?
                .is_some();
        if !target_exists {
            return Err(AppError::NotFound(format!(
                "role '{to_role}' was not found"
            )));
        }

        let reassigned = self
            .identity_repository
            .reassign_role(tenant_id, from_role, to_role.as_str())
            .await?;

        info!(%tenant_id, from_role, to_role = to_role.as_str(), reassigned, "identities reassigned");

        self.append_audit_event(
            actor,
            AuditAction::IdentitiesReassigned,
            to_role.as_str(),
            format!("moved {reassigned} identities from '{from_role}' to '{to_role}'"),
        )
        .await?;

        Ok(reassigned)
    }
}
