use super::*;

use crate::RenameRoleOutcome;

impl RoleAdministrationService {
    /// Renames a custom role and moves every identity holding the old name.
    ///
    /// The role record and the identity records are written in two steps.
    /// Once the role write succeeds the call succeeds; a failed or partial
    /// identity update shows up in `users_updated` and `users_remaining`.
    pub async fn rename_role(
        &self,
        actor: &UserIdentity,
        old_name: &str,
        new_name: &str,
    ) -> AppResult<RenameRoleOutcome> {
        AuthorizationGate::check_elevated(actor)?;
        reject_reserved(old_name)?;
        reject_reserved(new_name)?;

        let new_name = RoleName::new(new_name)?;
        let tenant_id = actor.tenant_id();

        let existing = self
            .role_repository
            .find_role(tenant_id, old_name)
            .await?
            .filter(Role::is_custom)
            .ok_or_else(|| AppError::NotFound(format!("custom role '{old_name}' was not found")))?;

        if self
            .role_repository
            .find_role(tenant_id, new_name.as_str())
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(format!(
                "role '{new_name}' already exists"
            )));
        }

        let old_name = existing.name().clone();
        let role = self
            .role_repository
            .rename_role(tenant_id, &old_name, &new_name)
            .await?;

        let users_updated = match self
            .identity_repository
            .reassign_role(tenant_id, old_name.as_str(), new_name.as_str())
            .await
        {
            Ok(count) => count,
            Err(error) => {
                warn!(
                    %tenant_id,
                    old_role = old_name.as_str(),
                    new_role = new_name.as_str(),
                    %error,
                    "role renamed but identity propagation failed"
                );
                0
            }
        };

        let users_remaining = self
            .remaining_holders(tenant_id, old_name.as_str())
            .await;

        info!(
            %tenant_id,
            old_role = old_name.as_str(),
            new_role = new_name.as_str(),
            users_updated,
            "custom role renamed"
        );

        if let Err(error) = self
            .append_audit_event(
                actor,
                AuditAction::RoleRenamed,
                new_name.as_str(),
                format!(
                    "renamed role '{old_name}' to '{new_name}' ({users_updated} identities updated)"
                ),
            )
            .await
        {
            warn!(%tenant_id, %error, "failed to record role rename audit event");
        }

        Ok(RenameRoleOutcome {
            role,
            users_updated,
            users_remaining,
        })
    }

    async fn remaining_holders(&self, tenant_id: TenantId, role_name: &str) -> Option<u64> {
        match self
            .identity_repository
            .count_identities_with_role(tenant_id, role_name)
            .await
        {
            Ok(count) => {
                if count > 0 {
                    warn!(%tenant_id, role = role_name, count, "identities left on renamed role");
                }
                Some(count)
            }
            Err(error) => {
                warn!(%tenant_id, role = role_name, %error, "failed to count identities on renamed role");
                None
            }
        }
    }
}
