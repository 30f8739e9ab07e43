use super::*;

impl RoleAdministrationService {
    /// Seeds reserved roles missing from a tenant and returns the names
    /// created.
    ///
    /// Existing records are left untouched, so edited reserved maps survive
    /// restarts.
    pub async fn seed_reserved_roles(&self, tenant_id: TenantId) -> AppResult<Vec<String>> {
        let mut seeded = Vec::new();

        for reserved in ReservedRole::all() {
            if self
                .role_repository
                .find_role(tenant_id, reserved.as_str())
                .await?
                .is_some()
            {
                continue;
            }

            match self
                .role_repository
                .create_role(tenant_id, Role::reserved(*reserved)?)
                .await
            {
                Ok(role) => seeded.push(String::from(role.name().clone())),
                Err(AppError::Conflict(_)) => {}
                Err(error) => return Err(error),
            }
        }

        if !seeded.is_empty() {
            info!(%tenant_id, roles = ?seeded, "reserved roles seeded");
        }

        Ok(seeded)
    }
}
