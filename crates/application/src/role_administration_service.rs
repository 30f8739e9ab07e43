use std::sync::Arc;

use dispatchdesk_core::{AppError, AppResult, TenantId, UserIdentity};
use dispatchdesk_domain::{AuditAction, PermissionSet, ReservedRole, Role, RoleName};
use tracing::{info, warn};

use crate::{AuditEvent, AuditRepository, AuthorizationGate, IdentityRepository, RoleRepository};

mod bootstrap;
mod definitions;
mod lifecycle;
mod orphans;
mod rename;

#[cfg(test)]
mod tests;

const ROLE_RESOURCE_TYPE: &str = "role";

/// Application service for role definitions and the custom role lifecycle.
///
/// Callers pass their identity explicitly; every operation applies the
/// request gate before touching the store.
#[derive(Clone)]
pub struct RoleAdministrationService {
    role_repository: Arc<dyn RoleRepository>,
    identity_repository: Arc<dyn IdentityRepository>,
    audit_repository: Arc<dyn AuditRepository>,
}

impl RoleAdministrationService {
    /// Creates a new service from required dependencies.
    #[must_use]
    pub fn new(
        role_repository: Arc<dyn RoleRepository>,
        identity_repository: Arc<dyn IdentityRepository>,
        audit_repository: Arc<dyn AuditRepository>,
    ) -> Self {
        Self {
            role_repository,
            identity_repository,
            audit_repository,
        }
    }

    async fn append_audit_event(
        &self,
        actor: &UserIdentity,
        action: AuditAction,
        resource_id: &str,
        detail: String,
    ) -> AppResult<()> {
        self.audit_repository
            .append_event(AuditEvent {
                tenant_id: actor.tenant_id(),
                subject: actor.subject().to_owned(),
                action,
                resource_type: ROLE_RESOURCE_TYPE.to_owned(),
                resource_id: resource_id.to_owned(),
                detail: Some(detail),
            })
            .await
    }
}

fn reject_reserved(role_name: &str) -> AppResult<()> {
    if ReservedRole::is_reserved_name(role_name) {
        return Err(AppError::Reserved(format!(
            "role '{role_name}' is reserved and cannot be created, renamed or deleted"
        )));
    }

    Ok(())
}

/// Presents the super-role with its effective map instead of the stored one.
fn effective_definition(role: Role) -> Role {
    if ReservedRole::is_super_name(role.name().as_str()) {
        return role.with_permissions(PermissionSet::all_granted());
    }

    role
}
