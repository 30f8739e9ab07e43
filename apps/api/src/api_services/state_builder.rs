use std::sync::Arc;

use dispatchdesk_application::{
    AuditRepository, AuthorizationService, IdentityRepository, PermissionEvaluator,
    RoleAdministrationService, RoleRepository,
};
use dispatchdesk_infrastructure::{
    PostgresAuditRepository, PostgresIdentityRepository, PostgresRoleRepository,
};
use sqlx::PgPool;

use crate::api_config::ApiConfig;
use crate::state::AppState;

pub fn build_app_state(pool: PgPool, config: &ApiConfig) -> AppState {
    let role_repository: Arc<dyn RoleRepository> =
        Arc::new(PostgresRoleRepository::new(pool.clone()));
    let identity_repository: Arc<dyn IdentityRepository> =
        Arc::new(PostgresIdentityRepository::new(pool.clone()));
    let audit_repository: Arc<dyn AuditRepository> =
        Arc::new(PostgresAuditRepository::new(pool.clone()));

    AppState {
        role_administration_service: RoleAdministrationService::new(
            role_repository.clone(),
            identity_repository.clone(),
            audit_repository,
        ),
        authorization_service: AuthorizationService::new(PermissionEvaluator::new(
            role_repository,
        )),
        identity_repository,
        postgres_pool: Some(pool),
        frontend_url: config.frontend_url.clone(),
    }
}
